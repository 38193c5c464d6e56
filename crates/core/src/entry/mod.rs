//! Ledger entries (lancamentos).
//!
//! An entry is income, a fixed or variable expense, or an installment
//! purchase. Entries are validated here and never change once stored.

pub mod types;
pub mod validation;

pub use types::{
    Entry, EntryDetail, EntryKind, Income, InstallmentPurchase, NewEntry, RecurringExpense,
};
pub use validation::validate_new_entry;
