//! Monthly consolidation.
//!
//! This module provides pure business logic for closing a competência:
//! - Installment allocation (per-month share of a purchase, cent exact)
//! - Aggregation of income, recurring expenses and installment shares
//! - The `EntryStore` seam the aggregator reads through

pub mod aggregate;
pub mod allocation;
pub mod error;
pub mod service;
pub mod types;


pub use aggregate::{consolidate, installment_share};
pub use allocation::InstallmentAllocator;
pub use error::{ConsolidationError, StoreError};
pub use service::{ConsolidationService, EntryStore};
pub use types::ConsolidationResult;
