//! Core business logic for Financas.
//!
//! This crate contains pure business logic with ZERO web or database dependencies.
//! All domain types, validation rules, and calculations live here.
//!
//! # Modules
//!
//! - `entry` - Ledger entries (lancamentos) and payload validation
//! - `reference` - Categories and payment methods
//! - `consolidation` - Monthly consolidation and installment allocation

pub mod consolidation;
pub mod entry;
pub mod reference;
