//! Shared types, errors, and configuration for Financas.
//!
//! This crate provides common types used across all other crates:
//! - Money helpers with exact decimal rounding
//! - `Competencia`, the accounting month an entry belongs to
//! - Typed IDs for type-safe entity references
//! - Application-wide error types
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{AppError, FieldError};
