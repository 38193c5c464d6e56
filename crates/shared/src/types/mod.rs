//! Common types used across the application.

pub mod competencia;
pub mod id;
pub mod money;

pub use competencia::{Competencia, CompetenciaError};
pub use id::*;
