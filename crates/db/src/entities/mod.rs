//! `SeaORM` entity definitions.
//!
//! Amounts are stored as integer cents and competências as `YYYY-MM` text.

pub mod categorias;
pub mod formas_pagamento;
pub mod lancamentos;
