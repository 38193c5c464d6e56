//! `SeaORM` Entity for lancamentos table.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One row per entry. Columns that do not apply to the entry's
/// `tipo_lancamento` are null.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq, Serialize, Deserialize)]
#[sea_orm(table_name = "lancamentos")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub usuario_id: Uuid,
    pub nome: String,
    pub data: Date,
    pub competencia: String,
    pub tipo_lancamento: String,
    pub categoria_id: Option<Uuid>,
    pub forma_pagamento_id: Option<Uuid>,
    pub valor_centavos: Option<i64>,
    pub pago: Option<bool>,
    pub valor_total_centavos: Option<i64>,
    pub numero_parcelas: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
