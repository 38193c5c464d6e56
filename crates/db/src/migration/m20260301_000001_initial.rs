//! Initial schema: entries, categories and payment methods.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(SCHEMA_SQL).await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();
        db.execute_unprepared(
            r"
            DROP TABLE IF EXISTS formas_pagamento;
            DROP TABLE IF EXISTS categorias;
            DROP TABLE IF EXISTS lancamentos;
            ",
        )
        .await?;
        Ok(())
    }
}

const SCHEMA_SQL: &str = r"
-- Entries (lancamentos). Type-specific columns are null when not applicable.
-- categoria_id / forma_pagamento_id are checked on insert only; no foreign keys.
CREATE TABLE lancamentos (
    id BLOB PRIMARY KEY NOT NULL,
    usuario_id BLOB NOT NULL,
    nome TEXT NOT NULL,
    data TEXT NOT NULL,
    competencia TEXT NOT NULL,
    tipo_lancamento TEXT NOT NULL,
    categoria_id BLOB,
    forma_pagamento_id BLOB,
    valor_centavos INTEGER,
    pago INTEGER,
    valor_total_centavos INTEGER,
    numero_parcelas INTEGER,
    CONSTRAINT chk_lancamentos_tipo
        CHECK (tipo_lancamento IN ('ENTRADA', 'FIXO', 'VARIAVEL', 'PARCELADO')),
    CONSTRAINT chk_lancamentos_competencia
        CHECK (competencia GLOB '[0-9][0-9][0-9][0-9]-[0-1][0-9]'),
    CONSTRAINT chk_lancamentos_parcelas
        CHECK (numero_parcelas IS NULL OR numero_parcelas >= 1)
);

-- Consolidation filters by type and month
CREATE INDEX idx_lancamentos_tipo_competencia
    ON lancamentos(usuario_id, tipo_lancamento, competencia);

CREATE TABLE categorias (
    id BLOB PRIMARY KEY NOT NULL,
    usuario_id BLOB NOT NULL,
    nome TEXT NOT NULL,
    CONSTRAINT uq_categorias_nome UNIQUE (usuario_id, nome)
);

CREATE TABLE formas_pagamento (
    id BLOB PRIMARY KEY NOT NULL,
    usuario_id BLOB NOT NULL,
    nome TEXT NOT NULL,
    CONSTRAINT uq_formas_pagamento_nome UNIQUE (usuario_id, nome)
);
";
