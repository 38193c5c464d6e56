//! Repository for the categorias and formas_pagamento tables.
//!
//! Both tables share one shape, so a single repository serves either list,
//! selected by [`ReferenceKind`].

use financas_core::reference::{Reference, ReferenceKind};
use financas_shared::types::UserId;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter,
    QueryOrder, Set, SqlErr,
};
use uuid::Uuid;

use crate::entities::{categorias, formas_pagamento};

/// Error types for category and payment method operations.
#[derive(Debug, thiserror::Error)]
pub enum ReferenceError {
    /// Another record of the same owner already has this name.
    #[error("Name '{0}' already exists")]
    DuplicateName(String),

    /// No record with this id for the owner.
    #[error("Reference not found: {0}")]
    NotFound(Uuid),

    /// Database error.
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
}

impl From<categorias::Model> for Reference {
    fn from(model: categorias::Model) -> Self {
        Self {
            id: model.id,
            user_id: UserId::from_uuid(model.usuario_id),
            name: model.nome,
        }
    }
}

impl From<formas_pagamento::Model> for Reference {
    fn from(model: formas_pagamento::Model) -> Self {
        Self {
            id: model.id,
            user_id: UserId::from_uuid(model.usuario_id),
            name: model.nome,
        }
    }
}

/// Repository for one reference list of one owner.
#[derive(Debug, Clone)]
pub struct ReferenceRepository {
    db: DatabaseConnection,
    kind: ReferenceKind,
    owner: UserId,
}

impl ReferenceRepository {
    /// Creates a repository for the `kind` list owned by `owner`.
    #[must_use]
    pub const fn new(db: DatabaseConnection, kind: ReferenceKind, owner: UserId) -> Self {
        Self { db, kind, owner }
    }

    /// Creates a record with a fresh id.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateName` if the owner already has a record named `name`.
    pub async fn create(&self, name: &str) -> Result<Reference, ReferenceError> {
        if self.find_id_by_name(name).await?.is_some() {
            return Err(ReferenceError::DuplicateName(name.to_string()));
        }

        let created = self.insert(name).await?;
        tracing::debug!(kind = ?self.kind, id = %created.id, "Reference created");
        Ok(created)
    }

    /// Inserts a record; the unique `(usuario_id, nome)` index decides
    /// duplicates that slip past the lookup in [`Self::create`].
    async fn insert(&self, name: &str) -> Result<Reference, ReferenceError> {
        let id = Uuid::now_v7();
        let owner = self.owner.into_inner();
        let created: Reference = match self.kind {
            ReferenceKind::Category => categorias::ActiveModel {
                id: Set(id),
                usuario_id: Set(owner),
                nome: Set(name.to_string()),
            }
            .insert(&self.db)
            .await
            .map_err(|e| duplicate_or_database(e, name))?
            .into(),
            ReferenceKind::PaymentMethod => formas_pagamento::ActiveModel {
                id: Set(id),
                usuario_id: Set(owner),
                nome: Set(name.to_string()),
            }
            .insert(&self.db)
            .await
            .map_err(|e| duplicate_or_database(e, name))?
            .into(),
        };
        Ok(created)
    }

    /// Lists every record of the owner in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list(&self) -> Result<Vec<Reference>, ReferenceError> {
        let owner = self.owner.into_inner();
        let records: Vec<Reference> = match self.kind {
            ReferenceKind::Category => categorias::Entity::find()
                .filter(categorias::Column::UsuarioId.eq(owner))
                .order_by_asc(categorias::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Reference::from)
                .collect(),
            ReferenceKind::PaymentMethod => formas_pagamento::Entity::find()
                .filter(formas_pagamento::Column::UsuarioId.eq(owner))
                .order_by_asc(formas_pagamento::Column::Id)
                .all(&self.db)
                .await?
                .into_iter()
                .map(Reference::from)
                .collect(),
        };
        Ok(records)
    }

    /// Finds a record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Reference>, ReferenceError> {
        let owner = self.owner.into_inner();
        let record = match self.kind {
            ReferenceKind::Category => categorias::Entity::find_by_id(id)
                .filter(categorias::Column::UsuarioId.eq(owner))
                .one(&self.db)
                .await?
                .map(Reference::from),
            ReferenceKind::PaymentMethod => formas_pagamento::Entity::find_by_id(id)
                .filter(formas_pagamento::Column::UsuarioId.eq(owner))
                .one(&self.db)
                .await?
                .map(Reference::from),
        };
        Ok(record)
    }

    /// Gets a record by id.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    pub async fn get(&self, id: Uuid) -> Result<Reference, ReferenceError> {
        self.find_by_id(id)
            .await?
            .ok_or(ReferenceError::NotFound(id))
    }

    /// Returns true if a record with this id exists.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn exists(&self, id: Uuid) -> Result<bool, ReferenceError> {
        Ok(self.find_by_id(id).await?.is_some())
    }

    /// Renames a record.
    ///
    /// Renaming a record to its current name succeeds.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` for an unknown id and `DuplicateName` if another
    /// record already has `name`.
    pub async fn rename(&self, id: Uuid, name: &str) -> Result<Reference, ReferenceError> {
        let current = self.get(id).await?;
        if let Some(other) = self.find_id_by_name(name).await?
            && other != id
        {
            return Err(ReferenceError::DuplicateName(name.to_string()));
        }

        let updated = self.update_name(&current, name).await?;
        tracing::debug!(kind = ?self.kind, id = %id, "Reference renamed");
        Ok(updated)
    }

    async fn update_name(
        &self,
        current: &Reference,
        name: &str,
    ) -> Result<Reference, ReferenceError> {
        let updated: Reference = match self.kind {
            ReferenceKind::Category => categorias::ActiveModel {
                id: Set(current.id),
                usuario_id: Set(current.user_id.into_inner()),
                nome: Set(name.to_string()),
            }
            .update(&self.db)
            .await
            .map_err(|e| duplicate_or_database(e, name))?
            .into(),
            ReferenceKind::PaymentMethod => formas_pagamento::ActiveModel {
                id: Set(current.id),
                usuario_id: Set(current.user_id.into_inner()),
                nome: Set(name.to_string()),
            }
            .update(&self.db)
            .await
            .map_err(|e| duplicate_or_database(e, name))?
            .into(),
        };
        Ok(updated)
    }

    /// Deletes a record. Entries that mention it are left untouched.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if no record has this id.
    pub async fn delete(&self, id: Uuid) -> Result<(), ReferenceError> {
        let owner = self.owner.into_inner();
        let result = match self.kind {
            ReferenceKind::Category => {
                categorias::Entity::delete_by_id(id)
                    .filter(categorias::Column::UsuarioId.eq(owner))
                    .exec(&self.db)
                    .await?
            }
            ReferenceKind::PaymentMethod => {
                formas_pagamento::Entity::delete_by_id(id)
                    .filter(formas_pagamento::Column::UsuarioId.eq(owner))
                    .exec(&self.db)
                    .await?
            }
        };

        if result.rows_affected == 0 {
            return Err(ReferenceError::NotFound(id));
        }

        tracing::debug!(kind = ?self.kind, id = %id, "Reference deleted");
        Ok(())
    }

    async fn find_id_by_name(&self, name: &str) -> Result<Option<Uuid>, DbErr> {
        let owner = self.owner.into_inner();
        let id = match self.kind {
            ReferenceKind::Category => categorias::Entity::find()
                .filter(categorias::Column::UsuarioId.eq(owner))
                .filter(categorias::Column::Nome.eq(name))
                .one(&self.db)
                .await?
                .map(|m| m.id),
            ReferenceKind::PaymentMethod => formas_pagamento::Entity::find()
                .filter(formas_pagamento::Column::UsuarioId.eq(owner))
                .filter(formas_pagamento::Column::Nome.eq(name))
                .one(&self.db)
                .await?
                .map(|m| m.id),
        };
        Ok(id)
    }
}

fn duplicate_or_database(err: DbErr, name: &str) -> ReferenceError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            ReferenceError::DuplicateName(name.to_string())
        }
        _ => ReferenceError::Database(err),
    }
}
