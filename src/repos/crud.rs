use std::marker::PhantomData;

use uuid::Uuid;

use crate::error::DatabaseError;
use crate::pagination::{
    PaginatedList, PaginationMeta, PaginationOptions, validate_pagination_options,
};
use crate::repos::base::{Changeset, Entity, OnConflict, strip_base_columns};
use crate::repos::storage::{PgStorage, Storage};
use crate::types::DeletionResult;

/// Generic CRUD surface bound to one entity type and its storage.
///
/// "Nothing matched" is reported as `None`, never as an error, so each
/// resource decides whether that means not found, conflict or success.
/// Storage failures are returned unchanged.
pub struct CrudService<E, S = PgStorage> {
    storage: S,
    _marker: PhantomData<fn() -> E>,
}

impl<E, S: Clone> Clone for CrudService<E, S> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            _marker: PhantomData,
        }
    }
}

impl<E, S> CrudService<E, S>
where
    E: Entity,
    S: Storage<E>,
{
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            _marker: PhantomData,
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub async fn list(&self, options: Option<PaginationOptions>) -> Result<Vec<E>, DatabaseError> {
        let pagination = validate_pagination_options(options);
        self.storage.find(pagination.skip(), pagination.take()).await
    }

    pub async fn get_paginated_list(
        &self,
        options: Option<PaginationOptions>,
    ) -> Result<PaginatedList<E>, DatabaseError> {
        let pagination = validate_pagination_options(options);
        let (items, total_items) = self
            .storage
            .find_and_count(pagination.skip(), pagination.take())
            .await?;
        Ok(PaginatedList {
            items,
            meta: pagination.meta(total_items),
        })
    }

    /// Same meta as [`Self::get_paginated_list`] without fetching the rows.
    pub async fn get_pagination_info(
        &self,
        options: Option<PaginationOptions>,
    ) -> Result<PaginationMeta, DatabaseError> {
        let pagination = validate_pagination_options(options);
        let total_items = self.storage.count().await?;
        Ok(pagination.meta(total_items))
    }

    pub async fn count(&self) -> Result<i64, DatabaseError> {
        self.storage.count().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<E>, DatabaseError> {
        self.storage.find_one(id).await
    }

    /// Inserts a row and returns it as written. `None` means the storage wrote
    /// nothing, which with [`OnConflict::DoNothing`] usually means a conflict.
    pub async fn create<C: Changeset>(
        &self,
        input: C,
        on_conflict: OnConflict,
    ) -> Result<Option<E>, DatabaseError> {
        let fields = strip_base_columns(input.into_fields());
        tracing::debug!(table = E::get_table_name(), ?on_conflict, "inserting row");
        let rows = self.storage.insert(fields, on_conflict).await?;
        if rows.is_empty() {
            tracing::debug!(table = E::get_table_name(), "insert wrote no rows");
        }
        Ok(rows.into_iter().next())
    }

    /// Changes only the fields carried by `input`. An input with no fields
    /// leaves the row untouched and returns it as stored.
    pub async fn update<C: Changeset>(&self, id: Uuid, input: C) -> Result<Option<E>, DatabaseError> {
        let fields = strip_base_columns(input.into_fields());
        if fields.is_empty() {
            return self.get_by_id(id).await;
        }
        tracing::debug!(table = E::get_table_name(), %id, "updating row");
        let rows = self.storage.update(id, fields).await?;
        Ok(rows.into_iter().next())
    }

    pub async fn delete(&self, id: Uuid) -> Result<Option<DeletionResult>, DatabaseError> {
        let affected = self.storage.delete(id).await?;
        if affected == 0 {
            return Ok(None);
        }
        tracing::debug!(table = E::get_table_name(), %id, "deleted row");
        Ok(Some(DeletionResult { id }))
    }
}
