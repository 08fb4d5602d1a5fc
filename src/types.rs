use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repos::{PgStorage, product::ProductRepo, workspace::WorkspaceRepo};

#[derive(Clone)]
pub struct AppState {
    pub version: String,
    pub workspaces: WorkspaceRepo,
    pub products: ProductRepo,
}

impl AppState {
    pub fn new(db_pool: sqlx::PgPool, version: impl Into<String>) -> Self {
        let storage = PgStorage::new(db_pool);
        AppState {
            version: version.into(),
            workspaces: WorkspaceRepo::new(storage.clone()),
            products: ProductRepo::new(storage),
        }
    }
}

/// Echo of a deleted row's id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeletionResult {
    pub id: Uuid,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
/// Use together with `#[serde(default)]`.
pub fn deserialize_nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
