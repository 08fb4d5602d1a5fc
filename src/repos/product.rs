use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repos::base::{Changeset, Entity, Fields};
use crate::repos::crud::CrudService;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub workspace_id: Uuid,
}

impl Entity for Product {
    fn get_table_name() -> &'static str {
        "products"
    }

    fn columns() -> &'static [&'static str] {
        &[
            "id",
            "created_at",
            "updated_at",
            "name",
            "description",
            "logo_url",
            "workspace_id",
        ]
    }

    fn id(&self) -> Uuid {
        self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CreateProductDbPayload {
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
    pub workspace_id: Uuid,
}

impl Changeset for CreateProductDbPayload {
    fn into_fields(self) -> Fields {
        vec![
            ("name", self.name.into()),
            ("description", self.description.into()),
            ("logo_url", self.logo_url.into()),
            ("workspace_id", self.workspace_id.into()),
        ]
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateProductDbPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<Option<String>>,
    pub workspace_id: Option<Uuid>,
}

impl Changeset for UpdateProductDbPayload {
    fn into_fields(self) -> Fields {
        let mut fields = Fields::new();
        if let Some(name) = self.name {
            fields.push(("name", name.into()));
        }
        if let Some(description) = self.description {
            fields.push(("description", description.into()));
        }
        if let Some(logo_url) = self.logo_url {
            fields.push(("logo_url", logo_url.into()));
        }
        if let Some(workspace_id) = self.workspace_id {
            fields.push(("workspace_id", workspace_id.into()));
        }
        fields
    }
}

pub type ProductRepo = CrudService<Product>;
