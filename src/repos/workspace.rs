use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repos::base::{Changeset, Entity, Fields};
use crate::repos::crud::CrudService;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
}

impl Entity for Workspace {
    fn get_table_name() -> &'static str {
        "workspaces"
    }

    fn columns() -> &'static [&'static str] {
        &["id", "created_at", "updated_at", "name", "description", "logo_url"]
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
pub struct CreateWorkspaceDbPayload {
    pub name: String,
    pub description: String,
    pub logo_url: Option<String>,
}

impl Changeset for CreateWorkspaceDbPayload {
    fn into_fields(self) -> Fields {
        vec![
            ("name", self.name.into()),
            ("description", self.description.into()),
            ("logo_url", self.logo_url.into()),
        ]
    }
}

/// `logo_url: Some(None)` clears the logo, `None` keeps it.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorkspaceDbPayload {
    pub name: Option<String>,
    pub description: Option<String>,
    pub logo_url: Option<Option<String>>,
}

impl Changeset for UpdateWorkspaceDbPayload {
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
        fields
    }
}

pub type WorkspaceRepo = CrudService<Workspace>;
