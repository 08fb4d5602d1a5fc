use axum::{Json, extract::State};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, ExceptionResult},
    extract::{ApiPath, ValidJson, ValidQuery},
    pagination::{PaginatedList, PaginationOptions},
    repos::{
        OnConflict,
        workspace::{CreateWorkspaceDbPayload, UpdateWorkspaceDbPayload, Workspace},
    },
    types::{AppState, DeletionResult, deserialize_nullable},
};

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::get(list).post(create))
        .route(
            "/{id}",
            axum::routing::get(get).patch(update).delete(delete_),
        )
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Workspace with id {} not found", id))
}

#[utoipa::path(get, path = "/workspaces", params(PaginationOptions), responses((status = 200, body = PaginatedList<Workspace>), (status = 400, body = ExceptionResult)), tag = "workspaces", operation_id = "getWorkspacesList")]
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(options): ValidQuery<PaginationOptions>,
) -> Result<Json<PaginatedList<Workspace>>, AppError> {
    let res = state.workspaces.get_paginated_list(Some(options)).await?;
    Ok(Json(res))
}

#[utoipa::path(get, path = "/workspaces/{id}", params(("id" = Uuid, Path)), responses((status = 200, body = Workspace), (status = 404, body = ExceptionResult)), tag = "workspaces", operation_id = "getWorkspaceById")]
pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Workspace>, AppError> {
    let res = state.workspaces.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(res))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkspacePayload {
    #[validate(length(min = 3, max = 30))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: String,
    #[validate(url, length(max = 255))]
    pub logo_url: Option<String>,
}

impl From<CreateWorkspacePayload> for CreateWorkspaceDbPayload {
    fn from(payload: CreateWorkspacePayload) -> Self {
        CreateWorkspaceDbPayload {
            name: payload.name,
            description: payload.description,
            logo_url: payload.logo_url,
        }
    }
}

#[utoipa::path(post, path = "/workspaces", request_body = CreateWorkspacePayload, responses((status = 200, body = Workspace), (status = 409, body = ExceptionResult)), tag = "workspaces", operation_id = "createWorkspace")]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateWorkspacePayload>,
) -> Result<Json<Workspace>, AppError> {
    let name = payload.name.clone();
    let created = state
        .workspaces
        .create(CreateWorkspaceDbPayload::from(payload), OnConflict::DoNothing)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Workspace with name {} already exists", name)))?;
    tracing::info!("created workspace {}", created.id);
    Ok(Json(created))
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkspacePayload {
    #[validate(length(min = 3, max = 30))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(url, length(max = 255))]
    pub logo_url: Option<Option<String>>,
}

impl From<UpdateWorkspacePayload> for UpdateWorkspaceDbPayload {
    fn from(payload: UpdateWorkspacePayload) -> Self {
        UpdateWorkspaceDbPayload {
            name: payload.name,
            description: payload.description,
            logo_url: payload.logo_url,
        }
    }
}

#[utoipa::path(patch, path = "/workspaces/{id}", params(("id" = Uuid, Path)), request_body = UpdateWorkspacePayload, responses((status = 200, body = Workspace), (status = 404, body = ExceptionResult)), tag = "workspaces", operation_id = "updateWorkspace")]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(payload): ValidJson<UpdateWorkspacePayload>,
) -> Result<Json<Workspace>, AppError> {
    let updated = state
        .workspaces
        .update(id, UpdateWorkspaceDbPayload::from(payload))
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/workspaces/{id}", params(("id" = Uuid, Path)), responses((status = 200, body = DeletionResult), (status = 404, body = ExceptionResult)), tag = "workspaces", operation_id = "deleteWorkspace")]
pub async fn delete_(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DeletionResult>, AppError> {
    let deleted = state.workspaces.delete(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!("deleted workspace {}", id);
    Ok(Json(deleted))
}
