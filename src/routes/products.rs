use axum::{Json, extract::State};
use serde::Deserialize;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    error::{AppError, ExceptionResult},
    extract::{ApiPath, ValidJson, ValidQuery},
    pagination::{PaginatedList, PaginationMeta, PaginationOptions},
    repos::{
        OnConflict,
        product::{CreateProductDbPayload, Product, UpdateProductDbPayload},
    },
    types::{AppState, DeletionResult, deserialize_nullable},
};

pub fn router() -> axum::Router<AppState> {
    axum::Router::new()
        .route("/", axum::routing::get(list).post(create))
        .route("/list/info", axum::routing::get(list_info))
        .route(
            "/{id}",
            axum::routing::get(get).patch(update).delete(delete_),
        )
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Product with id {} not found", id))
}

#[utoipa::path(get, path = "/products", params(PaginationOptions), responses((status = 200, body = PaginatedList<Product>), (status = 400, body = ExceptionResult)), tag = "products", operation_id = "getProductsList")]
pub async fn list(
    State(state): State<AppState>,
    ValidQuery(options): ValidQuery<PaginationOptions>,
) -> Result<Json<PaginatedList<Product>>, AppError> {
    let res = state.products.get_paginated_list(Some(options)).await?;
    Ok(Json(res))
}

#[utoipa::path(get, path = "/products/list/info", params(PaginationOptions), responses((status = 200, body = PaginationMeta), (status = 400, body = ExceptionResult)), tag = "products", operation_id = "getProductsListInfo")]
pub async fn list_info(
    State(state): State<AppState>,
    ValidQuery(options): ValidQuery<PaginationOptions>,
) -> Result<Json<PaginationMeta>, AppError> {
    let res = state.products.get_pagination_info(Some(options)).await?;
    Ok(Json(res))
}

#[utoipa::path(get, path = "/products/{id}", params(("id" = Uuid, Path)), responses((status = 200, body = Product), (status = 404, body = ExceptionResult)), tag = "products", operation_id = "getProductById")]
pub async fn get(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<Product>, AppError> {
    let res = state.products.get_by_id(id).await?.ok_or_else(|| not_found(id))?;
    Ok(Json(res))
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateProductPayload {
    #[validate(length(min = 3, max = 30))]
    pub name: String,
    #[validate(length(max = 255))]
    pub description: String,
    #[validate(url, length(max = 255))]
    pub logo_url: Option<String>,
    pub workspace_id: Uuid,
}

impl From<CreateProductPayload> for CreateProductDbPayload {
    fn from(payload: CreateProductPayload) -> Self {
        CreateProductDbPayload {
            name: payload.name,
            description: payload.description,
            logo_url: payload.logo_url,
            workspace_id: payload.workspace_id,
        }
    }
}

#[utoipa::path(post, path = "/products", request_body = CreateProductPayload, responses((status = 200, body = Product), (status = 400, body = ExceptionResult), (status = 409, body = ExceptionResult)), tag = "products", operation_id = "createProduct")]
pub async fn create(
    State(state): State<AppState>,
    ValidJson(payload): ValidJson<CreateProductPayload>,
) -> Result<Json<Product>, AppError> {
    let name = payload.name.clone();
    // Unique and foreign key violations surface as translated errors.
    let created = state
        .products
        .create(CreateProductDbPayload::from(payload), OnConflict::Error)
        .await?
        .ok_or_else(|| AppError::Conflict(format!("Product with name {} already exists", name)))?;
    tracing::info!("created product {}", created.id);
    Ok(Json(created))
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductPayload {
    #[validate(length(min = 3, max = 30))]
    pub name: Option<String>,
    #[validate(length(max = 255))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "deserialize_nullable")]
    #[schema(value_type = Option<String>)]
    #[validate(url, length(max = 255))]
    pub logo_url: Option<Option<String>>,
    pub workspace_id: Option<Uuid>,
}

impl From<UpdateProductPayload> for UpdateProductDbPayload {
    fn from(payload: UpdateProductPayload) -> Self {
        UpdateProductDbPayload {
            name: payload.name,
            description: payload.description,
            logo_url: payload.logo_url,
            workspace_id: payload.workspace_id,
        }
    }
}

#[utoipa::path(patch, path = "/products/{id}", params(("id" = Uuid, Path)), request_body = UpdateProductPayload, responses((status = 200, body = Product), (status = 404, body = ExceptionResult)), tag = "products", operation_id = "updateProduct")]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ValidJson(payload): ValidJson<UpdateProductPayload>,
) -> Result<Json<Product>, AppError> {
    let updated = state
        .products
        .update(id, UpdateProductDbPayload::from(payload))
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(updated))
}

#[utoipa::path(delete, path = "/products/{id}", params(("id" = Uuid, Path)), responses((status = 200, body = DeletionResult), (status = 404, body = ExceptionResult)), tag = "products", operation_id = "deleteProduct")]
pub async fn delete_(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
) -> Result<Json<DeletionResult>, AppError> {
    let deleted = state.products.delete(id).await?.ok_or_else(|| not_found(id))?;
    tracing::info!("deleted product {}", id);
    Ok(Json(deleted))
}
