use axum::{Json, http::StatusCode};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct PingResponse {
    pub ping: String,
}

#[utoipa::path(get, path = "/", responses((status = 200, body = PingResponse)), tag = "app", operation_id = "getPing")]
pub async fn ping() -> Json<PingResponse> {
    Json(PingResponse { ping: "pong".to_string() })
}

#[utoipa::path(get, path = "/health", responses((status = 200, description = "OK")), tag = "app")]
pub async fn health() -> StatusCode {
    StatusCode::OK
}
