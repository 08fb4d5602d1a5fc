use axum::{Router, http::HeaderValue, routing::get};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::Config, openapi::ApiDoc, routes, types::AppState};

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .nest("/workspaces", routes::workspaces::router())
        .nest("/products", routes::products::router())
        .route("/", get(routes::health::ping))
        .route("/health", get(routes::health::health))
        .route("/version", get(routes::version::version))
        .with_state(app_state)
}

/// The router plus the layers and documentation driven by configuration.
pub fn build_app(app_state: AppState, config: &Config) -> Router {
    let mut router = build_router(app_state);
    if config.enable_swagger {
        router = router
            .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()));
        tracing::info!("swagger is enabled and running on /swagger");
    }
    router.layer(cors_layer(&config.allowed_origins)).layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("ignoring invalid allowed origin {:?}", origin);
                None
            }
        })
        .collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
