use anyhow::Result;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use sqlx::PgPool;
use stackbox::{
    app::build_router,
    db::{make_db_pool, run_migrations},
    repos::{
        OnConflict, PgStorage,
        product::Product,
        workspace::{CreateWorkspaceDbPayload, WorkspaceRepo},
    },
    types::AppState,
};
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_test_db() -> Result<Option<PgPool>> {
    let Ok(database_url) = std::env::var("DATABASE_URL") else {
        eprintln!("Skipping route tests: DATABASE_URL not set");
        return Ok(None);
    };
    let pool = make_db_pool(&database_url).await?;
    run_migrations(&pool).await?;
    Ok(Some(pool))
}

fn unique_name(prefix: &str) -> String {
    format!("{}-{}", prefix, &Uuid::new_v4().simple().to_string()[..12])
}

async fn create_test_workspace(pool: &PgPool) -> Result<Uuid> {
    let repo = WorkspaceRepo::new(PgStorage::new(pool.clone()));
    let workspace = repo
        .create(
            CreateWorkspaceDbPayload {
                name: unique_name("owner"),
                description: "products route test".into(),
                logo_url: None,
            },
            OnConflict::Error,
        )
        .await?
        .expect("workspace created");
    Ok(workspace.id)
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Result<Request<Body>> {
    Ok(Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&body)?))?)
}

fn delete_request(uri: String) -> Result<Request<Body>> {
    Ok(Request::builder().method("DELETE").uri(uri).body(Body::empty())?)
}

async fn read_json<T: serde::de::DeserializeOwned>(response: axum::response::Response) -> Result<T> {
    let body = response.into_body().collect().await?.to_bytes();
    Ok(serde_json::from_slice(&body)?)
}

async fn post_product(app: &Router, name: &str, workspace_id: Uuid) -> Result<axum::response::Response> {
    let payload = serde_json::json!({
        "name": name,
        "description": "a product",
        "workspaceId": workspace_id,
    });
    Ok(app.clone().oneshot(json_request("POST", "/products", payload)?).await?)
}

#[tokio::test]
async fn test_product_lifecycle() -> Result<()> {
    let Some(pool) = setup_test_db().await? else {
        return Ok(());
    };
    let workspace_id = create_test_workspace(&pool).await?;
    let app = build_router(AppState::new(pool, "test"));

    let name = unique_name("prod");
    let response = post_product(&app, &name, workspace_id).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let created: Product = read_json(response).await?;
    assert_eq!(created.name, name);
    assert_eq!(created.workspace_id, workspace_id);

    let response = app
        .clone()
        .oneshot(Request::builder().uri(format!("/products/{}", created.id)).body(Body::empty())?)
        .await?;
    let fetched: Product = read_json(response).await?;
    assert_eq!(fetched, created);

    let patch = serde_json::json!({ "description": "updated" });
    let response = app
        .clone()
        .oneshot(json_request("PATCH", &format!("/products/{}", created.id), patch)?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Product = read_json(response).await?;
    assert_eq!(updated.description, "updated");
    assert_eq!(updated.name, created.name);
    assert_eq!(updated.workspace_id, created.workspace_id);

    let response = app.clone().oneshot(delete_request(format!("/products/{}", created.id))?).await?;
    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = read_json(response).await?;
    assert_eq!(body, serde_json::json!({ "id": created.id }));

    let response = app.clone().oneshot(delete_request(format!("/products/{}", created.id))?).await?;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    app.oneshot(delete_request(format!("/workspaces/{}", workspace_id))?).await?;
    Ok(())
}

#[tokio::test]
async fn test_duplicate_product_name_is_translated() -> Result<()> {
    let Some(pool) = setup_test_db().await? else {
        return Ok(());
    };
    let workspace_id = create_test_workspace(&pool).await?;
    let app = build_router(AppState::new(pool, "test"));

    let name = unique_name("same");
    let created: Product = read_json(post_product(&app, &name, workspace_id).await?).await?;

    let response = post_product(&app, &name, workspace_id).await?;
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = read_json(response).await?;
    assert_eq!(
        body,
        serde_json::json!({
            "statusCode": 409,
            "error": "Bad Request",
            "message": "There is already a Product with the same name",
        })
    );

    app.clone().oneshot(delete_request(format!("/products/{}", created.id))?).await?;
    app.oneshot(delete_request(format!("/workspaces/{}", workspace_id))?).await?;
    Ok(())
}

#[tokio::test]
async fn test_unknown_workspace_reference_is_translated() -> Result<()> {
    let Some(pool) = setup_test_db().await? else {
        return Ok(());
    };
    let app = build_router(AppState::new(pool, "test"));

    let response = post_product(&app, &unique_name("orphan"), Uuid::new_v4()).await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = read_json(response).await?;
    assert_eq!(body["statusCode"], 400);
    assert_eq!(body["message"], "The value of 'workspaceId' is invalid");
    Ok(())
}

#[tokio::test]
async fn test_referenced_workspace_cannot_be_deleted() -> Result<()> {
    let Some(pool) = setup_test_db().await? else {
        return Ok(());
    };
    let workspace_id = create_test_workspace(&pool).await?;
    let app = build_router(AppState::new(pool, "test"));
    let product: Product =
        read_json(post_product(&app, &unique_name("ref"), workspace_id).await?).await?;

    let response = app
        .clone()
        .oneshot(delete_request(format!("/workspaces/{}", workspace_id))?)
        .await?;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = read_json(response).await?;
    assert_eq!(body["message"], "The value of 'id' is invalid");

    app.clone().oneshot(delete_request(format!("/products/{}", product.id))?).await?;
    app.oneshot(delete_request(format!("/workspaces/{}", workspace_id))?).await?;
    Ok(())
}

#[tokio::test]
async fn test_products_list_info() -> Result<()> {
    let Some(pool) = setup_test_db().await? else {
        return Ok(());
    };
    let workspace_id = create_test_workspace(&pool).await?;
    let app = build_router(AppState::new(pool, "test"));
    let product: Product =
        read_json(post_product(&app, &unique_name("info"), workspace_id).await?).await?;

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/products/list/info?limit=100").body(Body::empty())?)
        .await?;
    assert_eq!(response.status(), StatusCode::OK);
    let meta: serde_json::Value = read_json(response).await?;
    let total_items = meta["totalItems"].as_i64().unwrap();
    assert!(total_items >= 1);
    assert_eq!(meta["totalPages"].as_i64().unwrap(), (total_items + 99) / 100 - 1);

    let response = app
        .clone()
        .oneshot(Request::builder().uri("/products").body(Body::empty())?)
        .await?;
    let page: serde_json::Value = read_json(response).await?;
    assert!(page["items"].as_array().unwrap().len() <= 10);

    app.clone().oneshot(delete_request(format!("/products/{}", product.id))?).await?;
    app.oneshot(delete_request(format!("/workspaces/{}", workspace_id))?).await?;
    Ok(())
}
