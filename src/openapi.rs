use utoipa::OpenApi;

use crate::{error, pagination, repos as repo, routes, types};

#[derive(OpenApi)]
#[openapi(
    info(title = "stackbox", description = "Workspaces and products API"),
    paths(
        routes::workspaces::list,
        routes::workspaces::get,
        routes::workspaces::create,
        routes::workspaces::update,
        routes::workspaces::delete_,

        routes::products::list,
        routes::products::list_info,
        routes::products::get,
        routes::products::create,
        routes::products::update,
        routes::products::delete_,

        routes::health::ping,
        routes::health::health,
        routes::version::version,
    ),
    components(schemas(
        // Repo models
        repo::workspace::Workspace,
        repo::product::Product,
        // Route models
        routes::workspaces::CreateWorkspacePayload,
        routes::workspaces::UpdateWorkspacePayload,
        routes::products::CreateProductPayload,
        routes::products::UpdateProductPayload,
        routes::health::PingResponse,
        routes::version::VersionBody,
        // Common models
        pagination::PaginationMeta,
        pagination::PaginationOptions,
        types::DeletionResult,
        error::ExceptionResult,
    )),
    tags(
        (name = "workspaces"),
        (name = "products"),
        (name = "app"),
    )
)]
pub struct ApiDoc;
