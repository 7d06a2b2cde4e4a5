use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::views::{MetadataView, ServiceList, ServiceListEntry, ServiceView};

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct WorkspaceInputDoc { pub name: String }

#[derive(ToSchema)]
pub struct HostInputDoc { pub ip: String, pub os: Option<String>, pub description: Option<String> }

#[derive(ToSchema)]
pub struct CreateServiceDoc {
    pub name: String,
    pub description: Option<String>,
    pub owned: Option<bool>,
    pub owner: Option<String>,
    pub ports: Vec<i64>,
    pub protocol: String,
    /// open | closed | filtered (default open)
    pub status: Option<String>,
    pub version: Option<String>,
    /// Host id; the host must belong to the workspace in the path
    pub parent: Uuid,
}

/// Any subset of the service object; `parent` must equal the current host
/// and `id`/`_id` are ignored.
#[derive(ToSchema)]
pub struct UpdateServiceDoc {
    pub name: Option<String>,
    pub description: Option<String>,
    pub owned: Option<bool>,
    pub owner: Option<String>,
    pub ports: Option<Vec<i64>>,
    pub protocol: Option<String>,
    pub status: Option<String>,
    pub version: Option<String>,
    pub parent: Option<Uuid>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::workspaces::list,
        crate::routes::workspaces::create,
        crate::routes::hosts::list,
        crate::routes::hosts::create,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::get,
        crate::routes::services::update,
        crate::routes::services::delete,
    ),
    components(
        schemas(
            HealthResponse,
            WorkspaceInputDoc,
            HostInputDoc,
            CreateServiceDoc,
            UpdateServiceDoc,
            MetadataView,
            ServiceView,
            ServiceListEntry,
            ServiceList,
        )
    ),
    tags(
        (name = "health"),
        (name = "workspaces"),
        (name = "hosts"),
        (name = "services")
    )
)]
pub struct ApiDoc;
