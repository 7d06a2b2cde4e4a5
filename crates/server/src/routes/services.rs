use axum::{extract::{rejection::JsonRejection, Path, Query, State}, http::StatusCode, Json};
use common::pagination::PageQuery;
use service::domain::ServicePayload;
use tracing::info;
use uuid::Uuid;

use crate::{
    errors::JsonApiError,
    state::ServerState,
    views::{ServiceList, ServiceView},
};

#[utoipa::path(
    get, path = "/workspace/{ws}/services", tag = "services",
    params(
        ("ws" = String, Path, description = "Workspace name"),
        ("page" = Option<u32>, Query, description = "1-based page; omit both paging parameters to list every service"),
        ("per_page" = Option<u32>, Query, description = "Page size (max 500)")
    ),
    responses(
        (status = 200, description = "List OK", body = ServiceList),
        (status = 404, description = "Unknown workspace")
    )
)]
pub async fn list(
    State(state): State<ServerState>,
    Path(ws): Path<String>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ServiceList>, JsonApiError> {
    let workspace = state.workspaces.resolve(&ws).await?;
    let rows = state.services.list(&workspace, query.pagination()).await?;
    info!(workspace = %workspace.name, count = rows.len(), "list services");
    Ok(Json(ServiceList::from_models(&rows)))
}

#[utoipa::path(
    post, path = "/workspace/{ws}/services", tag = "services",
    params(("ws" = String, Path, description = "Workspace name")),
    request_body = crate::openapi::CreateServiceDoc,
    responses(
        (status = 201, description = "Created", body = ServiceView),
        (status = 400, description = "Invalid payload or parent host not in workspace"),
        (status = 404, description = "Unknown workspace"),
        (status = 409, description = "Port/protocol already used on host")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Path(ws): Path<String>,
    payload: Result<Json<ServicePayload>, JsonRejection>,
) -> Result<(StatusCode, Json<ServiceView>), JsonApiError> {
    let Json(payload) = payload?;
    let workspace = state.workspaces.resolve(&ws).await?;
    let created = state.services.create(&workspace, &payload).await?;
    Ok((StatusCode::CREATED, Json(ServiceView::from(&created))))
}

#[utoipa::path(
    get, path = "/workspace/{ws}/services/{id}", tag = "services",
    params(
        ("ws" = String, Path, description = "Workspace name"),
        ("id" = Uuid, Path, description = "Service ID")
    ),
    responses(
        (status = 200, description = "OK", body = ServiceView),
        (status = 404, description = "Not Found")
    )
)]
pub async fn get(
    State(state): State<ServerState>,
    Path((ws, id)): Path<(String, Uuid)>,
) -> Result<Json<ServiceView>, JsonApiError> {
    let workspace = state.workspaces.resolve(&ws).await?;
    let found = state.services.get(&workspace, id).await?;
    Ok(Json(ServiceView::from(&found)))
}

#[utoipa::path(
    put, path = "/workspace/{ws}/services/{id}", tag = "services",
    params(
        ("ws" = String, Path, description = "Workspace name"),
        ("id" = Uuid, Path, description = "Service ID")
    ),
    request_body = crate::openapi::UpdateServiceDoc,
    responses(
        (status = 200, description = "Updated", body = ServiceView),
        (status = 400, description = "Invalid payload or parent change"),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Port/protocol already used on host")
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    Path((ws, id)): Path<(String, Uuid)>,
    payload: Result<Json<ServicePayload>, JsonRejection>,
) -> Result<Json<ServiceView>, JsonApiError> {
    let Json(payload) = payload?;
    let workspace = state.workspaces.resolve(&ws).await?;
    let saved = state.services.update(&workspace, id, &payload).await?;
    Ok(Json(ServiceView::from(&saved)))
}

#[utoipa::path(
    delete, path = "/workspace/{ws}/services/{id}", tag = "services",
    params(
        ("ws" = String, Path, description = "Workspace name"),
        ("id" = Uuid, Path, description = "Service ID")
    ),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "Not Found")
    )
)]
pub async fn delete(
    State(state): State<ServerState>,
    Path((ws, id)): Path<(String, Uuid)>,
) -> Result<StatusCode, JsonApiError> {
    let workspace = state.workspaces.resolve(&ws).await?;
    state.services.delete(&workspace, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
