use axum::{extract::{rejection::JsonRejection, Path, State}, http::StatusCode, Json};
use models::host;
use service::domain::HostInput;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/workspace/{ws}/hosts", tag = "hosts",
    params(("ws" = String, Path, description = "Workspace name")),
    responses(
        (status = 200, description = "List OK"),
        (status = 404, description = "Unknown workspace")
    )
)]
pub async fn list(State(state): State<ServerState>, Path(ws): Path<String>) -> Result<Json<Vec<host::Model>>, JsonApiError> {
    let workspace = state.workspaces.resolve(&ws).await?;
    Ok(Json(state.hosts.list(&workspace).await?))
}

#[utoipa::path(
    post, path = "/workspace/{ws}/hosts", tag = "hosts",
    params(("ws" = String, Path, description = "Workspace name")),
    request_body = crate::openapi::HostInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 404, description = "Unknown workspace")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    Path(ws): Path<String>,
    input: Result<Json<HostInput>, JsonRejection>,
) -> Result<(StatusCode, Json<host::Model>), JsonApiError> {
    let Json(input) = input?;
    let workspace = state.workspaces.resolve(&ws).await?;
    let created = state.hosts.create(&workspace, &input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
