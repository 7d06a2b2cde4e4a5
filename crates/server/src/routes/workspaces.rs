use axum::{extract::{rejection::JsonRejection, State}, http::StatusCode, Json};
use models::workspace;
use service::domain::WorkspaceInput;

use crate::{errors::JsonApiError, state::ServerState};

#[utoipa::path(
    get, path = "/workspaces", tag = "workspaces",
    responses((status = 200, description = "List OK"))
)]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<workspace::Model>>, JsonApiError> {
    Ok(Json(state.workspaces.list().await?))
}

#[utoipa::path(
    post, path = "/workspaces", tag = "workspaces",
    request_body = crate::openapi::WorkspaceInputDoc,
    responses(
        (status = 201, description = "Created"),
        (status = 400, description = "Validation Error"),
        (status = 409, description = "Name already taken")
    )
)]
pub async fn create(
    State(state): State<ServerState>,
    input: Result<Json<WorkspaceInput>, JsonRejection>,
) -> Result<(StatusCode, Json<workspace::Model>), JsonApiError> {
    let Json(input) = input?;
    let created = state.workspaces.create(&input.name).await?;
    Ok((StatusCode::CREATED, Json(created)))
}
