use std::sync::Arc;

use tracing::{info, instrument};

use models::workspace;

use crate::errors::ServiceError;
use crate::repository::InventoryRepository;

/// Workspace lookup and creation.
pub struct WorkspaceService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: InventoryRepository + ?Sized> WorkspaceService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self))]
    pub async fn create(&self, name: &str) -> Result<workspace::Model, ServiceError> {
        workspace::validate_name(name)?;
        let created = self.repo.create_workspace(name).await?;
        info!(workspace_id = %created.id, "workspace_created");
        Ok(created)
    }

    pub async fn list(&self) -> Result<Vec<workspace::Model>, ServiceError> {
        self.repo.list_workspaces().await
    }

    /// Resolve the workspace named in a request path.
    pub async fn resolve(&self, name: &str) -> Result<workspace::Model, ServiceError> {
        self.repo
            .find_workspace_by_name(name)
            .await?
            .ok_or_else(|| ServiceError::not_found("workspace"))
    }
}
