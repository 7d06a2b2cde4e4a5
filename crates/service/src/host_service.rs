use std::sync::Arc;

use tracing::{info, instrument};

use models::{host, workspace};

use crate::domain::HostInput;
use crate::errors::ServiceError;
use crate::repository::InventoryRepository;

/// Hosts are the parents services attach to; they never change workspace.
pub struct HostService<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: InventoryRepository + ?Sized> HostService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, workspace, input), fields(workspace = %workspace.name, ip = %input.ip))]
    pub async fn create(&self, workspace: &workspace::Model, input: &HostInput) -> Result<host::Model, ServiceError> {
        host::validate_ip(&input.ip)?;
        let created = self.repo.create_host(workspace.id, &input.ip, &input.os, &input.description).await?;
        info!(host_id = %created.id, "host_created");
        Ok(created)
    }

    pub async fn list(&self, workspace: &workspace::Model) -> Result<Vec<host::Model>, ServiceError> {
        self.repo.list_hosts(workspace.id).await
    }
}
