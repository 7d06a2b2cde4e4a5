use std::sync::Arc;

use common::pagination::Pagination;
use tracing::{info, instrument};
use uuid::Uuid;

use models::{service, workspace};

use crate::domain::ServicePayload;
use crate::errors::ServiceError;
use crate::repository::InventoryRepository;
use crate::validator::ServiceMutationValidator;

/// Use cases for network services inside one workspace.
/// Mutations are validate-then-write: a rejected request never reaches the repository.
pub struct ServiceCatalog<R: ?Sized> {
    repo: Arc<R>,
    validator: ServiceMutationValidator<R>,
}

impl<R: InventoryRepository + ?Sized> ServiceCatalog<R> {
    pub fn new(repo: Arc<R>) -> Self {
        let validator = ServiceMutationValidator::new(Arc::clone(&repo));
        Self { repo, validator }
    }

    /// Every service of the workspace unless `page` is given.
    pub async fn list(&self, workspace: &workspace::Model, page: Option<Pagination>) -> Result<Vec<service::Model>, ServiceError> {
        self.repo.list_services(workspace.id, page).await
    }

    pub async fn get(&self, workspace: &workspace::Model, id: Uuid) -> Result<service::Model, ServiceError> {
        self.repo
            .get_service(workspace.id, id)
            .await?
            .ok_or_else(|| ServiceError::not_found("service"))
    }

    #[instrument(skip(self, workspace, payload), fields(workspace = %workspace.name))]
    pub async fn create(&self, workspace: &workspace::Model, payload: &ServicePayload) -> Result<service::Model, ServiceError> {
        let new = self.validator.validate_create(payload, workspace).await?;
        if self.repo.find_service_on_host(new.host_id, new.port, &new.protocol).await?.is_some() {
            return Err(ServiceError::Conflict(format!(
                "service {}/{} already exists on host {}",
                new.port, new.protocol, new.host_id
            )));
        }
        let created = self.repo.insert_service(new).await?;
        info!(service_id = %created.id, host_id = %created.host_id, port = created.port, "service_created");
        Ok(created)
    }

    #[instrument(skip(self, workspace, payload), fields(workspace = %workspace.name))]
    pub async fn update(&self, workspace: &workspace::Model, id: Uuid, payload: &ServicePayload) -> Result<service::Model, ServiceError> {
        let existing = self.get(workspace, id).await?;
        let updated = self.validator.validate_update(&existing, payload)?;
        if updated.port != existing.port || updated.protocol != existing.protocol {
            if let Some(clash) = self.repo.find_service_on_host(updated.host_id, updated.port, &updated.protocol).await? {
                if clash.id != updated.id {
                    return Err(ServiceError::Conflict(format!(
                        "service {}/{} already exists on host {}",
                        updated.port, updated.protocol, updated.host_id
                    )));
                }
            }
        }
        let saved = self
            .repo
            .update_service(&updated)
            .await?
            .ok_or_else(|| ServiceError::not_found("service"))?;
        info!(service_id = %saved.id, status = %saved.status, port = saved.port, "service_updated");
        Ok(saved)
    }

    #[instrument(skip(self, workspace), fields(workspace = %workspace.name))]
    pub async fn delete(&self, workspace: &workspace::Model, id: Uuid) -> Result<(), ServiceError> {
        if !self.repo.delete_service(workspace.id, id).await? {
            return Err(ServiceError::not_found("service"));
        }
        info!(service_id = %id, "service_deleted");
        Ok(())
    }
}
