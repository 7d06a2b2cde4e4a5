//! Persistence port for workspaces, hosts and services.
//!
//! Every host/service query that takes a `workspace_id` must only ever see
//! rows of that workspace.

use async_trait::async_trait;
use common::pagination::Pagination;
use models::{host, service, workspace};
use uuid::Uuid;

use crate::errors::ServiceError;

pub mod memory;
pub mod seaorm;

pub use memory::MemoryInventoryRepository;
pub use seaorm::SeaOrmInventoryRepository;

#[async_trait]
pub trait InventoryRepository: Send + Sync {
    async fn find_workspace_by_name(&self, name: &str) -> Result<Option<workspace::Model>, ServiceError>;
    /// Fails with `Conflict` when the name is taken.
    async fn create_workspace(&self, name: &str) -> Result<workspace::Model, ServiceError>;
    async fn list_workspaces(&self) -> Result<Vec<workspace::Model>, ServiceError>;

    /// Unscoped lookup; callers compare `workspace_id` themselves.
    async fn get_host(&self, id: Uuid) -> Result<Option<host::Model>, ServiceError>;
    async fn create_host(&self, workspace_id: Uuid, ip: &str, os: &str, description: &str) -> Result<host::Model, ServiceError>;
    async fn list_hosts(&self, workspace_id: Uuid) -> Result<Vec<host::Model>, ServiceError>;

    /// Ordered by creation time. `None` returns every row of the workspace.
    async fn list_services(&self, workspace_id: Uuid, page: Option<Pagination>) -> Result<Vec<service::Model>, ServiceError>;
    async fn get_service(&self, workspace_id: Uuid, id: Uuid) -> Result<Option<service::Model>, ServiceError>;
    async fn find_service_on_host(&self, host_id: Uuid, port: i32, protocol: &str) -> Result<Option<service::Model>, ServiceError>;
    async fn insert_service(&self, new: service::NewService) -> Result<service::Model, ServiceError>;
    /// Writes the mutable columns only; `None` when the row is gone.
    async fn update_service(&self, updated: &service::Model) -> Result<Option<service::Model>, ServiceError>;
    async fn delete_service(&self, workspace_id: Uuid, id: Uuid) -> Result<bool, ServiceError>;
}
