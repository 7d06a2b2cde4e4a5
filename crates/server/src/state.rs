use std::sync::Arc;

use service::host_service::HostService;
use service::repository::InventoryRepository;
use service::service_catalog::ServiceCatalog;
use service::workspace_service::WorkspaceService;

pub type DynRepository = dyn InventoryRepository;

/// Shared handler state; the storage backend is chosen at startup.
#[derive(Clone)]
pub struct ServerState {
    pub workspaces: Arc<WorkspaceService<DynRepository>>,
    pub hosts: Arc<HostService<DynRepository>>,
    pub services: Arc<ServiceCatalog<DynRepository>>,
}

impl ServerState {
    pub fn new(repo: Arc<DynRepository>) -> Self {
        Self {
            workspaces: Arc::new(WorkspaceService::new(Arc::clone(&repo))),
            hosts: Arc::new(HostService::new(Arc::clone(&repo))),
            services: Arc::new(ServiceCatalog::new(repo)),
        }
    }
}
