//! Process-local repository used by tests and the `memory` storage backend.

use std::collections::HashMap;

use async_trait::async_trait;
use common::pagination::Pagination;
use tokio::sync::RwLock;
use uuid::Uuid;

use models::{host, service, workspace};

use super::InventoryRepository;
use crate::errors::ServiceError;

#[derive(Default)]
struct Tables {
    workspaces: HashMap<Uuid, workspace::Model>,
    hosts: HashMap<Uuid, host::Model>,
    services: HashMap<Uuid, service::Model>,
}

impl Tables {
    /// Same rule as `uniq_service_host_port_protocol`; `except` is the row being updated.
    fn ensure_port_free(&self, host_id: Uuid, port: i32, protocol: &str, except: Option<Uuid>) -> Result<(), ServiceError> {
        let taken = self
            .services
            .values()
            .any(|s| s.host_id == host_id && s.port == port && s.protocol == protocol && Some(s.id) != except);
        if taken {
            return Err(ServiceError::Conflict(format!("service {}/{} already exists on host {}", port, protocol, host_id)));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryInventoryRepository {
    tables: RwLock<Tables>,
}

impl MemoryInventoryRepository {
    pub fn new() -> Self { Self::default() }
}

#[async_trait]
impl InventoryRepository for MemoryInventoryRepository {
    async fn find_workspace_by_name(&self, name: &str) -> Result<Option<workspace::Model>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.workspaces.values().find(|w| w.name == name).cloned())
    }

    async fn create_workspace(&self, name: &str) -> Result<workspace::Model, ServiceError> {
        let ws = workspace::new_model(name)?;
        let mut t = self.tables.write().await;
        if t.workspaces.values().any(|w| w.name == ws.name) {
            return Err(ServiceError::Conflict(format!("workspace `{}` already exists", name)));
        }
        t.workspaces.insert(ws.id, ws.clone());
        Ok(ws)
    }

    async fn list_workspaces(&self) -> Result<Vec<workspace::Model>, ServiceError> {
        let t = self.tables.read().await;
        let mut out: Vec<_> = t.workspaces.values().cloned().collect();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn get_host(&self, id: Uuid) -> Result<Option<host::Model>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.hosts.get(&id).cloned())
    }

    async fn create_host(&self, workspace_id: Uuid, ip: &str, os: &str, description: &str) -> Result<host::Model, ServiceError> {
        let h = host::new_model(workspace_id, ip, os, description)?;
        let mut t = self.tables.write().await;
        // mirrors fk_host_workspace
        if !t.workspaces.contains_key(&workspace_id) {
            return Err(ServiceError::not_found("workspace"));
        }
        t.hosts.insert(h.id, h.clone());
        Ok(h)
    }

    async fn list_hosts(&self, workspace_id: Uuid) -> Result<Vec<host::Model>, ServiceError> {
        let t = self.tables.read().await;
        let mut out: Vec<_> = t.hosts.values().filter(|h| h.workspace_id == workspace_id).cloned().collect();
        out.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        Ok(out)
    }

    async fn list_services(&self, workspace_id: Uuid, page: Option<Pagination>) -> Result<Vec<service::Model>, ServiceError> {
        let t = self.tables.read().await;
        let mut rows: Vec<_> = t.services.values().filter(|s| s.workspace_id == workspace_id).cloned().collect();
        rows.sort_by(|a, b| a.created_at.cmp(&b.created_at).then(a.id.cmp(&b.id)));
        let Some(page) = page else { return Ok(rows) };
        let (_, per_page) = page.normalize();
        Ok(rows.into_iter().skip(page.offset()).take(per_page as usize).collect())
    }

    async fn get_service(&self, workspace_id: Uuid, id: Uuid) -> Result<Option<service::Model>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.services.get(&id).filter(|s| s.workspace_id == workspace_id).cloned())
    }

    async fn find_service_on_host(&self, host_id: Uuid, port: i32, protocol: &str) -> Result<Option<service::Model>, ServiceError> {
        let t = self.tables.read().await;
        Ok(t.services
            .values()
            .find(|s| s.host_id == host_id && s.port == port && s.protocol == protocol)
            .cloned())
    }

    async fn insert_service(&self, new: service::NewService) -> Result<service::Model, ServiceError> {
        let mut t = self.tables.write().await;
        if !t.hosts.contains_key(&new.host_id) {
            return Err(ServiceError::not_found("host"));
        }
        t.ensure_port_free(new.host_id, new.port, &new.protocol, None)?;
        let m = new.into_model();
        t.services.insert(m.id, m.clone());
        Ok(m)
    }

    async fn update_service(&self, updated: &service::Model) -> Result<Option<service::Model>, ServiceError> {
        let mut t = self.tables.write().await;
        let Some(host_id) = t.services.get(&updated.id).filter(|s| s.workspace_id == updated.workspace_id).map(|s| s.host_id) else {
            return Ok(None);
        };
        t.ensure_port_free(host_id, updated.port, &updated.protocol, Some(updated.id))?;
        let Some(row) = t.services.get_mut(&updated.id).filter(|s| s.workspace_id == updated.workspace_id) else {
            return Ok(None);
        };
        row.name = updated.name.clone();
        row.port = updated.port;
        row.protocol = updated.protocol.clone();
        row.status = updated.status.clone();
        row.description = updated.description.clone();
        row.owned = updated.owned;
        row.owner = updated.owner.clone();
        row.version = updated.version.clone();
        row.creator = updated.creator.clone();
        row.update_user = updated.update_user.clone();
        row.update_action = updated.update_action;
        row.update_controller_action = updated.update_controller_action.clone();
        row.command_id = updated.command_id;
        row.updated_at = updated.updated_at;
        Ok(Some(row.clone()))
    }

    async fn delete_service(&self, workspace_id: Uuid, id: Uuid) -> Result<bool, ServiceError> {
        let mut t = self.tables.write().await;
        let owned = t.services.get(&id).map(|s| s.workspace_id == workspace_id).unwrap_or(false);
        if owned {
            t.services.remove(&id);
        }
        Ok(owned)
    }
}
