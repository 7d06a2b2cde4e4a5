//! Workspace-consistency rules applied before a service is persisted.
//!
//! Creation binds the new service to the request's workspace and to a host of
//! that same workspace. Updates may touch every descriptive field but never the
//! service id or its parent host.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, instrument};

use models::service::{self, port_from_list, NewService, ServiceStatus};
use models::workspace;

use crate::domain::ServicePayload;
use crate::errors::ServiceError;
use crate::repository::InventoryRepository;

pub struct ServiceMutationValidator<R: ?Sized> {
    repo: Arc<R>,
}

impl<R: InventoryRepository + ?Sized> ServiceMutationValidator<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Resolve `payload.parent` and build a creation request bound to
    /// `workspace`. A host that is missing or owned by another workspace is
    /// reported the same way, so ids from other workspaces are not disclosed.
    #[instrument(skip(self, payload, workspace), fields(workspace = %workspace.name, parent = ?payload.parent))]
    pub async fn validate_create(&self, payload: &ServicePayload, workspace: &workspace::Model) -> Result<NewService, ServiceError> {
        let parent = payload
            .parent
            .ok_or_else(|| ServiceError::Validation("parent is required".into()))?;
        let host = match self.repo.get_host(parent).await? {
            Some(h) if h.workspace_id == workspace.id => h,
            Some(h) => {
                debug!(host_workspace = %h.workspace_id, "parent host belongs to another workspace");
                return Err(ServiceError::InvalidParent(parent));
            }
            None => return Err(ServiceError::InvalidParent(parent)),
        };

        let name = payload.name.as_deref().unwrap_or_default();
        service::validate_name(name)?;
        let port = port_from_list(payload.ports.as_deref().unwrap_or_default())?;
        let protocol = payload.protocol.as_deref().unwrap_or_default();
        service::validate_protocol(protocol)?;
        let status = match payload.status.as_deref() {
            Some(raw) => ServiceStatus::parse(raw)?,
            None => ServiceStatus::Open,
        };
        let meta = payload.metadata.clone().unwrap_or_default();

        Ok(NewService {
            workspace_id: workspace.id,
            host_id: host.id,
            name: name.trim().to_string(),
            port,
            protocol: normalize_protocol(protocol),
            status,
            description: payload.description.clone().unwrap_or_default(),
            owned: payload.owned.unwrap_or(false),
            owner: payload.owner.clone().or(meta.owner).unwrap_or_default(),
            version: payload.version.clone().unwrap_or_default(),
            creator: meta.creator.unwrap_or_default(),
            command_id: meta.command_id,
        })
    }

    /// Apply `payload` on top of `existing` and return the record to store.
    /// `existing` is not modified; on error nothing has been written anywhere.
    #[instrument(skip(self, existing, payload), fields(service_id = %existing.id))]
    pub fn validate_update(&self, existing: &service::Model, payload: &ServicePayload) -> Result<service::Model, ServiceError> {
        if let Some(parent) = payload.parent {
            if parent != existing.host_id {
                return Err(ServiceError::ImmutableField("parent"));
            }
        }
        if let Some(claimed) = payload.claimed_id() {
            if claimed != existing.id {
                debug!(%claimed, "ignoring id in update body");
            }
        }

        let mut updated = existing.clone();
        if let Some(name) = payload.name.as_deref() {
            service::validate_name(name)?;
            updated.name = name.trim().to_string();
        }
        if let Some(ports) = payload.ports.as_deref() {
            updated.port = port_from_list(ports)?;
        }
        if let Some(protocol) = payload.protocol.as_deref() {
            service::validate_protocol(protocol)?;
            updated.protocol = normalize_protocol(protocol);
        }
        if let Some(status) = payload.status.as_deref() {
            updated.status = ServiceStatus::parse(status)?.as_str().to_string();
        }
        if let Some(description) = &payload.description {
            updated.description = description.clone();
        }
        if let Some(owned) = payload.owned {
            updated.owned = owned;
        }
        if let Some(owner) = &payload.owner {
            updated.owner = owner.clone();
        }
        if let Some(version) = &payload.version {
            updated.version = version.clone();
        }
        // creator 与 metadata.owner 创建后不可变；command_id 为 null 时保留原值
        if let Some(meta) = &payload.metadata {
            if let Some(user) = &meta.update_user {
                updated.update_user = user.clone();
            }
            if let Some(action) = meta.update_action {
                updated.update_action = action;
            }
            if let Some(controller_action) = &meta.update_controller_action {
                updated.update_controller_action = controller_action.clone();
            }
            if meta.command_id.is_some() {
                updated.command_id = meta.command_id;
            }
        }
        updated.updated_at = Utc::now().into();
        Ok(updated)
    }
}

fn normalize_protocol(raw: &str) -> String { raw.trim().to_ascii_lowercase() }
