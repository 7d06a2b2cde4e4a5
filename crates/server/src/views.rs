//! JSON shapes returned by the HTTP API.
//!
//! Services keep the legacy document layout the web UI consumes
//! (`_id`, `_rev`, `ports`, `parent`, `metadata`).

use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use models::service;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct MetadataView {
    /// epoch milliseconds
    pub create_time: i64,
    /// epoch milliseconds
    pub update_time: i64,
    pub creator: String,
    pub owner: String,
    pub update_user: String,
    pub update_action: i32,
    pub update_controller_action: String,
    pub command_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceView {
    pub id: Uuid,
    #[serde(rename = "_id")]
    pub legacy_id: Uuid,
    #[serde(rename = "_rev")]
    pub rev: String,
    pub name: String,
    pub description: String,
    pub owned: bool,
    pub owner: String,
    pub ports: Vec<i32>,
    pub protocol: String,
    pub status: String,
    pub version: String,
    /// Credentials are not tracked; always 0.
    pub credentials: u32,
    /// Host id
    pub parent: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    pub metadata: MetadataView,
}

impl From<&service::Model> for ServiceView {
    fn from(m: &service::Model) -> Self {
        Self {
            id: m.id,
            legacy_id: m.id,
            rev: String::new(),
            name: m.name.clone(),
            description: m.description.clone(),
            owned: m.owned,
            owner: m.owner.clone(),
            ports: vec![m.port],
            protocol: m.protocol.clone(),
            status: m.status.clone(),
            version: m.version.clone(),
            credentials: 0,
            parent: m.host_id,
            kind: "Service".to_string(),
            metadata: MetadataView {
                create_time: m.created_at.timestamp_millis(),
                update_time: m.updated_at.timestamp_millis(),
                creator: m.creator.clone(),
                owner: m.owner.clone(),
                update_user: m.update_user.clone(),
                update_action: m.update_action,
                update_controller_action: m.update_controller_action.clone(),
                command_id: m.command_id,
            },
        }
    }
}

/// Row of the list endpoint: `{id, key, value}`.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceListEntry {
    pub id: Uuid,
    pub key: Uuid,
    pub value: ServiceView,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ServiceList {
    pub services: Vec<ServiceListEntry>,
}

impl ServiceList {
    pub fn from_models(rows: &[service::Model]) -> Self {
        let services = rows
            .iter()
            .map(|m| ServiceListEntry { id: m.id, key: m.id, value: ServiceView::from(m) })
            .collect();
        Self { services }
    }
}
