//! Wire-level inputs accepted by the service layer.

use serde::Deserialize;
use uuid::Uuid;

/// Create/update body for a network service.
///
/// Accepts both the compact create form
/// (`{name, description, owned, ports, protocol, status, parent}`) and the
/// full object the web UI sends back on update (`_id`, `_rev`, `type`,
/// `metadata`, ...). Unknown keys are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServicePayload {
    pub id: Option<Uuid>,
    #[serde(rename = "_id")]
    pub legacy_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub owned: Option<bool>,
    pub owner: Option<String>,
    pub ports: Option<Vec<i64>>,
    pub protocol: Option<String>,
    pub status: Option<String>,
    pub version: Option<String>,
    /// Host id
    pub parent: Option<Uuid>,
    pub metadata: Option<MetadataPayload>,
}

impl ServicePayload {
    /// Id carried by the body, if any (`id` wins over `_id`).
    pub fn claimed_id(&self) -> Option<Uuid> { self.id.or(self.legacy_id) }
}

/// Audit block. `create_time`/`update_time` are server-controlled and ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MetadataPayload {
    pub creator: Option<String>,
    pub owner: Option<String>,
    pub update_user: Option<String>,
    pub update_action: Option<i32>,
    pub update_controller_action: Option<String>,
    pub command_id: Option<i64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WorkspaceInput {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HostInput {
    pub ip: String,
    #[serde(default)]
    pub os: String,
    #[serde(default)]
    pub description: String,
}
