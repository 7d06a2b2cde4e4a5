use std::fmt;

use sea_orm::{entity::prelude::*, Set, DatabaseConnection, QueryFilter};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, host, workspace};

/// A network service observed on a host. `host_id` is fixed at creation and
/// `workspace_id` always equals the host's workspace.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub host_id: Uuid,
    pub name: String,
    pub port: i32,
    pub protocol: String,
    pub status: String,
    pub description: String,
    pub owned: bool,
    pub owner: String,
    pub version: String,
    pub creator: String,
    pub update_user: String,
    pub update_action: i32,
    pub update_controller_action: String,
    pub command_id: Option<i64>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Host, Workspace }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Host => Entity::belongs_to(host::Entity)
                .from(Column::HostId)
                .to(host::Column::Id)
                .into(),
            Relation::Workspace => Entity::belongs_to(workspace::Entity)
                .from(Column::WorkspaceId)
                .to(workspace::Column::Id)
                .into(),
        }
    }
}

impl Related<host::Entity> for Entity {
    fn to() -> RelationDef { Relation::Host.def() }
}

impl Related<workspace::Entity> for Entity {
    fn to() -> RelationDef { Relation::Workspace.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceStatus {
    Open,
    Closed,
    Filtered,
}

impl ServiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceStatus::Open => "open",
            ServiceStatus::Closed => "closed",
            ServiceStatus::Filtered => "filtered",
        }
    }

    pub fn parse(raw: &str) -> Result<Self, errors::ModelError> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "open" => Ok(ServiceStatus::Open),
            "closed" => Ok(ServiceStatus::Closed),
            "filtered" => Ok(ServiceStatus::Filtered),
            other => Err(errors::ModelError::Validation(format!(
                "invalid status `{other}` (expected open, closed or filtered)"
            ))),
        }
    }
}

impl fmt::Display for ServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() {
        return Err(errors::ModelError::Validation("name required".into()));
    }
    Ok(())
}

pub fn validate_protocol(protocol: &str) -> Result<(), errors::ModelError> {
    if protocol.trim().is_empty() {
        return Err(errors::ModelError::Validation("protocol required".into()));
    }
    Ok(())
}

/// The wire form carries a list of ports; the first one is the service port.
pub fn port_from_list(ports: &[i64]) -> Result<i32, errors::ModelError> {
    let first = ports
        .first()
        .ok_or_else(|| errors::ModelError::Validation("ports must contain at least one port".into()))?;
    if !(0..=65535).contains(first) {
        return Err(errors::ModelError::Validation(format!("invalid port {first} (expected 0..=65535)")));
    }
    Ok(*first as i32)
}

/// Fully validated creation request bound to a workspace and a host.
#[derive(Clone, Debug, PartialEq)]
pub struct NewService {
    pub workspace_id: Uuid,
    pub host_id: Uuid,
    pub name: String,
    pub port: i32,
    pub protocol: String,
    pub status: ServiceStatus,
    pub description: String,
    pub owned: bool,
    pub owner: String,
    pub version: String,
    pub creator: String,
    pub command_id: Option<i64>,
}

impl NewService {
    /// Materialize the row that will be stored, with fresh id and timestamps.
    pub fn into_model(self) -> Model {
        let now = Utc::now().into();
        Model {
            id: Uuid::new_v4(),
            workspace_id: self.workspace_id,
            host_id: self.host_id,
            name: self.name,
            port: self.port,
            protocol: self.protocol,
            status: self.status.as_str().to_string(),
            description: self.description,
            owned: self.owned,
            update_user: self.owner.clone(),
            owner: self.owner,
            version: self.version,
            creator: self.creator,
            update_action: 0,
            update_controller_action: String::new(),
            command_id: self.command_id,
            created_at: now,
            updated_at: now,
        }
    }
}

pub async fn create(db: &DatabaseConnection, new: NewService) -> Result<Model, errors::ModelError> {
    let m = new.into_model();
    let am = ActiveModel {
        id: Set(m.id),
        workspace_id: Set(m.workspace_id),
        host_id: Set(m.host_id),
        name: Set(m.name),
        port: Set(m.port),
        protocol: Set(m.protocol),
        status: Set(m.status),
        description: Set(m.description),
        owned: Set(m.owned),
        owner: Set(m.owner),
        version: Set(m.version),
        creator: Set(m.creator),
        update_user: Set(m.update_user),
        update_action: Set(m.update_action),
        update_controller_action: Set(m.update_controller_action),
        command_id: Set(m.command_id),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    Ok(am.insert(db).await?)
}

/// Write back the mutable columns of `updated`. `id`, `workspace_id`,
/// `host_id` and `created_at` are never touched.
pub async fn save_mutable_fields(db: &DatabaseConnection, updated: &Model) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = Entity::find_by_id(updated.id)
        .filter(Column::WorkspaceId.eq(updated.workspace_id))
        .one(db)
        .await
        .map_err(errors::ModelError::from)?
    else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.name = Set(updated.name.clone());
    am.port = Set(updated.port);
    am.protocol = Set(updated.protocol.clone());
    am.status = Set(updated.status.clone());
    am.description = Set(updated.description.clone());
    am.owned = Set(updated.owned);
    am.owner = Set(updated.owner.clone());
    am.version = Set(updated.version.clone());
    am.creator = Set(updated.creator.clone());
    am.update_user = Set(updated.update_user.clone());
    am.update_action = Set(updated.update_action);
    am.update_controller_action = Set(updated.update_controller_action.clone());
    am.command_id = Set(updated.command_id);
    am.updated_at = Set(updated.updated_at);
    let saved = am.update(db).await.map_err(errors::ModelError::from)?;
    Ok(Some(saved))
}
