use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{errors, workspace};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "host")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub workspace_id: Uuid,
    pub ip: String,
    pub os: String,
    pub description: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Workspace }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Workspace => Entity::belongs_to(workspace::Entity)
                .from(Column::WorkspaceId)
                .to(workspace::Column::Id)
                .into(),
        }
    }
}

impl Related<workspace::Entity> for Entity {
    fn to() -> RelationDef { Relation::Workspace.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_ip(ip: &str) -> Result<(), errors::ModelError> {
    if ip.trim().is_empty() {
        return Err(errors::ModelError::Validation("ip required".into()));
    }
    if ip.len() > 255 {
        return Err(errors::ModelError::Validation("ip too long (max 255)".into()));
    }
    Ok(())
}

/// Build an unsaved host row owned by `workspace_id`.
pub fn new_model(workspace_id: Uuid, ip: &str, os: &str, description: &str) -> Result<Model, errors::ModelError> {
    validate_ip(ip)?;
    let now = Utc::now().into();
    Ok(Model {
        id: Uuid::new_v4(),
        workspace_id,
        ip: ip.trim().to_string(),
        os: os.to_string(),
        description: description.to_string(),
        created_at: now,
        updated_at: now,
    })
}

pub async fn create(db: &DatabaseConnection, workspace_id: Uuid, ip: &str, os: &str, description: &str) -> Result<Model, errors::ModelError> {
    let m = new_model(workspace_id, ip, os, description)?;
    let am = ActiveModel {
        id: Set(m.id),
        workspace_id: Set(m.workspace_id),
        ip: Set(m.ip),
        os: Set(m.os),
        description: Set(m.description),
        created_at: Set(m.created_at),
        updated_at: Set(m.updated_at),
    };
    Ok(am.insert(db).await?)
}
