use sea_orm::{entity::prelude::*, Set, DatabaseConnection};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "workspace")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub name: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef { match *self {} }
}

impl ActiveModelBehavior for ActiveModel {}

/// Workspace names appear in URLs: letters, digits, `_` and `-`, starting
/// with a letter or digit, at most 128 characters.
pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    let mut chars = name.chars();
    let first_ok = chars.next().map(|c| c.is_ascii_alphanumeric()).unwrap_or(false);
    if !first_ok {
        return Err(errors::ModelError::Validation("workspace name must start with a letter or digit".into()));
    }
    if name.len() > 128 {
        return Err(errors::ModelError::Validation("workspace name too long (max 128)".into()));
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(errors::ModelError::Validation("workspace name may only contain letters, digits, '_' and '-'".into()));
    }
    Ok(())
}

/// Build an unsaved workspace row.
pub fn new_model(name: &str) -> Result<Model, errors::ModelError> {
    validate_name(name)?;
    Ok(Model { id: Uuid::new_v4(), name: name.to_string(), created_at: Utc::now().into() })
}

pub async fn create(db: &DatabaseConnection, name: &str) -> Result<Model, errors::ModelError> {
    let m = new_model(name)?;
    let am = ActiveModel {
        id: Set(m.id),
        name: Set(m.name),
        created_at: Set(m.created_at),
    };
    Ok(am.insert(db).await?)
}
