use thiserror::Error;
use uuid::Uuid;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// Parent host is missing or lives in another workspace.
    #[error("Host with id {0} not found")]
    InvalidParent(Uuid),
    /// Attempt to change a field fixed at creation.
    #[error("Can't change service {0}.")]
    ImmutableField(&'static str),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Rejections caused by the request itself, as opposed to storage failures.
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ServiceError::Db(_))
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Conflict(msg) => ServiceError::Conflict(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

impl From<sea_orm::DbErr> for ServiceError {
    fn from(e: sea_orm::DbErr) -> Self { ModelError::from(e).into() }
}
