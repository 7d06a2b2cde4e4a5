//! Service layer for the workspace-scoped inventory.
//! - `validator` holds the create/update rules for network services.
//! - `repository` abstracts persistence (SeaORM or in-memory).
//! - `*_service` / `service_catalog` are the use cases called by the HTTP layer.

pub mod errors;
pub mod domain;
pub mod repository;
pub mod validator;
pub mod workspace_service;
pub mod host_service;
pub mod service_catalog;
#[cfg(test)]
pub mod test_support;
