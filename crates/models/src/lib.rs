//! SeaORM entities for the inventory: workspaces, hosts and the network
//! services found on them, plus field-level validation shared by every
//! storage backend.

pub mod errors;
pub mod db;
pub mod workspace;
pub mod host;
pub mod service;

#[cfg(test)]
mod tests;
