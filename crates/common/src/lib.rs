//! Shared building blocks for the inventory crates: health payload,
//! pagination parameters and tracing setup.

pub mod types;
pub mod utils;
pub mod pagination;
