//! Entity models and DTOs, one module per table.

pub mod job;
pub mod tile;
pub mod user;
