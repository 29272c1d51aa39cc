//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod job_repo;
pub mod tile_repo;
pub mod user_repo;

pub use job_repo::JobRepo;
pub use tile_repo::TileRepo;
pub use user_repo::UserRepo;
