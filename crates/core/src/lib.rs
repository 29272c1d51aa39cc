//! Domain logic shared by the OSM Tasking Manager crates.
//!
//! Nothing in here touches the network or the database: the geometry
//! parser, the tiler and the form validation rules are pure functions so
//! they can be unit tested in isolation.

pub mod error;
pub mod geometry;
pub mod jobs;
pub mod terms;
pub mod tiling;
pub mod types;
pub mod users;
