//! Route definitions for jobs and their tiles.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{jobs, tiles};
use crate::state::AppState;

/// ```text
/// POST /job/new                          -> job_new
/// GET  /job/{job}                        -> job
/// POST /job/{job}/tile/{x}/{y}/checkin   -> checkin
/// POST /job/{job}/tile/{x}/{y}/release   -> release
/// ```
///
/// `/job/new` is a static segment, so it wins over `/job/{job}` regardless
/// of registration order.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/job/new", post(jobs::job_new))
        .route("/job/{job}", get(jobs::job))
        .route("/job/{job}/tile/{x}/{y}/checkin", post(tiles::checkin))
        .route("/job/{job}/tile/{x}/{y}/release", post(tiles::release))
}
