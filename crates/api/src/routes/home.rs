use axum::routing::get;
use axum::Router;

use crate::handlers::home;
use crate::state::AppState;

/// Landing pages, open to anonymous callers.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home::home))
        .route("/about", get(home::about))
}
