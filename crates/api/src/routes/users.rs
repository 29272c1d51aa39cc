//! Route definitions for user administration.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// ```text
/// GET  /users                    -> users
/// GET  /user/{username}          -> user
/// POST /user/{username}/update   -> user_update
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/users", get(users::users))
        .route("/user/{username}", get(users::user))
        .route("/user/{username}/update", post(users::user_update))
}
