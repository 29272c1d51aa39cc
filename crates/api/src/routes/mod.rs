pub mod auth;
pub mod health;
pub mod home;
pub mod jobs;
pub mod profile;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the application route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                        home (any caller)
/// /about                                   about (any caller)
///
/// /auth/register                           register (public)
/// /auth/login                              login (public)
///
/// /job/new                                 create job (admin, form)
/// /job/{job}                               job with tiles (auth)
/// /job/{job}/tile/{x}/{y}/checkin          increment tile checkin (auth)
/// /job/{job}/tile/{x}/{y}/release          decrement tile checkin (auth)
///
/// /users                                   list users (admin)
/// /user/{username}                         user profile (admin)
/// /user/{username}/update                  set admin flag (admin, form)
///
/// /profile/nextview                        terms gate, get + submit (auth)
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .merge(home::router())
        .nest("/auth", auth::router())
        .merge(jobs::router())
        .merge(users::router())
        .nest("/profile", profile::router())
}
