//! Handlers for user administration (`/users`, `/user/{username}`).
//!
//! Every page here is admin-only, including a user's own profile.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Form, Json};
use osmtm_core::error::CoreError;
use osmtm_core::users::is_valid_username;
use osmtm_db::models::user::{User, UserResponse};
use osmtm_db::repositories::UserRepo;
use serde::Deserialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::{require_admin, RequireAdmin};
use crate::response::{see_other, DataResponse};
use crate::state::AppState;

/// Profile update form. `admin` follows checkbox semantics: any value
/// (browsers send `on`) means checked, absence means unchecked.
#[derive(Debug, Default, Deserialize)]
pub struct UserUpdateForm {
    #[serde(default)]
    pub admin: Option<String>,
}

impl UserUpdateForm {
    pub fn admin_checked(&self) -> bool {
        self.admin.is_some()
    }
}

/// Change `target_username`'s admin flag on behalf of `actor`.
///
/// Fails with `Forbidden` when the actor is not an admin, whoever the
/// target is, and with `NotFound` for an unknown target.
pub async fn update_user_admin_flag(
    pool: &osmtm_db::DbPool,
    actor: &AuthUser,
    target_username: &str,
    new_flag: bool,
) -> AppResult<User> {
    require_admin(actor)?;

    let user = UserRepo::set_admin(pool, target_username, new_flag)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", target_username)))?;

    tracing::info!(
        actor = %actor.username,
        target = %user.username,
        admin = user.admin,
        "Admin flag updated",
    );
    Ok(user)
}

/// GET /users
pub async fn users(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<UserResponse>>>> {
    let users = UserRepo::list(&state.pool)
        .await?
        .into_iter()
        .map(UserResponse::from)
        .collect();
    Ok(Json(DataResponse { data: users }))
}

/// GET /user/{username}
pub async fn user(
    RequireAdmin(_admin): RequireAdmin,
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> AppResult<Json<DataResponse<UserResponse>>> {
    let user = UserRepo::find_by_username(&state.pool, &username)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::not_found("User", &username)))?;
    Ok(Json(DataResponse { data: user.into() }))
}

/// POST /user/{username}/update
///
/// Redirects back to the profile page on success, or to the user list when
/// the stored name is not usable as a path segment.
pub async fn user_update(
    actor: AuthUser,
    State(state): State<AppState>,
    Path(username): Path<String>,
    Form(form): Form<UserUpdateForm>,
) -> AppResult<Response> {
    let user =
        update_user_admin_flag(&state.pool, &actor, &username, form.admin_checked()).await?;
    Ok(see_other(&profile_location(&user.username)))
}

fn profile_location(username: &str) -> String {
    if is_valid_username(username) {
        format!("/user/{username}")
    } else {
        "/users".to_string()
    }
}
