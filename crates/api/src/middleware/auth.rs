//! JWT-based authentication extractor for Axum handlers.

use axum::extract::{FromRequestParts, OptionalFromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use osmtm_core::error::CoreError;
use osmtm_core::terms::NextviewState;
use osmtm_core::types::DbId;
use osmtm_db::models::user::User;
use osmtm_db::repositories::UserRepo;

use crate::auth::jwt::validate_token;
use crate::error::{AppError, AppResult};
use crate::state::AppState;

/// The caller's identity, resolved from the `Authorization: Bearer` token and
/// reloaded from the `users` table on every request.
///
/// ```ignore
/// async fn my_handler(user: AuthUser) -> AppResult<Json<()>> {
///     tracing::info!(user_id = user.user_id, admin = user.admin, "handling request");
///     Ok(Json(()))
/// }
/// ```
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: DbId,
    pub username: String,
    pub admin: bool,
    pub nextview: NextviewState,
}

impl From<User> for AuthUser {
    fn from(user: User) -> Self {
        let nextview = user.nextview_state();
        Self {
            user_id: user.id,
            username: user.username,
            admin: user.admin,
            nextview,
        }
    }
}

fn unauthorized(msg: &str) -> AppError {
    AppError::Core(CoreError::Unauthorized(msg.into()))
}

/// Resolve a bearer token into the current user row.
async fn authenticate(header: &str, state: &AppState) -> AppResult<AuthUser> {
    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        unauthorized("Invalid Authorization format. Expected: Bearer <token>")
    })?;

    let claims = validate_token(token, &state.config.jwt)
        .map_err(|_| unauthorized("Invalid or expired token"))?;

    let user = UserRepo::find_by_id(&state.pool, claims.sub)
        .await?
        .ok_or_else(|| unauthorized("User no longer exists"))?;

    Ok(user.into())
}

impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| unauthorized("Missing Authorization header"))?;

        authenticate(header, state).await
    }
}

/// Anonymous callers (no `Authorization` header) yield `None`; a header that
/// is present but invalid is still rejected.
impl OptionalFromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Option<Self>, Self::Rejection> {
        let Some(header) = parts.headers.get(AUTHORIZATION) else {
            return Ok(None);
        };
        let header = header
            .to_str()
            .map_err(|_| unauthorized("Malformed Authorization header"))?;

        authenticate(header, state).await.map(Some)
    }
}
