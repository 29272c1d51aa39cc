//! Admin gate extractor.
//!
//! Wraps [`AuthUser`] and rejects callers without the `admin` flag, so
//! admin-only routes enforce the rule at the type level.

use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use osmtm_core::error::CoreError;

use super::auth::AuthUser;
use crate::error::AppError;
use crate::state::AppState;

/// Requires an admin. Rejects with 403 Forbidden otherwise.
///
/// ```ignore
/// async fn admin_only(RequireAdmin(user): RequireAdmin) -> AppResult<Json<()>> {
///     // user is guaranteed to be an admin here
///     Ok(Json(()))
/// }
/// ```
pub struct RequireAdmin(pub AuthUser);

impl FromRequestParts<AppState> for RequireAdmin {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = <AuthUser as FromRequestParts<AppState>>::from_request_parts(parts, state).await?;
        require_admin(&user)?;
        Ok(RequireAdmin(user))
    }
}

/// Fail with `Forbidden` unless `user` is an admin.
pub fn require_admin(user: &AuthUser) -> Result<(), AppError> {
    if !user.admin {
        return Err(AppError::Core(CoreError::Forbidden(
            "Admin privileges required".into(),
        )));
    }
    Ok(())
}
