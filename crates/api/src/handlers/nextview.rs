//! Handlers for the one-time terms gate at `/profile/nextview`.

use axum::extract::State;
use axum::response::Response;
use axum::{Form, Json};
use osmtm_core::terms::{NextviewState, ACCEPTANCE_TOKEN};
use osmtm_db::repositories::UserRepo;
use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::{found, DataResponse};
use crate::state::AppState;

/// Context for the terms page.
#[derive(Debug, Serialize)]
pub struct NextviewContext {
    pub state: NextviewState,
    pub accepted_nextview: bool,
    /// Phrase the user has to type to accept.
    pub acceptance_phrase: &'static str,
}

/// Terms submission form.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NextviewForm {
    pub accepted_terms: String,
    pub redirect: Option<String>,
}

/// GET /profile/nextview
pub async fn nextview(auth: AuthUser) -> Json<DataResponse<NextviewContext>> {
    Json(DataResponse {
        data: NextviewContext {
            state: auth.nextview,
            accepted_nextview: auth.nextview.is_accepted(),
            acceptance_phrase: ACCEPTANCE_TOKEN,
        },
    })
}

/// POST /profile/nextview
///
/// Persists acceptance when the exact phrase was submitted, then always
/// redirects to `redirect`. Only local paths are followed; anything else,
/// including a missing target, redirects to `/`.
pub async fn nextview_submit(
    auth: AuthUser,
    State(state): State<AppState>,
    Form(form): Form<NextviewForm>,
) -> AppResult<Response> {
    let next = auth.nextview.submit(&form.accepted_terms);

    if next != auth.nextview {
        UserRepo::accept_nextview(&state.pool, auth.user_id).await?;
        tracing::info!(user_id = auth.user_id, "Next-view terms accepted");
    }

    Ok(found(local_redirect_target(form.redirect.as_deref())))
}

/// `redirect` when it is a path on this server, otherwise `/`.
///
/// Scheme-relative (`//host`) and backslash forms are rejected since
/// browsers resolve them to another origin.
fn local_redirect_target(redirect: Option<&str>) -> &str {
    match redirect.map(str::trim) {
        Some(target)
            if target.starts_with('/')
                && !target.starts_with("//")
                && !target.contains('\\') =>
        {
            target
        }
        _ => "/",
    }
}
