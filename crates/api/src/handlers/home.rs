//! Handlers for the landing pages (`/`, `/about`).

use axum::extract::State;
use axum::Json;
use osmtm_db::models::job::JobSummary;
use osmtm_db::repositories::JobRepo;
use serde::Serialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Context for the home page.
#[derive(Debug, Serialize)]
pub struct HomeContext {
    pub jobs: Vec<JobSummary>,
    /// Whether the caller may reach admin pages (users list, job creation).
    pub admin: bool,
    /// `None` for anonymous callers.
    pub username: Option<String>,
}

/// Context for the about page.
#[derive(Debug, Serialize)]
pub struct AboutContext {
    pub title: &'static str,
}

/// Build the home page context for `user`.
///
/// Every job is visible to every caller, anonymous ones included.
pub async fn list_jobs_for_home(
    pool: &osmtm_db::DbPool,
    user: Option<&AuthUser>,
) -> AppResult<HomeContext> {
    let jobs = JobRepo::list_summaries(pool).await?;
    Ok(HomeContext {
        jobs,
        admin: user.is_some_and(|u| u.admin),
        username: user.map(|u| u.username.clone()),
    })
}

/// GET /
pub async fn home(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> AppResult<Json<DataResponse<HomeContext>>> {
    let context = list_jobs_for_home(&state.pool, user.as_ref()).await?;
    Ok(Json(DataResponse { data: context }))
}

/// GET /about
pub async fn about() -> Json<DataResponse<AboutContext>> {
    Json(DataResponse {
        data: AboutContext {
            title: "OSM Tasking Manager - About",
        },
    })
}
