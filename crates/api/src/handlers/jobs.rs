//! Handlers for the `/job` resource.
//!
//! Creating a job is an admin page; viewing one needs any signed-in user.

use axum::extract::{Path, State};
use axum::response::Response;
use axum::{Form, Json};
use osmtm_core::error::CoreError;
use osmtm_core::jobs::JobForm;
use osmtm_core::types::DbId;
use osmtm_db::models::job::{CreateJob, Job, JobWithTiles};
use osmtm_db::models::tile::NewTile;
use osmtm_db::repositories::{JobRepo, TileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::response::{see_other, DataResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Operations
// ---------------------------------------------------------------------------

/// Validate a submitted form, tile its geometry and persist the job with
/// its tiles atomically.
pub async fn create_job(pool: &osmtm_db::DbPool, form: JobForm) -> AppResult<Job> {
    let plan = form.into_plan()?;
    let tiles: Vec<NewTile> = plan.tiles.iter().copied().map(NewTile::from).collect();

    let job = JobRepo::create_with_tiles(pool, &CreateJob::from(&plan), &tiles).await?;

    tracing::info!(
        job_id = job.id,
        zoom = job.zoom,
        tile_count = tiles.len(),
        "Job created",
    );
    Ok(job)
}

/// Load a job and its tiles, or fail with `NotFound`.
pub async fn get_job(pool: &osmtm_db::DbPool, job_id: DbId) -> AppResult<JobWithTiles> {
    let job = JobRepo::find_by_id(pool, job_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Job", job_id)))?;
    let tiles = TileRepo::list_by_job(pool, job_id).await?;
    Ok(JobWithTiles { job, tiles })
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /job/new
///
/// Form fields: `title`, `description`, `geometry`, `workflow`, `imagery`,
/// `zoom`. Redirects to the new job on success.
pub async fn job_new(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Form(form): Form<JobForm>,
) -> AppResult<Response> {
    let job = create_job(&state.pool, form).await?;
    tracing::debug!(job_id = job.id, created_by = %admin.username, "Redirecting to new job");
    Ok(see_other(&format!("/job/{}", job.id)))
}

/// GET /job/{job}
pub async fn job(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(job_id): Path<DbId>,
) -> AppResult<Json<DataResponse<JobWithTiles>>> {
    let job = get_job(&state.pool, job_id).await?;
    Ok(Json(DataResponse { data: job }))
}
