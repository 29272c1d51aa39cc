//! Handlers for tile check-in and release under `/job/{job}/tile/{x}/{y}`.

use axum::extract::{Path, State};
use axum::Json;
use osmtm_core::error::CoreError;
use osmtm_core::types::DbId;
use osmtm_db::models::tile::Tile;
use osmtm_db::repositories::{JobRepo, TileRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Path parameters shared by the tile routes.
type TilePath = Path<(DbId, i64, i64)>;

async fn ensure_job_exists(pool: &osmtm_db::DbPool, job_id: DbId) -> AppResult<()> {
    JobRepo::find_by_id(pool, job_id)
        .await?
        .ok_or(AppError::Core(CoreError::not_found("Job", job_id)))?;
    Ok(())
}

fn tile_not_found(job_id: DbId, x: i64, y: i64) -> AppError {
    AppError::Core(CoreError::not_found("Tile", format!("{job_id}/{x}/{y}")))
}

/// POST /job/{job}/tile/{x}/{y}/checkin
///
/// Mark that the caller started working the tile.
pub async fn checkin(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((job_id, x, y)): TilePath,
) -> AppResult<Json<DataResponse<Tile>>> {
    ensure_job_exists(&state.pool, job_id).await?;
    let tile = TileRepo::checkin(&state.pool, job_id, x, y)
        .await?
        .ok_or_else(|| tile_not_found(job_id, x, y))?;

    tracing::info!(job_id, x, y, checkin = tile.checkin, user_id = auth.user_id, "Tile checked in");
    Ok(Json(DataResponse { data: tile }))
}

/// POST /job/{job}/tile/{x}/{y}/release
///
/// Undo a check-in. The counter never drops below zero.
pub async fn release(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((job_id, x, y)): TilePath,
) -> AppResult<Json<DataResponse<Tile>>> {
    ensure_job_exists(&state.pool, job_id).await?;
    let tile = TileRepo::release(&state.pool, job_id, x, y)
        .await?
        .ok_or_else(|| tile_not_found(job_id, x, y))?;

    tracing::info!(job_id, x, y, checkin = tile.checkin, user_id = auth.user_id, "Tile released");
    Ok(Json(DataResponse { data: tile }))
}
