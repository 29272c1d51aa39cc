//! Repository for the `tiles` table.

use osmtm_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::tile::Tile;

/// Column list for `tiles` queries.
const COLUMNS: &str = "id, job_id, x, y, checkin";

/// Provides read and check-in operations for tiles.
pub struct TileRepo;

impl TileRepo {
    /// All tiles of a job, ordered by `x` then `y`.
    pub async fn list_by_job(pool: &SqlitePool, job_id: DbId) -> Result<Vec<Tile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tiles WHERE job_id = $1 ORDER BY x, y");
        sqlx::query_as::<_, Tile>(&query)
            .bind(job_id)
            .fetch_all(pool)
            .await
    }

    /// Number of tiles belonging to a job.
    pub async fn count_by_job(pool: &SqlitePool, job_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM tiles WHERE job_id = $1")
            .bind(job_id)
            .fetch_one(pool)
            .await
    }

    /// Find a tile by its grid position within a job.
    pub async fn find(
        pool: &SqlitePool,
        job_id: DbId,
        x: i64,
        y: i64,
    ) -> Result<Option<Tile>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM tiles WHERE job_id = $1 AND x = $2 AND y = $3");
        sqlx::query_as::<_, Tile>(&query)
            .bind(job_id)
            .bind(x)
            .bind(y)
            .fetch_optional(pool)
            .await
    }

    /// Increment the check-in counter. Returns `None` if the tile does not exist.
    pub async fn checkin(
        pool: &SqlitePool,
        job_id: DbId,
        x: i64,
        y: i64,
    ) -> Result<Option<Tile>, sqlx::Error> {
        let query = format!(
            "UPDATE tiles SET checkin = checkin + 1
             WHERE job_id = $1 AND x = $2 AND y = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tile>(&query)
            .bind(job_id)
            .bind(x)
            .bind(y)
            .fetch_optional(pool)
            .await
    }

    /// Decrement the check-in counter, stopping at zero.
    ///
    /// Returns `None` if the tile does not exist.
    pub async fn release(
        pool: &SqlitePool,
        job_id: DbId,
        x: i64,
        y: i64,
    ) -> Result<Option<Tile>, sqlx::Error> {
        let query = format!(
            "UPDATE tiles SET checkin = MAX(checkin - 1, 0)
             WHERE job_id = $1 AND x = $2 AND y = $3
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tile>(&query)
            .bind(job_id)
            .bind(x)
            .bind(y)
            .fetch_optional(pool)
            .await
    }
}
