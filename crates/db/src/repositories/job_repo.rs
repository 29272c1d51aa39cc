//! Repository for the `jobs` table.

use osmtm_core::types::DbId;
use sqlx::SqlitePool;

use crate::models::job::{CreateJob, Job, JobSummary};
use crate::models::tile::NewTile;

/// Column list for `jobs` queries.
const COLUMNS: &str = "id, title, description, geometry, workflow, imagery, zoom, created_at";

/// Provides CRUD operations for jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a job and all of its tiles in one transaction.
    ///
    /// Either the job and every tile become visible together or nothing is
    /// written.
    pub async fn create_with_tiles(
        pool: &SqlitePool,
        input: &CreateJob,
        tiles: &[NewTile],
    ) -> Result<Job, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO jobs (title, description, geometry, workflow, imagery, zoom)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let job = sqlx::query_as::<_, Job>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.geometry)
            .bind(&input.workflow)
            .bind(&input.imagery)
            .bind(input.zoom)
            .fetch_one(&mut *tx)
            .await?;

        for tile in tiles {
            sqlx::query("INSERT INTO tiles (job_id, x, y, checkin) VALUES ($1, $2, $3, $4)")
                .bind(job.id)
                .bind(tile.x)
                .bind(tile.y)
                .bind(tile.checkin)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;

        tracing::debug!(job_id = job.id, tile_count = tiles.len(), "Inserted job with tiles");
        Ok(job)
    }

    /// Find a job by internal ID.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Job>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM jobs WHERE id = $1");
        sqlx::query_as::<_, Job>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List every job with its tile count, newest first.
    pub async fn list_summaries(pool: &SqlitePool) -> Result<Vec<JobSummary>, sqlx::Error> {
        sqlx::query_as::<_, JobSummary>(
            "SELECT j.id, j.title, j.description, j.zoom, j.created_at,
                    COUNT(t.id) AS tile_count
             FROM jobs j
             LEFT JOIN tiles t ON t.job_id = j.id
             GROUP BY j.id
             ORDER BY j.id DESC",
        )
        .fetch_all(pool)
        .await
    }

    /// Delete a job. Its tiles go with it via `ON DELETE CASCADE`.
    ///
    /// Returns `true` if a row was deleted.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM jobs WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
