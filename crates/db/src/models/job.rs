//! Job entity models and DTOs.

use osmtm_core::jobs::JobPlan;
use osmtm_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

use super::tile::Tile;

/// A row from the `jobs` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub title: String,
    pub description: String,
    /// Polygon WKT exactly as submitted.
    pub geometry: String,
    pub workflow: String,
    pub imagery: Option<String>,
    pub zoom: i32,
    pub created_at: Timestamp,
}

/// Listing row for the home page: a job plus its tile count.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct JobSummary {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub zoom: i32,
    pub tile_count: i64,
    pub created_at: Timestamp,
}

/// A job together with its tiles, loaded by an explicit query.
#[derive(Debug, Clone, Serialize)]
pub struct JobWithTiles {
    #[serde(flatten)]
    pub job: Job,
    pub tiles: Vec<Tile>,
}

/// DTO for inserting a new job.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateJob {
    pub title: String,
    pub description: String,
    pub geometry: String,
    pub workflow: String,
    pub imagery: Option<String>,
    pub zoom: i32,
}

impl CreateJob {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        geometry: impl Into<String>,
        workflow: impl Into<String>,
        zoom: i32,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            geometry: geometry.into(),
            workflow: workflow.into(),
            imagery: None,
            zoom,
        }
    }
}

impl From<&JobPlan> for CreateJob {
    fn from(plan: &JobPlan) -> Self {
        Self {
            title: plan.title.clone(),
            description: plan.description.clone(),
            geometry: plan.geometry.clone(),
            workflow: plan.workflow.clone(),
            imagery: plan.imagery.clone(),
            zoom: plan.zoom as i32,
        }
    }
}
