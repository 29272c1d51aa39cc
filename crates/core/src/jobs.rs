//! Job creation rules: form validation, geometry parsing and tile planning.
//!
//! A submitted form goes through [`JobForm::into_plan`], which yields a
//! [`JobPlan`] holding the cleaned fields plus the tiles to persist. Any
//! problem surfaces as [`CoreError::Validation`] or
//! [`CoreError::GeometryParse`].

use serde::Deserialize;
use validator::Validate;

use crate::error::CoreError;
use crate::geometry::parse_polygon;
use crate::tiling::{count_tiles_upper_bound, generate_tiles, TileCoord};

/// Highest zoom a job may be tiled at.
pub const MAX_JOB_ZOOM: u32 = 22;

/// Largest tile set a single job may hold.
pub const MAX_TILES_PER_JOB: u64 = 10_000;

/// Longest accepted job title, in characters.
pub const MAX_TITLE_LENGTH: usize = 255;

/// Raw job creation form as submitted by the client.
///
/// Every field defaults to empty and `zoom` stays a string, so missing or
/// non-numeric input is reported as a validation failure instead of a
/// deserialization rejection.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct JobForm {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(length(min = 1, message = "Geometry is required"))]
    pub geometry: String,
    #[validate(length(min = 1, message = "Workflow is required"))]
    pub workflow: String,
    pub imagery: Option<String>,
    #[validate(length(min = 1, message = "Zoom is required"))]
    pub zoom: String,
}

/// A validated job ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct JobPlan {
    pub title: String,
    pub description: String,
    pub geometry: String,
    pub workflow: String,
    pub imagery: Option<String>,
    pub zoom: u32,
    pub tiles: Vec<TileCoord>,
}

impl JobForm {
    /// Trim every field, validate, parse the geometry and compute the tiles.
    pub fn into_plan(self) -> Result<JobPlan, CoreError> {
        let form = JobForm {
            title: self.title.trim().to_string(),
            description: self.description.trim().to_string(),
            geometry: self.geometry.trim().to_string(),
            workflow: self.workflow.trim().to_string(),
            imagery: self
                .imagery
                .map(|i| i.trim().to_string())
                .filter(|i| !i.is_empty()),
            zoom: self.zoom.trim().to_string(),
        };
        form.validate().map_err(validation_message)?;
        if form.title.chars().count() > MAX_TITLE_LENGTH {
            return Err(CoreError::Validation(format!(
                "Title must be at most {MAX_TITLE_LENGTH} characters"
            )));
        }

        let zoom = parse_zoom(&form.zoom)?;
        let polygon = parse_polygon(&form.geometry)?;

        let upper_bound = count_tiles_upper_bound(&polygon, zoom);
        if upper_bound > MAX_TILES_PER_JOB {
            return Err(CoreError::Validation(format!(
                "Geometry covers up to {upper_bound} tiles at zoom {zoom}; \
                 the limit is {MAX_TILES_PER_JOB}"
            )));
        }
        let tiles = generate_tiles(&polygon, zoom);

        Ok(JobPlan {
            title: form.title,
            description: form.description,
            geometry: form.geometry,
            workflow: form.workflow,
            imagery: form.imagery,
            zoom,
            tiles,
        })
    }
}

/// Validate that `raw` is an integer zoom in `1..=MAX_JOB_ZOOM`.
pub fn parse_zoom(raw: &str) -> Result<u32, CoreError> {
    let zoom: i64 = raw
        .parse()
        .map_err(|_| CoreError::Validation(format!("Zoom must be an integer, got '{raw}'")))?;
    if zoom < 1 || zoom > i64::from(MAX_JOB_ZOOM) {
        return Err(CoreError::Validation(format!(
            "Zoom must be between 1 and {MAX_JOB_ZOOM}, got {zoom}"
        )));
    }
    Ok(zoom as u32)
}

/// Flatten `validator` errors into one message, sorted by field name.
fn validation_message(errors: validator::ValidationErrors) -> CoreError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    CoreError::Validation(messages.join("; "))
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
