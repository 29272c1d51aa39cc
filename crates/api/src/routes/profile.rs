use axum::routing::get;
use axum::Router;

use crate::handlers::nextview;
use crate::state::AppState;

/// Routes mounted at `/profile`.
///
/// ```text
/// GET  /nextview  -> nextview
/// POST /nextview  -> nextview_submit
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/nextview",
        get(nextview::nextview).post(nextview::nextview_submit),
    )
}
