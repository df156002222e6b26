//! Route definitions for the analysis pipeline.
//!
//! Mounted at `/analysis` by `api_routes()`. All routes require a Bearer
//! token.

use axum::routing::get;
use axum::Router;

use crate::handlers::analysis;
use crate::state::AppState;

/// Analysis routes.
///
/// ```text
/// POST   /        -> submit_analysis
/// GET    /        -> list_history
/// GET    /{id}    -> get_analysis
/// DELETE /{id}    -> delete_analysis
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(analysis::list_history).post(analysis::submit_analysis),
        )
        .route(
            "/{id}",
            get(analysis::get_analysis).delete(analysis::delete_analysis),
        )
}
