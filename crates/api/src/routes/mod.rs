pub mod analysis;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api` route tree.
///
/// ```text
/// /analysis            POST submit, GET history
/// /analysis/{id}       GET record, DELETE record
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/analysis", analysis::router())
}
