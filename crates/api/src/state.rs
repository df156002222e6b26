use std::sync::Arc;

use crate::config::ServerConfig;
use crate::pipeline::AnalysisPipeline;

/// Shared application state available to all Axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; inner data is behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: codesense_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// The analysis pipeline: upstream backend plus retry policy.
    pub pipeline: Arc<AnalysisPipeline>,
}
