//! Analysis record model.

use codesense_core::report::Report;
use codesense_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;

/// A row from the `analyses` table.
///
/// Records are append-only: once created they are never mutated, only read
/// by their owner or deleted outright.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct AnalysisRecord {
    pub id: DbId,
    /// The submitting user. Set once at creation from the authenticated
    /// caller; the authorization root for every later access.
    pub user_id: DbId,
    pub language: String,
    /// The submitted code, verbatim.
    pub source_code: String,
    pub filename: String,
    pub score: i32,
    /// Normalized review report (JSONB).
    pub report: Json<Report>,
    pub created_at: Timestamp,
}

/// Request body for submitting code for analysis.
///
/// `code` is optional only so an absent field reaches validation and comes
/// back as a 400 rather than a deserialization rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubmitAnalysis {
    pub code: Option<String>,
    pub language: Option<String>,
    pub filename: Option<String>,
}

/// Fully-resolved input for inserting an analysis record.
#[derive(Debug)]
pub struct NewAnalysis {
    pub user_id: DbId,
    pub language: String,
    pub source_code: String,
    pub filename: String,
    pub score: i32,
    pub report: Report,
}
