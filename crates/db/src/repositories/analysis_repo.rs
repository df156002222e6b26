//! Repository for the `analyses` table.
//!
//! Append-only by design: there is no update operation for analysis
//! outcomes. History ordering is decided here (`created_at` descending),
//! not by submission order.

use codesense_core::types::DbId;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::models::analysis::{AnalysisRecord, NewAnalysis};

/// Column list for analyses queries.
const COLUMNS: &str =
    "id, user_id, language, source_code, filename, score, report, created_at";

/// CRUD (minus U) operations for analysis records.
pub struct AnalysisRepo;

impl AnalysisRepo {
    /// Insert a new analysis record, returning the created row.
    ///
    /// The database assigns `id` and `created_at`; the insert is a single
    /// statement, so either the whole record exists or none of it does.
    pub async fn create(pool: &PgPool, input: &NewAnalysis) -> Result<AnalysisRecord, sqlx::Error> {
        let query = format!(
            "INSERT INTO analyses (user_id, language, source_code, filename, score, report)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, AnalysisRecord>(&query)
            .bind(input.user_id)
            .bind(&input.language)
            .bind(&input.source_code)
            .bind(&input.filename)
            .bind(input.score)
            .bind(Json(&input.report))
            .fetch_one(pool)
            .await
    }

    /// List all analyses for an owner, newest first.
    pub async fn list_by_owner(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<AnalysisRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM analyses
             WHERE user_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, AnalysisRecord>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await
    }

    /// Find an analysis by its ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<AnalysisRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM analyses WHERE id = $1");
        sqlx::query_as::<_, AnalysisRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Delete an analysis by its ID. Returns `false` when no row matched.
    pub async fn delete_by_id(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM analyses WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
