//! Handlers for code analysis: submission, history, retrieval, deletion.
//!
//! Every route requires an authenticated user; records are owner-scoped,
//! and existence is always checked before ownership so an unknown id reads
//! as NotFound for everyone.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;

use codesense_core::error::CoreError;
use codesense_core::ownership::authorize_owner;
use codesense_core::submission::{default_filename, DEFAULT_LANGUAGE};
use codesense_core::types::DbId;
use codesense_db::models::analysis::{NewAnalysis, SubmitAnalysis};
use codesense_db::repositories::AnalysisRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Confirmation payload for a successful delete.
#[derive(Debug, serde::Serialize)]
pub struct Deleted {
    pub deleted: DbId,
}

/// POST /analysis
///
/// Run the full pipeline on a submission and persist the result. Nothing is
/// stored unless the upstream response normalizes successfully.
pub async fn submit_analysis(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<SubmitAnalysis>,
) -> AppResult<impl IntoResponse> {
    let code = input.code.unwrap_or_default();
    let language = input
        .language
        .filter(|l| !l.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());
    let filename = input
        .filename
        .filter(|f| !f.trim().is_empty())
        .unwrap_or_else(|| default_filename(&language));

    let report = state.pipeline.review(&code, &language).await?;

    let record = AnalysisRepo::create(
        &state.pool,
        &NewAnalysis {
            user_id: auth.user_id,
            language,
            source_code: code,
            filename,
            score: report.score,
            report,
        },
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        analysis_id = record.id,
        score = record.score,
        language = %record.language,
        "Analysis created"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: record })))
}

/// GET /analysis
///
/// The caller's analysis history, newest first. Empty list when they have
/// none.
pub async fn list_history(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let history = AnalysisRepo::list_by_owner(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: history }))
}

/// GET /analysis/{id}
///
/// A single analysis, visible only to its owner.
pub async fn get_analysis(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = AnalysisRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Analysis",
            id,
        }))?;

    authorize_owner(record.user_id, auth.user_id)?;

    Ok(Json(DataResponse { data: record }))
}

/// DELETE /analysis/{id}
///
/// Owner-authorized, explicit deletion. The only way a record ever goes
/// away.
pub async fn delete_analysis(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let record = AnalysisRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Analysis",
            id,
        }))?;

    authorize_owner(record.user_id, auth.user_id)?;

    // The record can vanish between the existence check and the delete;
    // report that as NotFound like any other missing id.
    let deleted = AnalysisRepo::delete_by_id(&state.pool, id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Analysis",
            id,
        }));
    }

    tracing::info!(user_id = auth.user_id, analysis_id = id, "Analysis deleted");

    Ok(Json(DataResponse {
        data: Deleted { deleted: id },
    }))
}
