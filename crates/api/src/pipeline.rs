//! The analysis pipeline: validate, invoke upstream, normalize.
//!
//! One submission is one sequential unit of work with no shared mutable
//! state; backoff sleeps are local to the submission's task. Persistence of
//! the result belongs to the handler, so nothing is ever stored unless
//! normalization fully succeeds.

use std::sync::Arc;

use codesense_core::normalize::normalize;
use codesense_core::report::Report;
use codesense_core::submission::validate_code;
use codesense_gemini::prompt::build_review_prompt;
use codesense_gemini::{invoke_with_retry, RetryPolicy, ReviewBackend};

use crate::error::AppError;

/// Orchestrates one code review against the upstream model.
pub struct AnalysisPipeline {
    backend: Arc<dyn ReviewBackend>,
    retry: RetryPolicy,
}

impl AnalysisPipeline {
    pub fn new(backend: Arc<dyn ReviewBackend>, retry: RetryPolicy) -> Self {
        Self { backend, retry }
    }

    /// Run a submission through validation, upstream invocation (with
    /// retry), and normalization.
    ///
    /// Fails with a classified error at the first unrecoverable step; there
    /// is no partial result.
    pub async fn review(&self, code: &str, language: &str) -> Result<Report, AppError> {
        validate_code(code)?;

        let prompt = build_review_prompt(code, language);
        let raw = invoke_with_retry(self.backend.as_ref(), &prompt, &self.retry).await?;

        let report = normalize(&raw)?;
        tracing::debug!(
            score = report.score,
            verdict = %report.verdict,
            "Upstream report normalized"
        );
        Ok(report)
    }
}
