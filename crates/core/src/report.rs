//! The canonical review report schema.
//!
//! This is the fixed shape every analysis record carries, regardless of how
//! partial or messy the upstream model's payload was. The wire format is
//! camelCase to match what the web client already consumes.

use serde::{Deserialize, Serialize};

/// A normalized code review report.
///
/// Produced exclusively by [`crate::normalize::normalize`]; downstream code
/// can rely on every field being present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Report {
    /// Quality score. Nominally 0-100; out-of-range upstream values are
    /// passed through unclamped.
    pub score: i32,
    /// One-word quality verdict. The model is asked for
    /// Perfect/Excellent/Good/Fair/Poor/Critical; absent payloads get
    /// [`VERDICT_UNKNOWN`].
    pub verdict: String,
    /// One-line summary backing the verdict.
    pub verdict_explanation: String,
    /// What the submitted code does well, in the order the model gave.
    pub strengths: Vec<String>,
    /// Problems found, in the order the model gave.
    pub issues: Vec<Issue>,
    /// Checklist of concrete follow-ups.
    pub actionable_improvements: Vec<String>,
    /// Full rewritten code. May equal the submission when nothing needed
    /// changing; empty when the model offered no rewrite.
    pub refactored_code: String,
}

/// A single problem the reviewer found.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Issue {
    pub title: String,
    pub description: String,
    pub fix: String,
    /// Nominally High/Medium/Low. Stored as free text; only the prompt
    /// constrains it.
    pub severity: String,
}

/// Verdict used when the upstream payload omitted one.
pub const VERDICT_UNKNOWN: &str = "Unknown";

/// Explanation used when the upstream payload omitted one.
pub const DEFAULT_VERDICT_EXPLANATION: &str = "No explanation provided.";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_serializes_camel_case() {
        let report = Report {
            score: 90,
            verdict: "Good".into(),
            verdict_explanation: "Solid".into(),
            strengths: vec!["clear naming".into()],
            issues: vec![],
            actionable_improvements: vec![],
            refactored_code: String::new(),
        };

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["verdictExplanation"], "Solid");
        assert_eq!(json["actionableImprovements"], serde_json::json!([]));
        assert_eq!(json["refactoredCode"], "");
    }

    #[test]
    fn issue_fields_default_when_missing() {
        let issue: Issue = serde_json::from_str(r#"{"title": "Unchecked input"}"#).unwrap();
        assert_eq!(issue.title, "Unchecked input");
        assert_eq!(issue.description, "");
        assert_eq!(issue.fix, "");
        assert_eq!(issue.severity, "");
    }
}
