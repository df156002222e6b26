//! Normalization of raw upstream model output into a [`Report`].
//!
//! The model is asked for strictly valid JSON, but in practice the payload
//! arrives wrapped in markdown code fences, missing optional fields, or with
//! fields of the wrong type. This module turns all of that into the fixed
//! report shape. The only unrecoverable case is text that is not JSON at
//! all.

use serde_json::Value;

use crate::report::{Issue, Report, DEFAULT_VERDICT_EXPLANATION, VERDICT_UNKNOWN};

/// Failure to turn upstream text into a report.
#[derive(Debug, thiserror::Error)]
pub enum NormalizationError {
    /// The payload (after fence stripping) was not parseable JSON. Terminal:
    /// this layer never re-asks the upstream model.
    #[error("Upstream response is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

/// Strip markdown code-fence wrapping from a model response.
///
/// Tolerant and idempotent: input without fences comes back unchanged apart
/// from whitespace trimming, and applying the function twice equals applying
/// it once.
pub fn strip_code_fences(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // The opening fence may carry a language tag, e.g. ```json.
        let rest = match rest.find('\n') {
            Some(idx) => &rest[idx + 1..],
            None => rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric()),
        };
        text = rest;
        if let Some(inner) = text.trim_end().strip_suffix("```") {
            text = inner;
        }
    }

    text.trim()
}

/// Parse raw upstream text into a [`Report`], defaulting every field the
/// payload omitted or mistyped.
///
/// Defaulting is total: a bare `{}` normalizes successfully. Only
/// unparseable text fails. Out-of-range scores are passed through as-is;
/// clamping is deliberately not done here.
pub fn normalize(raw: &str) -> Result<Report, NormalizationError> {
    let value: Value = serde_json::from_str(strip_code_fences(raw))?;

    Ok(Report {
        score: value
            .get("score")
            .and_then(Value::as_i64)
            .and_then(|s| i32::try_from(s).ok())
            .unwrap_or(0),
        verdict: string_or(&value, "verdict", VERDICT_UNKNOWN),
        verdict_explanation: string_or(&value, "verdictExplanation", DEFAULT_VERDICT_EXPLANATION),
        strengths: string_list(&value, "strengths"),
        issues: issue_list(&value),
        actionable_improvements: string_list(&value, "actionableImprovements"),
        refactored_code: string_or(&value, "refactoredCode", ""),
    })
}

fn string_or(value: &Value, key: &str, default: &str) -> String {
    value
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or(default)
        .to_string()
}

fn string_list(value: &Value, key: &str) -> Vec<String> {
    value
        .get(key)
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn issue_list(value: &Value) -> Vec<Issue> {
    value
        .get("issues")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter(|item| item.is_object())
                .filter_map(|item| serde_json::from_value(item.clone()).ok())
                .collect()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_json_fence() {
        let raw = "```json\n{\"score\": 90}\n```";
        assert_eq!(strip_code_fences(raw), "{\"score\": 90}");
    }

    #[test]
    fn strips_bare_fence() {
        let raw = "```\n{\"score\": 90}\n```";
        assert_eq!(strip_code_fences(raw), "{\"score\": 90}");
    }

    #[test]
    fn fence_stripping_is_idempotent() {
        let raw = "```json\n{\"score\": 90}\n```";
        let once = strip_code_fences(raw);
        assert_eq!(strip_code_fences(once), once);
    }

    #[test]
    fn unfenced_input_passes_through() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn partial_payload_gets_defaults() {
        let report = normalize(r#"{"score": 70}"#).unwrap();
        assert_eq!(report.score, 70);
        assert_eq!(report.verdict, VERDICT_UNKNOWN);
        assert_eq!(report.verdict_explanation, DEFAULT_VERDICT_EXPLANATION);
        assert!(report.strengths.is_empty());
        assert!(report.issues.is_empty());
        assert!(report.actionable_improvements.is_empty());
        assert_eq!(report.refactored_code, "");
    }

    #[test]
    fn empty_object_normalizes_to_all_defaults() {
        let report = normalize("{}").unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.verdict, VERDICT_UNKNOWN);
    }

    #[test]
    fn full_payload_round_trips() {
        let report = normalize(
            r#"{
                "score": 85,
                "verdict": "Excellent",
                "verdictExplanation": "Clean and well structured.",
                "strengths": ["idiomatic", "well tested"],
                "issues": [{
                    "title": "Magic number",
                    "description": "Unexplained constant 86400.",
                    "fix": "Name it SECONDS_PER_DAY.",
                    "severity": "Low"
                }],
                "actionableImprovements": ["add doc comments"],
                "refactoredCode": "fn main() {}"
            }"#,
        )
        .unwrap();

        assert_eq!(report.score, 85);
        assert_eq!(report.verdict, "Excellent");
        assert_eq!(report.strengths.len(), 2);
        assert_eq!(report.issues[0].title, "Magic number");
        assert_eq!(report.issues[0].severity, "Low");
        assert_eq!(report.refactored_code, "fn main() {}");
    }

    #[test]
    fn wrong_typed_fields_fall_back_to_defaults() {
        let report =
            normalize(r#"{"score": "high", "verdict": 3, "strengths": "lots"}"#).unwrap();
        assert_eq!(report.score, 0);
        assert_eq!(report.verdict, VERDICT_UNKNOWN);
        assert!(report.strengths.is_empty());
    }

    #[test]
    fn non_object_issue_entries_are_dropped() {
        let report = normalize(r#"{"issues": ["just text", {"title": "real"}]}"#).unwrap();
        assert_eq!(report.issues.len(), 1);
        assert_eq!(report.issues[0].title, "real");
    }

    #[test]
    fn out_of_range_score_passes_through() {
        assert_eq!(normalize(r#"{"score": 250}"#).unwrap().score, 250);
        assert_eq!(normalize(r#"{"score": -5}"#).unwrap().score, -5);
    }

    #[test]
    fn score_too_large_to_represent_defaults_to_zero() {
        // A value outside i32 must take the invalid->0 path, not wrap.
        assert_eq!(normalize(r#"{"score": 1000000000000}"#).unwrap().score, 0);
        assert_eq!(normalize(r#"{"score": -1000000000000}"#).unwrap().score, 0);
    }

    #[test]
    fn unparseable_payload_is_terminal() {
        let err = normalize("I could not produce JSON, sorry.").unwrap_err();
        assert!(matches!(err, NormalizationError::InvalidJson(_)));
    }

    #[test]
    fn normalization_is_idempotent() {
        let first = normalize(r#"{"score": 70, "verdict": "Fair"}"#).unwrap();
        let serialized = serde_json::to_string(&first).unwrap();
        let second = normalize(&serialized).unwrap();
        assert_eq!(first, second);
    }
}
