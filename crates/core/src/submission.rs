//! Validation and defaults for incoming analysis submissions.

use crate::error::CoreError;

/// Language assumed when the client sends none.
pub const DEFAULT_LANGUAGE: &str = "javascript";

/// Reject empty (or whitespace-only) code before anything is spent on an
/// upstream call.
pub fn validate_code(code: &str) -> Result<(), CoreError> {
    if code.trim().is_empty() {
        return Err(CoreError::Validation(
            "Please provide code to analyze".into(),
        ));
    }
    Ok(())
}

/// Placeholder filename for a submission that did not name its file,
/// derived from the declared language.
pub fn default_filename(language: &str) -> String {
    let ext = match language.to_ascii_lowercase().as_str() {
        "javascript" => "js",
        "typescript" => "ts",
        "python" => "py",
        "rust" => "rs",
        "go" => "go",
        "java" => "java",
        "c" => "c",
        "cpp" | "c++" => "cpp",
        "csharp" | "c#" => "cs",
        "ruby" => "rb",
        _ => "txt",
    };
    format!("snippet.{ext}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_code_is_rejected() {
        assert!(matches!(
            validate_code(""),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            validate_code("   \n\t"),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn non_empty_code_passes() {
        assert!(validate_code("x = 1").is_ok());
    }

    #[test]
    fn filename_follows_language() {
        assert_eq!(default_filename("python"), "snippet.py");
        assert_eq!(default_filename("JavaScript"), "snippet.js");
        assert_eq!(default_filename("brainfuck"), "snippet.txt");
    }
}
