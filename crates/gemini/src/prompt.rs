//! Review prompt construction.
//!
//! The prompt pins the model to a strict JSON shape so that normalization
//! downstream has a fighting chance. Changing the shape here must be
//! mirrored in `codesense_core::report`.

/// Build the reviewer prompt for one submission.
pub fn build_review_prompt(code: &str, language: &str) -> String {
    format!(
        r#"You are an expert senior software engineer and code reviewer.
Analyze the following {language} code.

Respond in strictly valid JSON format with this structure:
{{
  "score": <number 0-100>,
  "verdict": "<string: Perfect|Excellent|Good|Fair|Poor|Critical>",
  "verdictExplanation": "<string: one line summary>",
  "strengths": ["<string>", ...],
  "issues": [
    {{
      "title": "<string: what is wrong>",
      "description": "<string: why it matters>",
      "fix": "<string: how to fix it>",
      "severity": "<string: High|Medium|Low>"
    }}
  ],
  "actionableImprovements": ["<string: checklist item>", ...],
  "refactoredCode": "<string: full improved code>"
}}

Focus on:
1. Correctness and Logic
2. Time and Space Complexity
3. Code Style and Best Practices
4. Security Vulnerabilities

Code to analyze:
{code}
"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_embeds_code_and_language() {
        let prompt = build_review_prompt("x = 1", "python");
        assert!(prompt.contains("python code"));
        assert!(prompt.contains("x = 1"));
        assert!(prompt.contains("strictly valid JSON"));
        assert!(prompt.contains("refactoredCode"));
    }
}
