//! HTTP client for the Gemini `generateContent` endpoint.
//!
//! [`GeminiClient`] holds an explicit [`GeminiConfig`] handed in at
//! construction; nothing here reads the process environment after startup.
//! The client returns the model's text exactly as produced, code fences and
//! all, so it stays a pure I/O boundary.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::UpstreamError;

/// Anything that can turn a review prompt into raw model text.
///
/// The production implementation is [`GeminiClient`]; tests script this
/// trait to exercise the pipeline without the network.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Perform a single upstream invocation. No retries at this level.
    async fn invoke(&self, prompt: &str) -> Result<String, UpstreamError>;
}

/// Configuration for the Gemini API.
///
/// Loaded once at process start and immutable thereafter.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API key sent in the `x-goog-api-key` header.
    pub api_key: String,
    /// Model name, e.g. `gemini-2.5-flash`.
    pub model: String,
    /// Base URL up to (not including) `/models/...`.
    pub api_base: String,
    /// Per-request timeout.
    pub request_timeout: Duration,
}

/// Default model when `GEMINI_MODEL` is unset.
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
/// Default API base when `GEMINI_API_BASE` is unset.
const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";
/// Default per-request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 60;

impl GeminiConfig {
    /// Load Gemini configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                  |
    /// |------------------------|----------|--------------------------|
    /// | `GEMINI_API_KEY`       | **yes**  | --                       |
    /// | `GEMINI_MODEL`         | no       | `gemini-2.5-flash`       |
    /// | `GEMINI_API_BASE`      | no       | Google endpoint          |
    /// | `GEMINI_TIMEOUT_SECS`  | no       | `60`                     |
    ///
    /// # Panics
    ///
    /// Panics if `GEMINI_API_KEY` is not set or is empty.
    pub fn from_env() -> Self {
        let api_key =
            std::env::var("GEMINI_API_KEY").expect("GEMINI_API_KEY must be set in the environment");
        assert!(!api_key.is_empty(), "GEMINI_API_KEY must not be empty");

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let api_base = std::env::var("GEMINI_API_BASE").unwrap_or_else(|_| DEFAULT_API_BASE.into());

        let timeout_secs: u64 = std::env::var("GEMINI_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("GEMINI_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            model,
            api_base,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

/// Client for one Gemini model endpoint.
pub struct GeminiClient {
    config: GeminiConfig,
    http: reqwest::Client,
}

impl GeminiClient {
    /// Build a client from explicit configuration.
    pub fn new(config: GeminiConfig) -> Self {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .expect("Failed to build HTTP client");
        Self { config, http }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.api_base, self.config.model
        )
    }
}

#[async_trait]
impl ReviewBackend for GeminiClient {
    async fn invoke(&self, prompt: &str) -> Result<String, UpstreamError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await
            .map_err(UpstreamError::from_transport)?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            tracing::warn!(status = status.as_u16(), "Gemini request failed");
            return Err(UpstreamError::from_status(status.as_u16(), message));
        }

        let payload: GenerateContentResponse = response
            .json()
            .await
            .map_err(UpstreamError::from_transport)?;

        payload.into_text().ok_or_else(|| UpstreamError::Unknown {
            status: None,
            message: "Upstream returned no candidates".into(),
        })
    }
}

// --- Wire types for generateContent ---

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate, or `None` when the model
    /// produced nothing usable.
    fn into_text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        if content.parts.is_empty() {
            return None;
        }
        Some(
            content
                .parts
                .into_iter()
                .map(|p| p.text)
                .collect::<Vec<_>>()
                .join(""),
        )
    }
}
