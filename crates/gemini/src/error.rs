//! Classified upstream failure modes.

/// Why an upstream invocation failed.
///
/// Only [`UpstreamError::RateLimited`] is worth retrying; everything else
/// propagates immediately.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// Upstream signalled that request volume exceeded the allowed quota.
    #[error("Upstream rate limited: {0}")]
    RateLimited(String),

    /// Upstream signalled temporary unavailability unrelated to our volume.
    #[error("Upstream overloaded: {0}")]
    Overloaded(String),

    /// The request timed out. Treated as non-retryable.
    #[error("Upstream request timed out")]
    Timeout,

    /// Connection-level failure before any status was received.
    #[error("Upstream transport error: {0}")]
    Transport(String),

    /// Any other upstream fault, carrying the status when one was received.
    #[error("Upstream error (status {status:?}): {message}")]
    Unknown {
        status: Option<u16>,
        message: String,
    },
}

impl UpstreamError {
    /// Whether the retry loop should try again.
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, UpstreamError::RateLimited(_))
    }

    /// Classify a non-success HTTP status from the upstream API.
    ///
    /// Quota exhaustion sometimes arrives as a 400/403 with a quota message
    /// rather than a clean 429, so the body text is consulted too.
    pub fn from_status(status: u16, message: String) -> Self {
        if status == 429 || message.contains("RESOURCE_EXHAUSTED") || message.contains("Quota exceeded") {
            UpstreamError::RateLimited(message)
        } else if status == 503 {
            UpstreamError::Overloaded(message)
        } else {
            UpstreamError::Unknown {
                status: Some(status),
                message,
            }
        }
    }

    /// Classify a reqwest-level failure (no HTTP status available).
    pub fn from_transport(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else {
            UpstreamError::Transport(err.to_string())
        }
    }
}
