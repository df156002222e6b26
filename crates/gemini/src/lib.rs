//! Client for the Google Gemini `generateContent` API.
//!
//! This crate is the pure I/O boundary of the analysis pipeline: it turns a
//! prompt into raw model text (or a classified [`error::UpstreamError`]) and
//! nothing more. Parsing and defaulting of the model's reply belong to
//! `codesense_core::normalize`.

pub mod client;
pub mod error;
pub mod prompt;
pub mod retry;

pub use client::{GeminiClient, GeminiConfig, ReviewBackend};
pub use error::UpstreamError;
pub use retry::{invoke_with_retry, RetryPolicy};
