//! AI text generation providers.
//!
//! Handlers only see the [`TextProvider`] trait, so the Gemini backend can be
//! swapped for the mock in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// Reason why generation stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    Complete,
    Length,
    ContentFilter,
}

/// Text produced by a provider, with token accounting when available.
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    pub input_tokens: i32,
    pub output_tokens: i32,
    pub finish_reason: FinishReason,
}

/// Single-shot text generation.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Model identifier, for logs.
    fn model(&self) -> &str;

    /// Send `prompt` to the model and wait for the complete answer.
    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError>;
}
