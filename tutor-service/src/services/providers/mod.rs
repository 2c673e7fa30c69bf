//! Completion provider abstraction and implementations.
//!
//! The gateway to the external chat-completion service is a trait so the
//! OpenAI backend can be swapped for the mock in tests. The provider is
//! constructed once at startup and injected through `AppState`; there is no
//! module-global client.

pub mod mock;
pub mod openai;

use crate::models::{ChatMessage, Usage};
use async_trait::async_trait;
use thiserror::Error;

pub use mock::MockCompletionProvider;
pub use openai::{OpenAiConfig, OpenAiProvider};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited by completion API")]
    RateLimited,

    #[error("Completion API returned no content")]
    EmptyCompletion,

    #[error("Network error: {0}")]
    NetworkError(String),
}

/// A single completion call: model, conversation, sampling knobs.
#[derive(Debug, Clone)]
pub struct CompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
}

/// Raw completion text plus token accounting.
#[derive(Debug, Clone)]
pub struct CompletionResult {
    pub text: String,
    pub usage: Usage,
}

/// Gateway to the external chat-completion service. One attempt per call;
/// failures surface to the handler unretried.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, request: CompletionRequest)
        -> Result<CompletionResult, ProviderError>;

    /// Whether an API credential is present. Reported by the health
    /// endpoint; never enforced before a request.
    fn is_configured(&self) -> bool;
}
