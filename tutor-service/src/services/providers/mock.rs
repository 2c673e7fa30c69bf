//! Scripted mock provider for testing.

use super::{CompletionProvider, CompletionRequest, CompletionResult, ProviderError};
use crate::models::Usage;
use async_trait::async_trait;
use std::sync::Mutex;

/// Mock completion provider. Replays scripted responses in order (falling
/// back to a canned completion when the script is exhausted) and records
/// every request for assertions.
#[derive(Default)]
pub struct MockCompletionProvider {
    configured: bool,
    responses: Mutex<Vec<Result<CompletionResult, ProviderError>>>,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a single successful completion with the given text.
    pub fn with_text(text: impl Into<String>) -> Self {
        let provider = Self::default();
        provider.push_text(text);
        provider
    }

    /// Script a single failing completion.
    pub fn with_error(error: ProviderError) -> Self {
        let provider = Self::default();
        provider.responses.lock().unwrap().push(Err(error));
        provider
    }

    pub fn configured(mut self, configured: bool) -> Self {
        self.configured = configured;
        self
    }

    pub fn push_text(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push(Ok(CompletionResult {
            text: text.into(),
            usage: Usage {
                prompt_tokens: 12,
                completion_tokens: 8,
                total_tokens: 20,
            },
        }));
    }

    /// Every request seen so far, in call order.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    async fn complete(
        &self,
        request: CompletionRequest,
    ) -> Result<CompletionResult, ProviderError> {
        self.requests.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(CompletionResult {
                text: "This is a mock completion.".to_string(),
                usage: Usage {
                    prompt_tokens: 12,
                    completion_tokens: 8,
                    total_tokens: 20,
                },
            })
        } else {
            responses.remove(0)
        }
    }

    fn is_configured(&self) -> bool {
        self.configured
    }
}
