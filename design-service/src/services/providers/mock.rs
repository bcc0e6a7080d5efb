//! Mock provider for tests and local runs without an API key.

use super::{FinishReason, Generation, ProviderError, TextProvider};
use async_trait::async_trait;
use std::sync::Mutex;

enum MockBehavior {
    Reply(String),
    Fail(fn() -> ProviderError),
}

/// Returns a canned reply, or a canned failure, and remembers every prompt.
pub struct MockTextProvider {
    behavior: MockBehavior,
    prompts: Mutex<Vec<String>>,
}

impl MockTextProvider {
    pub fn replying(text: impl Into<String>) -> Self {
        Self {
            behavior: MockBehavior::Reply(text.into()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: fn() -> ProviderError) -> Self {
        Self {
            behavior: MockBehavior::Fail(error),
            prompts: Mutex::new(Vec::new()),
        }
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().map(|p| p.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl TextProvider for MockTextProvider {
    fn model(&self) -> &str {
        "mock"
    }

    async fn generate(&self, prompt: &str) -> Result<Generation, ProviderError> {
        if let Ok(mut prompts) = self.prompts.lock() {
            prompts.push(prompt.to_string());
        }

        match &self.behavior {
            MockBehavior::Reply(text) => Ok(Generation {
                text: text.clone(),
                input_tokens: prompt.len() as i32 / 4,
                output_tokens: text.len() as i32 / 4,
                finish_reason: FinishReason::Complete,
            }),
            MockBehavior::Fail(error) => Err(error()),
        }
    }
}
