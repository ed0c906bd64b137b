//! Mock provider for tests.

use super::{
    ChatProvider, FinishReason, GenerationParams, PromptMessage, ProviderError, ProviderResponse,
    Role,
};
use async_trait::async_trait;

/// What the mock answers with.
#[derive(Debug, Clone)]
pub enum MockBehavior {
    /// Echo the last user message back as `Mock response for: <message>`.
    Echo,
    /// Always answer with this text.
    Fixed(String),
    /// Fail as if upstream returned `status` with this `error.message`.
    ApiError { status: u16, message: Option<String> },
    /// Fail as if the connection broke.
    NetworkError(String),
}

pub struct MockChatProvider {
    behavior: MockBehavior,
}

impl MockChatProvider {
    pub fn new(behavior: MockBehavior) -> Self {
        Self { behavior }
    }
}

#[async_trait]
impl ChatProvider for MockChatProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(
        &self,
        messages: &[PromptMessage],
        _params: &GenerationParams,
    ) -> Result<ProviderResponse, ProviderError> {
        let prompt = messages
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or_default();

        let text = match &self.behavior {
            MockBehavior::Echo => format!("Mock response for: {}", prompt),
            MockBehavior::Fixed(text) => text.clone(),
            MockBehavior::ApiError { status, message } => {
                return Err(ProviderError::Api {
                    status: *status,
                    message: message.clone(),
                })
            }
            MockBehavior::NetworkError(reason) => {
                return Err(ProviderError::Network(reason.clone()))
            }
        };

        Ok(ProviderResponse {
            input_tokens: prompt.len() as u32 / 4,
            output_tokens: text.len() as u32 / 4,
            text,
            finish_reason: FinishReason::Complete,
        })
    }
}
