use serde::{Deserialize, Serialize};

/// Body of a chat invocation. Only the last message is forwarded upstream.
#[derive(Debug, Default, Deserialize)]
pub struct ChatRequest {
    /// `null` and absent both mean an empty conversation.
    #[serde(default)]
    pub messages: Option<Vec<ChatMessage>>,
}

/// Any other field of a message, `role` included, is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatMessage {
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatRequest {
    /// Parse a raw body. An empty body counts as `{}`.
    pub fn from_body(body: &[u8]) -> Result<Self, serde_json::Error> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
    }

    pub fn message_count(&self) -> usize {
        self.messages.as_ref().map_or(0, Vec::len)
    }

    /// Content of the last message, or "" when there is none.
    pub fn last_user_message(&self) -> &str {
        self.messages
            .as_deref()
            .and_then(<[ChatMessage]>::last)
            .and_then(|m| m.content.as_deref())
            .unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResponse {
    pub response: String,
    pub has_tools: bool,
}

impl ChatResponse {
    pub fn plain(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            has_tools: false,
        }
    }
}
