//! Chat types and the provider-agnostic model trait.
//!
//! [`ChatModel`] is the single capability interface the rest of the system
//! consumes: messages in, one response out, typed errors. Providers handle
//! their own wire formats behind it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::tools::{ToolCall, ToolDefinition};

/// Role of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions.
    System,
    /// The human user.
    Human,
    /// The model.
    Assistant,
    /// A tool result being fed back to the model.
    Tool,
}

/// One conversation message.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    /// Who produced the message.
    pub role: MessageRole,

    /// Text content. May be empty on assistant messages that only carry tool
    /// calls.
    pub content: String,

    /// For tool messages: the id of the call this responds to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,

    /// For assistant messages: tool invocations the model requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_calls: Option<Vec<ToolCall>>,
}

impl Message {
    /// Create a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
            tool_call_id: None,
            tool_calls: None,
        }
    }

    /// Create a human/user message.
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Human,
            content: content.into(),
            tool_call_id: None,
            tool_calls: None,
        }
    }

    /// Create an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
            tool_call_id: None,
            tool_calls: None,
        }
    }

    /// Attach tool calls to this message.
    pub fn with_tool_calls(mut self, tool_calls: Vec<ToolCall>) -> Self {
        self.tool_calls = Some(tool_calls);
        self
    }

    /// Tool calls carried by this message, empty slice when none.
    pub fn tool_calls(&self) -> &[ToolCall] {
        self.tool_calls.as_deref().unwrap_or(&[])
    }
}

/// A request to a chat model: messages plus generation parameters.
#[derive(Debug, Clone, Default)]
pub struct ChatRequest {
    /// The conversation messages to send to the model.
    pub messages: Vec<Message>,

    /// Sampling temperature; `None` uses the provider default.
    pub temperature: Option<f32>,

    /// Maximum tokens to generate; `None` uses the provider default.
    pub max_tokens: Option<usize>,

    /// Tools/functions the model may call.
    pub tools: Vec<ToolDefinition>,
}

impl ChatRequest {
    /// Create a request from messages, with default configuration.
    pub fn new(messages: Vec<Message>) -> Self {
        Self {
            messages,
            ..Self::default()
        }
    }

    /// Set the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set the maximum number of tokens to generate.
    pub fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Bind tools the model may call.
    pub fn with_tools(mut self, tools: Vec<ToolDefinition>) -> Self {
        self.tools = tools;
        self
    }
}

/// Token accounting returned by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageMetadata {
    pub input_tokens: usize,
    pub output_tokens: usize,
    pub total_tokens: usize,
}

/// A complete response from a chat model.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// The assistant's message, possibly carrying tool calls.
    pub message: Message,

    /// Token usage, when the provider reports it.
    pub usage: Option<UsageMetadata>,

    /// The model that actually served the request.
    pub model: Option<String>,

    /// Provider finish reason (`"stop"`, `"tool_calls"`, ...).
    pub finish_reason: Option<String>,
}

/// Core trait for chat-based language models.
///
/// Implementations must be `Send + Sync`; share them as `Arc<dyn ChatModel>`.
/// A call may be long-latency; callers own their timeout policy.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generate a complete chat response for the request.
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;

    /// Mock model for testing trait usage patterns.
    struct MockModel {
        response_text: String,
    }

    #[async_trait]
    impl ChatModel for MockModel {
        async fn chat(&self, _request: ChatRequest) -> Result<ChatResponse> {
            Ok(ChatResponse {
                message: Message::assistant(self.response_text.clone()),
                usage: Some(UsageMetadata {
                    input_tokens: 10,
                    output_tokens: 5,
                    total_tokens: 15,
                }),
                model: None,
                finish_reason: Some("stop".into()),
            })
        }
    }

    #[tokio::test]
    async fn test_trait_object() {
        let model: Arc<dyn ChatModel> = Arc::new(MockModel {
            response_text: "Hello!".into(),
        });

        let request = ChatRequest::new(vec![Message::human("Hi")]);
        let response = model.chat(request).await.unwrap();

        assert_eq!(response.message.content, "Hello!");
        assert_eq!(response.message.role, MessageRole::Assistant);
    }

    #[test]
    fn test_request_builder() {
        let request = ChatRequest::new(vec![Message::system("be brief"), Message::human("hi")])
            .with_temperature(0.0)
            .with_max_tokens(256);

        assert_eq!(request.messages.len(), 2);
        assert_eq!(request.temperature, Some(0.0));
        assert_eq!(request.max_tokens, Some(256));
        assert!(request.tools.is_empty());
    }

    #[test]
    fn test_message_tool_calls_accessor() {
        let empty = Message::assistant("plain");
        assert!(empty.tool_calls().is_empty());

        let with_calls = Message::assistant("").with_tool_calls(vec![ToolCall::new(
            "call_1",
            "read_cell",
            json!({"sheet_name": "Sheet1", "cell_address": "A1"}),
        )]);
        assert_eq!(with_calls.tool_calls().len(), 1);
        assert_eq!(with_calls.tool_calls()[0].name, "read_cell");
    }
}
