//! Groq client implementation.
//!
//! Groq serves open models (Llama 3.x and friends) behind an
//! OpenAI-compatible chat-completions API with function calling. This client
//! speaks that wire format: `tools` on the way in, `tool_calls` on the way
//! out, with the call arguments arriving as a JSON-encoded string that is
//! parsed into a structured object before anything else sees it.
//!
//! # Example
//!
//! ```rust,ignore
//! use llm::config::RemoteLlmConfig;
//! use llm::remote::GroqClient;
//! use llm::{ChatModel, ChatRequest, Message};
//!
//! let config = RemoteLlmConfig::from_env(
//!     "GROQ_API_KEY",
//!     "https://api.groq.com/openai/v1",
//!     "llama-3.3-70b-versatile",
//! )?;
//! let client = GroqClient::new(config);
//!
//! let response = client.chat(ChatRequest::new(vec![Message::human("Hello!")])).await?;
//! ```

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::chat::{ChatModel, ChatRequest, ChatResponse, Message, MessageRole, UsageMetadata};
use crate::config::RemoteLlmConfig;
use crate::error::{LlmError, Result};
use crate::tools::{ToolCall, ToolDefinition};

/// Default base URL for the Groq API.
pub const GROQ_BASE_URL: &str = "https://api.groq.com/openai/v1";

/// Groq API client.
#[derive(Clone)]
pub struct GroqClient {
    config: RemoteLlmConfig,
    client: Client,
}

impl GroqClient {
    /// Create a new Groq client with the given configuration.
    pub fn new(config: RemoteLlmConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    /// Convert a chat message to the wire format.
    fn convert_message(msg: &Message) -> WireMessage {
        WireMessage {
            role: match msg.role {
                MessageRole::System => "system".to_string(),
                MessageRole::Human => "user".to_string(),
                MessageRole::Assistant => "assistant".to_string(),
                MessageRole::Tool => "tool".to_string(),
            },
            content: Some(msg.content.clone()),
            tool_call_id: msg.tool_call_id.clone(),
            tool_calls: None,
        }
    }

    /// Convert a tool definition to the wire format.
    fn convert_tool(tool: &ToolDefinition) -> WireTool {
        WireTool {
            kind: "function".to_string(),
            function: WireFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool
                    .parameters
                    .clone()
                    .unwrap_or_else(|| serde_json::json!({"type": "object", "properties": {}})),
            },
        }
    }

    /// Convert a wire response into a [`ChatResponse`].
    fn convert_response(response: WireResponse) -> Result<ChatResponse> {
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LlmError::InvalidResponse("response contained no choices".into()))?;

        let tool_calls = match choice.message.tool_calls {
            Some(calls) if !calls.is_empty() => {
                let mut converted = Vec::with_capacity(calls.len());
                for call in calls {
                    // Arguments arrive as a JSON-encoded string.
                    let arguments: JsonValue =
                        serde_json::from_str(&call.function.arguments).map_err(|e| {
                            LlmError::InvalidResponse(format!(
                                "tool call '{}' carried unparseable arguments: {e}",
                                call.function.name
                            ))
                        })?;
                    converted.push(ToolCall::new(call.id, call.function.name, arguments));
                }
                Some(converted)
            }
            _ => None,
        };

        let mut message = Message::assistant(choice.message.content.unwrap_or_default());
        if let Some(calls) = tool_calls {
            message = message.with_tool_calls(calls);
        }

        let usage = response.usage.map(|u| UsageMetadata {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        });

        Ok(ChatResponse {
            message,
            usage,
            model: Some(response.model),
            finish_reason: choice.finish_reason,
        })
    }

    /// One request/response round trip, no retries.
    async fn send(&self, body: &WireRequest) -> Result<ChatResponse> {
        let url = format!("{}/chat/completions", self.config.base_url);

        let response = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.config.api_key))
            .json(body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    LlmError::Timeout(format!("{:?}", self.config.timeout))
                } else {
                    LlmError::HttpError(e)
                }
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();

            return Err(match status.as_u16() {
                401 => LlmError::AuthenticationError(error_text),
                429 => LlmError::RateLimitExceeded(error_text),
                _ => LlmError::ProviderError(format!("Groq API error {status}: {error_text}")),
            });
        }

        let wire: WireResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        Self::convert_response(wire)
    }
}

#[async_trait]
impl ChatModel for GroqClient {
    async fn chat(&self, request: ChatRequest) -> Result<ChatResponse> {
        let body = WireRequest {
            model: self.config.model.clone(),
            messages: request.messages.iter().map(Self::convert_message).collect(),
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            tools: if request.tools.is_empty() {
                None
            } else {
                Some(request.tools.iter().map(Self::convert_tool).collect())
            },
            tool_choice: if request.tools.is_empty() {
                None
            } else {
                Some("auto".to_string())
            },
            stream: false,
        };

        let mut attempt: u32 = 0;
        loop {
            match self.send(&body).await {
                Ok(response) => return Ok(response),
                Err(e) if e.is_retryable() && attempt < self.config.max_retries => {
                    attempt += 1;
                    let delay = std::time::Duration::from_millis(250 * u64::from(attempt));
                    tracing::warn!(
                        error = %e,
                        attempt,
                        max_retries = self.config.max_retries,
                        "retrying Groq request"
                    );
                    tokio::time::sleep(delay).await;
                }
                Err(e) => return Err(e),
            }
        }
    }
}

// Groq wire types (OpenAI-compatible).

#[derive(Debug, Serialize)]
struct WireRequest {
    model: String,
    messages: Vec<WireMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_choice: Option<String>,
    stream: bool,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: String,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: JsonValue,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded argument object, as the wire format delivers it.
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct WireResponse {
    model: String,
    choices: Vec<WireChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: usize,
    completion_tokens: usize,
    total_tokens: usize,
}
