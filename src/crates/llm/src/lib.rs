//! LLM provider client for sheetgate.
//!
//! This crate is the black-box boundary to the hosted language model: a
//! minimal [`ChatModel`] trait, the chat/tool-call types it speaks, typed
//! errors, and a concrete client for Groq's OpenAI-compatible API with
//! function calling.
//!
//! The rest of the system never assumes low latency from a `ChatModel`:
//! callers wrap `chat()` in their own timeout and treat every failure as a
//! typed, recoverable condition.
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
//! let request = ChatRequest::new(vec![Message::human("Hello!")]);
//! let response = client.chat(request).await?;
//! ```

pub mod chat;
pub mod config;
pub mod error;
pub mod remote;
pub mod tools;

pub use chat::{ChatModel, ChatRequest, ChatResponse, Message, MessageRole, UsageMetadata};
pub use config::RemoteLlmConfig;
pub use error::{LlmError, Result};
pub use tools::{ToolCall, ToolDefinition};
