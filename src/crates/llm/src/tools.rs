//! Tool calling abstractions for function-calling models.
//!
//! A [`ToolDefinition`] describes a function to the model; a [`ToolCall`] is
//! the model's request to invoke one. The application validates and executes
//! calls itself; nothing here runs code.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Definition of a tool/function that an LLM can call.
///
/// The `parameters` field is a JSON Schema object describing the function's
/// parameters; the model uses the name and description to decide when to call
/// the tool, and the schema to shape its arguments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolDefinition {
    /// Unique tool name (snake_case, e.g. "read_cell").
    pub name: String,

    /// What the tool does and when to use it.
    pub description: String,

    /// JSON Schema for the tool's parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<JsonValue>,
}

impl ToolDefinition {
    /// Create a new tool definition with name and description.
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters: None,
        }
    }

    /// Add a JSON Schema for the tool's parameters.
    pub fn with_parameters(mut self, parameters: JsonValue) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

/// A request from the model to call a specific tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    /// Provider-generated identifier for this call.
    pub id: String,

    /// The name of the tool to call; matches a [`ToolDefinition::name`].
    pub name: String,

    /// Arguments as a JSON object matching the tool's schema. Validated by
    /// the application before use.
    pub arguments: JsonValue,
}

impl ToolCall {
    /// Create a new tool call.
    pub fn new(id: impl Into<String>, name: impl Into<String>, arguments: JsonValue) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }
}
