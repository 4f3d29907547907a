//! The intent resolver: one command in, one validated action out.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use actions::{Action, SchemaMode};
use llm::{ChatModel, ChatRequest, ChatResponse, Message, ToolDefinition};

use crate::error::{ResolverError, Result};
use crate::prompt;

/// Default budget for one resolution call.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the resolved action will be consumed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveTarget {
    /// Executed locally against a configured file; descriptor-only tools are
    /// not offered.
    Local,
    /// Serialized as a descriptor for the named workbook's front end; the
    /// full vocabulary is offered.
    Delegated {
        /// Name of the workbook open in the remote front end.
        workbook_name: String,
    },
}

impl ResolveTarget {
    fn schema_mode(&self) -> SchemaMode {
        match self {
            ResolveTarget::Local => SchemaMode::Local,
            ResolveTarget::Delegated { .. } => SchemaMode::Delegated,
        }
    }
}

/// Maps free text to exactly one [`Action`].
#[async_trait]
pub trait IntentResolver: Send + Sync {
    /// Resolve `command` into one action for `target`.
    async fn resolve(&self, command: &str, target: &ResolveTarget) -> Result<Action>;
}

/// [`IntentResolver`] backed by a function-calling chat model.
pub struct LlmResolver {
    model: Arc<dyn ChatModel>,
    timeout: Duration,
}

impl LlmResolver {
    /// Create a resolver over the given model with the default timeout.
    pub fn new(model: Arc<dyn ChatModel>) -> Self {
        Self {
            model,
            timeout: DEFAULT_RESOLVE_TIMEOUT,
        }
    }

    /// Set the per-call resolution timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl IntentResolver for LlmResolver {
    async fn resolve(&self, command: &str, target: &ResolveTarget) -> Result<Action> {
        let mode = target.schema_mode();

        let text = match target {
            ResolveTarget::Local => command.to_string(),
            ResolveTarget::Delegated { workbook_name } => {
                format!("For the workbook named '{workbook_name}', please {command}")
            }
        };

        let request = ChatRequest::new(vec![
            Message::system(prompt::system_prompt(mode)),
            Message::human(text),
        ])
        .with_temperature(0.0)
        .with_tools(tool_definitions(mode));

        let response = tokio::time::timeout(self.timeout, self.model.chat(request))
            .await
            .map_err(|_| ResolverError::Timeout(self.timeout))?
            .map_err(ResolverError::Model)?;

        let action = select_action(&response)?;
        tracing::info!(action = action.name(), "resolved command");
        Ok(action)
    }
}

/// Build the model-facing tool definitions for a schema mode.
pub fn tool_definitions(mode: SchemaMode) -> Vec<ToolDefinition> {
    actions::tool_specs(mode)
        .into_iter()
        .map(|spec| {
            ToolDefinition::new(spec.name, spec.description).with_parameters(spec.parameters)
        })
        .collect()
}

/// Consume a chat response into exactly one action.
///
/// Selection rules, in order:
/// 1. the first tool call that validates to a *concrete* action wins;
/// 2. otherwise the first validated fallback (`inform_user`) is used;
/// 3. otherwise non-empty text content becomes an `inform_user`;
/// 4. otherwise the resolution failed.
///
/// Any tool call that fails validation aborts resolution; a malformed write
/// payload must never fall through to a weaker interpretation.
fn select_action(response: &ChatResponse) -> Result<Action> {
    let mut fallback: Option<Action> = None;

    for call in response.message.tool_calls() {
        let action = actions::from_tool_call(&call.name, &call.arguments)?;
        if action.is_fallback() {
            fallback.get_or_insert(action);
        } else {
            return Ok(action);
        }
    }

    if let Some(action) = fallback {
        return Ok(action);
    }

    let text = response.message.content.trim();
    if !text.is_empty() {
        return Ok(Action::inform_user(text));
    }

    Err(ResolverError::EmptyResponse)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actions::ActionError;
    use llm::{LlmError, ToolCall, UsageMetadata};
    use serde_json::json;
    use std::sync::Mutex;

    /// Mock model: records the request, replies with a canned response.
    struct MockModel {
        response: Box<dyn Fn() -> llm::Result<ChatResponse> + Send + Sync>,
        seen: Mutex<Vec<ChatRequest>>,
    }

    impl MockModel {
        fn replying(message: Message) -> Arc<Self> {
            Arc::new(Self {
                response: Box::new(move || {
                    Ok(ChatResponse {
                        message: message.clone(),
                        usage: Some(UsageMetadata {
                            input_tokens: 1,
                            output_tokens: 1,
                            total_tokens: 2,
                        }),
                        model: None,
                        finish_reason: None,
                    })
                }),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn failing(error: fn() -> LlmError) -> Arc<Self> {
            Arc::new(Self {
                response: Box::new(move || Err(error())),
                seen: Mutex::new(Vec::new()),
            })
        }

        fn last_request(&self) -> ChatRequest {
            self.seen.lock().unwrap().last().cloned().unwrap()
        }
    }

    #[async_trait]
    impl ChatModel for MockModel {
        async fn chat(&self, request: ChatRequest) -> llm::Result<ChatResponse> {
            self.seen.lock().unwrap().push(request);
            (self.response)()
        }
    }

    fn call(name: &str, args: serde_json::Value) -> ToolCall {
        ToolCall::new("call_1", name, args)
    }

    #[tokio::test]
    async fn test_single_tool_call_resolves() {
        let model = MockModel::replying(Message::assistant("").with_tool_calls(vec![call(
            "read_cell",
            json!({"sheet_name": "Sheet1", "cell_address": "A1"}),
        )]));
        let resolver = LlmResolver::new(model);

        let action = resolver
            .resolve("what is in A1?", &ResolveTarget::Local)
            .await
            .unwrap();
        assert_eq!(action.name(), "read_cell");
    }

    #[tokio::test]
    async fn test_concrete_action_beats_inform_user() {
        // Fallback first, concrete second: the concrete one must win.
        let model = MockModel::replying(Message::assistant("").with_tool_calls(vec![
            ToolCall::new("call_1", "inform_user", json!({"message": "Working on it"})),
            ToolCall::new(
                "call_2",
                "write_cell",
                json!({"sheet_name": "Sheet1", "cell_address": "C1", "value": "Done"}),
            ),
        ]));
        let resolver = LlmResolver::new(model);

        let action = resolver
            .resolve("write Done to C1", &ResolveTarget::Local)
            .await
            .unwrap();
        assert_eq!(action.name(), "write_cell");
    }

    #[tokio::test]
    async fn test_lone_inform_user_is_kept() {
        let model = MockModel::replying(Message::assistant("").with_tool_calls(vec![call(
            "inform_user",
            json!({"message": "That isn't a spreadsheet request."}),
        )]));
        let resolver = LlmResolver::new(model);

        let action = resolver
            .resolve("tell me a joke", &ResolveTarget::Local)
            .await
            .unwrap();
        assert_eq!(
            action,
            Action::inform_user("That isn't a spreadsheet request.")
        );
    }

    #[tokio::test]
    async fn test_plain_text_becomes_inform_user() {
        let model = MockModel::replying(Message::assistant("I can only edit spreadsheets."));
        let resolver = LlmResolver::new(model);

        let action = resolver
            .resolve("what's the weather?", &ResolveTarget::Local)
            .await
            .unwrap();
        assert_eq!(action, Action::inform_user("I can only edit spreadsheets."));
    }

    #[tokio::test]
    async fn test_empty_response_is_an_error() {
        let model = MockModel::replying(Message::assistant("  "));
        let resolver = LlmResolver::new(model);

        let result = resolver.resolve("do something", &ResolveTarget::Local).await;
        assert!(matches!(result, Err(ResolverError::EmptyResponse)));
    }

    #[tokio::test]
    async fn test_invalid_arguments_abort_resolution() {
        let model = MockModel::replying(Message::assistant("").with_tool_calls(vec![call(
            "write_range",
            json!({
                "sheet_name": "Sheet1",
                "start_cell_address": "A1",
                "values_json": "not valid json",
            }),
        )]));
        let resolver = LlmResolver::new(model);

        let result = resolver.resolve("write stuff", &ResolveTarget::Local).await;
        assert!(matches!(
            result,
            Err(ResolverError::InvalidAction(ActionError::InvalidParameters(_)))
        ));
    }

    #[tokio::test]
    async fn test_unknown_tool_aborts_resolution() {
        let model = MockModel::replying(
            Message::assistant("").with_tool_calls(vec![call("delete_sheet", json!({}))]),
        );
        let resolver = LlmResolver::new(model);

        let result = resolver.resolve("delete Sheet2", &ResolveTarget::Local).await;
        assert!(matches!(
            result,
            Err(ResolverError::InvalidAction(ActionError::UnknownAction(_)))
        ));
    }

    #[tokio::test]
    async fn test_model_failure_is_reported() {
        let model = MockModel::failing(|| LlmError::ProviderError("boom".into()));
        let resolver = LlmResolver::new(model);

        let result = resolver.resolve("anything", &ResolveTarget::Local).await;
        assert!(matches!(result, Err(ResolverError::Model(_))));
    }

    #[tokio::test]
    async fn test_slow_model_hits_timeout() {
        struct SlowModel;

        #[async_trait]
        impl ChatModel for SlowModel {
            async fn chat(&self, _request: ChatRequest) -> llm::Result<ChatResponse> {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(ChatResponse {
                    message: Message::assistant("too late"),
                    usage: None,
                    model: None,
                    finish_reason: None,
                })
            }
        }

        let resolver = LlmResolver::new(Arc::new(SlowModel)).with_timeout(Duration::from_millis(5));
        let result = resolver.resolve("anything", &ResolveTarget::Local).await;
        assert!(matches!(result, Err(ResolverError::Timeout(_))));
    }

    #[tokio::test]
    async fn test_delegated_target_formats_command_and_offers_full_vocabulary() {
        let model = MockModel::replying(Message::assistant("").with_tool_calls(vec![call(
            "get_sheet_names",
            json!({"workbook_name": "Budget.xlsx"}),
        )]));
        let resolver = LlmResolver::new(model.clone());

        let target = ResolveTarget::Delegated {
            workbook_name: "Budget.xlsx".into(),
        };
        let action = resolver.resolve("list the sheets", &target).await.unwrap();
        assert_eq!(action.workbook_name(), Some("Budget.xlsx"));

        let request = model.last_request();
        assert_eq!(
            request.messages[1].content,
            "For the workbook named 'Budget.xlsx', please list the sheets"
        );
        assert!(request.tools.iter().any(|t| t.name == "create_bar_chart"));
    }

    #[tokio::test]
    async fn test_local_target_offers_trimmed_vocabulary() {
        let model = MockModel::replying(Message::assistant("").with_tool_calls(vec![call(
            "get_sheet_names",
            json!({}),
        )]));
        let resolver = LlmResolver::new(model.clone());

        resolver
            .resolve("list the sheets", &ResolveTarget::Local)
            .await
            .unwrap();

        let request = model.last_request();
        assert!(request.tools.iter().all(|t| t.name != "create_bar_chart"));
        assert!(request.tools.iter().any(|t| t.name == "inform_user"));
    }
}
