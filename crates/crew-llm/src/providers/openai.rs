//! OpenAI-compatible chat completions client
//!
//! Speaks the `/chat/completions` wire format, so it also works against
//! Azure OpenAI or a local OpenAI-compatible server via a custom base URL.
//!
//! ```no_run
//! use crew_llm::{CompletionRequest, Message, ModelClient};
//! use crew_llm::providers::{OpenAIClient, OpenAIConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let client = OpenAIClient::with_config(OpenAIConfig::new("sk-...").with_timeout(60))?;
//! let request = CompletionRequest::builder("gpt-3.5-turbo")
//!     .add_message(Message::user("Is AAPL trending up?"))
//!     .build();
//! let response = client.complete(request).await?;
//! println!("{:?}", response.message.text());
//! # Ok(())
//! # }
//! ```

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, Message, ModelClient, Result,
    Role, StopReason, TokenUsage, ToolCall, ToolDefinition,
};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

pub const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Connection settings for [`OpenAIClient`]
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    /// Base URL without the trailing `/chat/completions`
    pub api_base: String,
    pub timeout_secs: u64,
}

impl OpenAIConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            api_base: DEFAULT_API_BASE.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Read `OPENAI_API_KEY` and the optional `OPENAI_API_BASE`
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                LLMError::ConfigurationError("OPENAI_API_KEY environment variable not set".into())
            })?;

        let mut config = Self::new(api_key);
        if let Ok(base) = std::env::var("OPENAI_API_BASE") {
            config = config.with_api_base(base);
        }
        Ok(config)
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }
}

/// Client for OpenAI-compatible chat completion endpoints
pub struct OpenAIClient {
    client: Client,
    config: OpenAIConfig,
}

impl OpenAIClient {
    pub fn with_config(config: OpenAIConfig) -> Result<Self> {
        if config.api_key.trim().is_empty() {
            return Err(LLMError::ConfigurationError("API key is empty".into()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(OpenAIConfig::new(api_key))
    }

    pub fn from_env() -> Result<Self> {
        Self::with_config(OpenAIConfig::from_env()?)
    }

    pub fn config(&self) -> &OpenAIConfig {
        &self.config
    }
}

#[async_trait]
impl ModelClient for OpenAIClient {
    #[instrument(skip(self, request), fields(model = %request.model, tools = request.tools.len()))]
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let model = request.model.clone();
        let body = ChatRequest {
            model: request.model,
            messages: to_wire_messages(request.system, request.messages),
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            tools: (!request.tools.is_empty()).then(|| to_wire_tools(&request.tools)),
        };

        let response = self
            .client
            .post(self.config.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "model request rejected");
            return Err(match status.as_u16() {
                401 | 403 => LLMError::AuthenticationFailed,
                429 => LLMError::RateLimitExceeded(error_text),
                400 => LLMError::InvalidRequest(error_text),
                404 => LLMError::ModelNotFound(model),
                _ => LLMError::RequestFailed(format!("HTTP {status}: {error_text}")),
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| LLMError::UnexpectedResponse(format!("Failed to parse response: {e}")))?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| LLMError::UnexpectedResponse("No choices in response".into()))?;

        let usage = parsed.usage.map_or_else(TokenUsage::default, |u| TokenUsage {
            input_tokens: u.prompt_tokens,
            output_tokens: u.completion_tokens,
        });

        debug!(
            finish_reason = %choice.finish_reason,
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "model responded"
        );

        Ok(CompletionResponse {
            message: from_wire_message(choice.message)?,
            stop_reason: map_finish_reason(&choice.finish_reason),
            usage,
        })
    }

    fn name(&self) -> &str {
        "openai"
    }
}

// Wire types

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<WireMessage>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
}

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tool_calls: Vec<WireToolCall>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

impl WireMessage {
    fn text(role: &'static str, content: String) -> Self {
        Self {
            role,
            content: Some(content),
            tool_calls: Vec::new(),
            tool_call_id: None,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireTool {
    #[serde(rename = "type")]
    kind: &'static str,
    function: WireFunction,
}

#[derive(Debug, Serialize)]
struct WireFunction {
    name: String,
    description: String,
    parameters: serde_json::Value,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type", default = "function_kind")]
    kind: String,
    function: WireFunctionCall,
}

fn function_kind() -> String {
    "function".to_string()
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    /// JSON-encoded arguments
    arguments: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<WireUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: WireResponseMessage,
    #[serde(default)]
    finish_reason: String,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    #[serde(default)]
    tool_calls: Vec<WireToolCall>,
}

#[derive(Debug, Deserialize)]
struct WireUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

// Conversion

/// System prompt first, then each message; a message may expand into several
/// wire messages because every tool result is its own `tool` message.
fn to_wire_messages(system: Option<String>, messages: Vec<Message>) -> Vec<WireMessage> {
    let mut wire = Vec::with_capacity(messages.len() + 1);
    if let Some(system) = system {
        wire.push(WireMessage::text("system", system));
    }
    for message in messages {
        wire.extend(to_wire(message));
    }
    wire
}

fn to_wire(message: Message) -> Vec<WireMessage> {
    let role = match message.role {
        Role::User => "user",
        Role::Assistant => "assistant",
    };

    let mut texts = Vec::new();
    let mut tool_calls = Vec::new();
    let mut results = Vec::new();

    for block in message.content {
        match block {
            ContentBlock::Text { text } => texts.push(text),
            ContentBlock::ToolUse(call) => tool_calls.push(WireToolCall {
                id: call.id,
                kind: function_kind(),
                function: WireFunctionCall {
                    name: call.name,
                    arguments: call.input.to_string(),
                },
            }),
            ContentBlock::ToolResult {
                tool_use_id,
                content,
                is_error,
            } => {
                let content = if is_error {
                    format!("Error: {content}")
                } else {
                    content
                };
                results.push(WireMessage {
                    role: "tool",
                    content: Some(content),
                    tool_calls: Vec::new(),
                    tool_call_id: Some(tool_use_id),
                });
            }
        }
    }

    let mut wire = Vec::new();
    if !texts.is_empty() || !tool_calls.is_empty() {
        wire.push(WireMessage {
            role,
            content: (!texts.is_empty()).then(|| texts.join("\n")),
            tool_calls,
            tool_call_id: None,
        });
    }
    wire.extend(results);
    wire
}

fn to_wire_tools(tools: &[ToolDefinition]) -> Vec<WireTool> {
    tools
        .iter()
        .map(|tool| WireTool {
            kind: "function",
            function: WireFunction {
                name: tool.name.clone(),
                description: tool.description.clone(),
                parameters: tool.input_schema.clone(),
            },
        })
        .collect()
}

fn from_wire_message(message: WireResponseMessage) -> Result<Message> {
    let mut content = Vec::new();

    if let Some(text) = message.content.filter(|t| !t.is_empty()) {
        content.push(ContentBlock::Text { text });
    }

    for call in message.tool_calls {
        let input = if call.function.arguments.trim().is_empty() {
            serde_json::Value::Object(serde_json::Map::new())
        } else {
            serde_json::from_str(&call.function.arguments).map_err(|e| {
                LLMError::UnexpectedResponse(format!(
                    "Tool arguments for {} are not JSON: {e}",
                    call.function.name
                ))
            })?
        };
        content.push(ContentBlock::ToolUse(ToolCall {
            id: call.id,
            name: call.function.name,
            input,
        }));
    }

    Ok(Message::assistant_blocks(content))
}

fn map_finish_reason(reason: &str) -> StopReason {
    match reason {
        "stop" => StopReason::EndTurn,
        "length" => StopReason::MaxTokens,
        "tool_calls" | "function_call" => StopReason::ToolUse,
        "content_filter" => StopReason::ContentFiltered,
        other => {
            debug!(finish_reason = other, "unknown finish reason, treating as end of turn");
            StopReason::EndTurn
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_creation() {
        let client = OpenAIClient::new("test-key").unwrap();
        assert_eq!(client.name(), "openai");
        assert_eq!(client.config().api_base, DEFAULT_API_BASE);
        assert_eq!(
            client.config().endpoint(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_empty_key_rejected() {
        assert!(matches!(
            OpenAIClient::new("  "),
            Err(LLMError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_custom_base_trims_slash() {
        let config = OpenAIConfig::new("k")
            .with_api_base("http://localhost:8000/v1/")
            .with_timeout(30);
        assert_eq!(config.endpoint(), "http://localhost:8000/v1/chat/completions");
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn test_system_prompt_goes_first() {
        let wire = to_wire_messages(
            Some("You are Senior stock news Analyst.".into()),
            vec![Message::user("Summarize AAPL news")],
        );

        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].role, "system");
        assert_eq!(wire[1].role, "user");
        assert_eq!(wire[1].content.as_deref(), Some("Summarize AAPL news"));
    }

    #[test]
    fn test_assistant_tool_call_conversion() {
        let msg = Message::assistant_blocks(vec![ContentBlock::ToolUse(ToolCall::new(
            "call_1",
            "stock_price",
            json!({"ticker": "AAPL"}),
        ))]);

        let wire = to_wire(msg);
        assert_eq!(wire.len(), 1);
        assert_eq!(wire[0].role, "assistant");
        assert!(wire[0].content.is_none());
        assert_eq!(wire[0].tool_calls[0].function.name, "stock_price");
        assert_eq!(
            wire[0].tool_calls[0].function.arguments,
            r#"{"ticker":"AAPL"}"#
        );
    }

    #[test]
    fn test_tool_results_become_tool_messages() {
        let msg = Message::tool_results(vec![
            ContentBlock::tool_result("call_1", "close 220.1"),
            ContentBlock::tool_error("call_2", "unknown tool"),
        ]);

        let wire = to_wire(msg);
        assert_eq!(wire.len(), 2);
        assert!(wire.iter().all(|m| m.role == "tool"));
        assert_eq!(wire[0].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(wire[1].content.as_deref(), Some("Error: unknown tool"));
    }

    #[test]
    fn test_tool_definition_conversion() {
        let tool = ToolDefinition::new("news_search", "Search news", json!({"type": "object"}));
        let wire = to_wire_tools(&[tool]);
        assert_eq!(wire[0].kind, "function");
        assert_eq!(wire[0].function.name, "news_search");
    }

    #[test]
    fn test_parse_response_with_tool_calls() {
        let raw = json!({
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {"name": "news_search", "arguments": "{\"query\":\"BTC\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        });

        let parsed: ChatResponse = serde_json::from_value(raw).unwrap();
        let choice = parsed.choices.into_iter().next().unwrap();
        assert_eq!(map_finish_reason(&choice.finish_reason), StopReason::ToolUse);

        let message = from_wire_message(choice.message).unwrap();
        let calls = message.tool_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].name, "news_search");
        assert_eq!(calls[0].input["query"], "BTC");
    }

    #[test]
    fn test_malformed_tool_arguments() {
        let message = WireResponseMessage {
            content: None,
            tool_calls: vec![WireToolCall {
                id: "c".into(),
                kind: function_kind(),
                function: WireFunctionCall {
                    name: "stock_price".into(),
                    arguments: "{not json".into(),
                },
            }],
        };
        assert!(matches!(
            from_wire_message(message),
            Err(LLMError::UnexpectedResponse(_))
        ));
    }

    #[test]
    fn test_finish_reason_mapping() {
        assert_eq!(map_finish_reason("stop"), StopReason::EndTurn);
        assert_eq!(map_finish_reason("length"), StopReason::MaxTokens);
        assert_eq!(map_finish_reason("content_filter"), StopReason::ContentFiltered);
        assert_eq!(map_finish_reason("something_new"), StopReason::EndTurn);
    }
}
