//! Scripted model client for tests
//!
//! [`ScriptedModel`] answers requests either from a queue of canned responses
//! or from a responder closure, and records every request it receives.

use crate::{
    CompletionRequest, CompletionResponse, ContentBlock, LLMError, Message, ModelClient, Result,
    StopReason, TokenUsage, ToolCall,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard, PoisonError};

type Responder = dyn Fn(&CompletionRequest) -> Result<CompletionResponse> + Send + Sync;

enum Script {
    Queue(Mutex<VecDeque<Result<CompletionResponse>>>),
    Responder(Box<Responder>),
}

/// A [`ModelClient`] that never touches the network
pub struct ScriptedModel {
    script: Script,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedModel {
    /// Answer requests with `responses`, in order; running dry is an error
    pub fn new(responses: impl IntoIterator<Item = CompletionResponse>) -> Self {
        Self {
            script: Script::Queue(Mutex::new(responses.into_iter().map(Ok).collect())),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Answer every request with `error()`
    pub fn failing(error: fn() -> LLMError) -> Self {
        Self::with_responder(move |_| Err(error()))
    }

    /// Compute each answer from the request
    pub fn with_responder<F>(responder: F) -> Self
    where
        F: Fn(&CompletionRequest) -> Result<CompletionResponse> + Send + Sync + 'static,
    {
        Self {
            script: Script::Responder(Box::new(responder)),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Every request received so far
    pub fn requests(&self) -> Vec<CompletionRequest> {
        lock(&self.requests).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.requests).len()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl ModelClient for ScriptedModel {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse> {
        let reply = match &self.script {
            Script::Queue(queue) => lock(queue).pop_front().unwrap_or_else(|| {
                Err(LLMError::UnexpectedResponse(
                    "scripted model has no responses left".into(),
                ))
            }),
            Script::Responder(responder) => responder(&request),
        };
        lock(&self.requests).push(request);
        reply
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

/// Final-answer response with the given text
pub fn text_response(text: impl Into<String>) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant(text),
        stop_reason: StopReason::EndTurn,
        usage: TokenUsage {
            input_tokens: 10,
            output_tokens: 10,
        },
    }
}

/// Response requesting a single tool call
pub fn tool_call_response(
    id: impl Into<String>,
    name: impl Into<String>,
    input: serde_json::Value,
) -> CompletionResponse {
    tool_calls_response(vec![ToolCall::new(id, name, input)])
}

/// Response requesting several tool calls in one turn
pub fn tool_calls_response(calls: Vec<ToolCall>) -> CompletionResponse {
    CompletionResponse {
        message: Message::assistant_blocks(calls.into_iter().map(ContentBlock::ToolUse).collect()),
        stop_reason: StopReason::ToolUse,
        usage: TokenUsage {
            input_tokens: 10,
            output_tokens: 5,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(text: &str) -> CompletionRequest {
        CompletionRequest::builder("test-model")
            .add_message(Message::user(text))
            .build()
    }

    #[tokio::test]
    async fn test_queue_in_order_then_dry() {
        let model = ScriptedModel::new(vec![
            tool_call_response("c1", "stock_price", json!({"ticker": "AAPL"})),
            text_response("done"),
        ]);

        let first = model.complete(request("a")).await.unwrap();
        assert_eq!(first.stop_reason, StopReason::ToolUse);
        let second = model.complete(request("b")).await.unwrap();
        assert_eq!(second.message.text().as_deref(), Some("done"));
        assert!(model.complete(request("c")).await.is_err());

        assert_eq!(model.call_count(), 3);
        assert_eq!(model.requests()[1].first_user_text().as_deref(), Some("b"));
    }

    #[tokio::test]
    async fn test_responder_sees_request() {
        let model = ScriptedModel::with_responder(|req| {
            Ok(text_response(format!(
                "echo: {}",
                req.first_user_text().unwrap_or_default()
            )))
        });

        let reply = model.complete(request("hi")).await.unwrap();
        assert_eq!(reply.message.text().as_deref(), Some("echo: hi"));
    }

    #[tokio::test]
    async fn test_failing() {
        let model = ScriptedModel::failing(|| LLMError::AuthenticationFailed);
        assert!(matches!(
            model.complete(request("x")).await,
            Err(LLMError::AuthenticationFailed)
        ));
        assert_eq!(model.call_count(), 1);
    }
}
