//! Agent executor for running the model/tool loop
//!
//! One run of the loop:
//! 1. Call the model with the conversation and the available tools
//! 2. If it asks for tools, dispatch each call and append the results
//! 3. Repeat until the model gives a final answer or the iteration cap is hit
//! 4. At the cap, ask once more without tools for the final answer

use crew_core::{Error, Result};
use crew_llm::{
    CompletionRequest, CompletionResponse, ContentBlock, Message, ModelClient, StopReason,
    TokenUsage, ToolCall, ToolDefinition,
};
use crew_tools::ToolRegistry;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_MAX_ITERATIONS: usize = 5;

/// Sent once the tool rounds are used up
const FORCE_FINAL_ANSWER: &str = "You have used all available tool calls. \
Give your best final answer now, based only on the information gathered so far.";

/// Model settings for one agent
#[derive(Debug, Clone)]
pub struct ExecutorConfig {
    /// Tool rounds allowed before the answer is forced
    pub max_iterations: usize,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl Default for ExecutorConfig {
    fn default() -> Self {
        Self {
            max_iterations: DEFAULT_MAX_ITERATIONS,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1500,
            temperature: Some(0.2),
        }
    }
}

/// What a finished loop produced
#[derive(Debug, Clone)]
pub struct Execution {
    pub output: String,
    pub iterations: usize,
    pub usage: TokenUsage,
}

/// Drives the model/tool loop for an agent
pub struct AgentExecutor {
    model: Arc<dyn ModelClient>,
    config: ExecutorConfig,
}

impl AgentExecutor {
    pub fn new(model: Arc<dyn ModelClient>, config: ExecutorConfig) -> Self {
        Self { model, config }
    }

    pub fn config(&self) -> &ExecutorConfig {
        &self.config
    }

    /// Run the loop to a final answer
    ///
    /// Up to `max_iterations` rounds may end in tool calls. After that the
    /// model is asked once more, without tools, for its final answer.
    ///
    /// Fatal tool errors (see [`Error::is_fatal`]) abort immediately; other
    /// tool errors are reported to the model so it can adjust its call.
    pub async fn run(&self, tools: &ToolRegistry, system: String, prompt: String) -> Result<Execution> {
        let definitions = tools.definitions();
        let mut conversation = vec![Message::user(prompt)];
        let mut usage = TokenUsage::default();

        for iteration in 1..=self.config.max_iterations {
            debug!(
                iteration,
                max_iterations = self.config.max_iterations,
                "Agent iteration started"
            );

            let response = self
                .complete(&system, &conversation, definitions.clone(), iteration)
                .await?;
            usage += response.usage;

            if response.message.has_tool_calls() {
                let results = self.execute_tools(tools, &response.message.tool_calls()).await?;
                conversation.push(response.message);
                conversation.push(Message::tool_results(results));
                continue;
            }

            let output = final_answer(response)?;
            info!(iteration, output_length = output.len(), "Agent completed");
            return Ok(Execution {
                output,
                iterations: iteration,
                usage,
            });
        }

        let iteration = self.config.max_iterations + 1;
        warn!(
            max_iterations = self.config.max_iterations,
            "Iteration cap reached, forcing a final answer"
        );
        conversation.push(Message::user(FORCE_FINAL_ANSWER));

        let response = self.complete(&system, &conversation, Vec::new(), iteration).await?;
        usage += response.usage;
        if response.message.has_tool_calls() {
            return Err(Error::GenerationFailure(format!(
                "No final answer after {} tool rounds",
                self.config.max_iterations
            )));
        }

        let output = final_answer(response)?;
        info!(iteration, output_length = output.len(), "Agent completed after forced answer");
        Ok(Execution {
            output,
            iterations: iteration,
            usage,
        })
    }

    async fn complete(
        &self,
        system: &str,
        conversation: &[Message],
        definitions: Vec<ToolDefinition>,
        iteration: usize,
    ) -> Result<CompletionResponse> {
        let request = CompletionRequest::builder(&self.config.model)
            .system(system)
            .messages(conversation.to_vec())
            .max_tokens(self.config.max_tokens)
            .tools(definitions);
        let request = match self.config.temperature {
            Some(t) => request.temperature(t),
            None => request,
        }
        .build();

        let response = self.model.complete(request).await?;
        info!(
            provider = self.model.name(),
            iteration,
            stop_reason = ?response.stop_reason,
            input_tokens = response.usage.input_tokens,
            output_tokens = response.usage.output_tokens,
            "Model response received"
        );
        Ok(response)
    }

    async fn execute_tools(
        &self,
        tools: &ToolRegistry,
        calls: &[&ToolCall],
    ) -> Result<Vec<ContentBlock>> {
        let mut results = Vec::with_capacity(calls.len());

        for call in calls {
            let started = Instant::now();
            match tools.dispatch(call).await {
                Ok(value) => {
                    let content = render_tool_output(&value);
                    info!(
                        tool = %call.name,
                        duration_ms = started.elapsed().as_millis() as u64,
                        result_length = content.len(),
                        "Tool execution succeeded"
                    );
                    results.push(ContentBlock::tool_result(&call.id, content));
                }
                Err(e) if e.is_fatal() => {
                    warn!(tool = %call.name, error = %e, "Tool failed, aborting agent");
                    return Err(e);
                }
                Err(e) => {
                    warn!(tool = %call.name, error = %e, "Tool failed, reporting to model");
                    results.push(ContentBlock::tool_error(&call.id, e.to_string()));
                }
            }
        }

        Ok(results)
    }
}

/// Strings go to the model verbatim, anything else as pretty JSON
fn render_tool_output(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => serde_json::to_string_pretty(other).unwrap_or_else(|_| other.to_string()),
    }
}

fn final_answer(response: CompletionResponse) -> Result<String> {
    let text = response.message.text().map(|t| t.trim().to_string());

    match (response.stop_reason, text) {
        (StopReason::ContentFiltered, _) => Err(Error::GenerationFailure(
            "Model output was withheld by the provider's content filter".into(),
        )),
        (StopReason::ToolUse, _) => Err(Error::GenerationFailure(
            "Model requested tool use without any tool call".into(),
        )),
        (StopReason::MaxTokens, Some(text)) if !text.is_empty() => {
            warn!("Final answer truncated at max tokens");
            Ok(text)
        }
        (_, Some(text)) if !text.is_empty() => Ok(text),
        _ => Err(Error::GenerationFailure(
            "Model returned an empty answer".into(),
        )),
    }
}
