//! Language model client layer for stock-crew
//!
//! Provider-agnostic types for talking to a hosted chat model:
//!
//! - Messages with text, tool-call and tool-result blocks
//! - Completion request/response types
//! - Tool definitions for function calling
//! - The [`ModelClient`] trait and an OpenAI-compatible implementation
//! - `test_support::ScriptedModel` for driving agents in tests (`test-support` feature)

pub mod client;
pub mod completion;
pub mod error;
pub mod messages;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
pub mod tools;

// Re-export main types
pub use client::ModelClient;
pub use completion::{CompletionRequest, CompletionResponse, StopReason, TokenUsage};
pub use error::{LLMError, Result};
pub use messages::{ContentBlock, Message, Role, ToolCall};
pub use tools::ToolDefinition;

#[cfg(feature = "openai")]
pub mod providers;
