//! Model client trait definition

use crate::{CompletionRequest, CompletionResponse, Result};
use async_trait::async_trait;

/// A hosted chat model
///
/// Implementations turn a [`CompletionRequest`] (system prompt, conversation,
/// tool definitions) into the assistant's next message.
#[async_trait]
pub trait ModelClient: Send + Sync {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse>;

    /// Short provider label used in logs (e.g. "openai")
    fn name(&self) -> &str;
}
