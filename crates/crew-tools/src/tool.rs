//! Tool trait definition

use async_trait::async_trait;
use crew_core::{Error, Result};
use crew_llm::ToolDefinition;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// A capability the model can invoke during an agent run
///
/// Errors returned from [`Tool::execute`] are classified by the agent loop:
/// fatal kinds such as [`Error::DataUnavailable`] abort the run, anything
/// else goes back to the model as a failed tool result.
#[async_trait]
pub trait Tool: Send + Sync {
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Unique within a registry
    fn name(&self) -> &str;

    /// Tells the model when to call this tool
    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    fn input_schema(&self) -> Value;

    fn definition(&self) -> ToolDefinition {
        ToolDefinition::new(self.name(), self.description(), self.input_schema())
    }
}

/// Decode tool arguments into a typed input struct
///
/// Failures are [`Error::ProcessingFailed`] so the model can retry with
/// corrected arguments.
pub fn decode_input<T: DeserializeOwned>(tool: &str, params: Value) -> Result<T> {
    serde_json::from_value(params)
        .map_err(|e| Error::ProcessingFailed(format!("Invalid parameters for {tool}: {e}")))
}
