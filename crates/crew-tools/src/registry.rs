//! Per-agent tool set

use crate::Tool;
use crew_core::{Error, Result};
use crew_llm::{ToolCall, ToolDefinition};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Tools bound to one agent
///
/// Built once at startup and read-only afterwards. Definitions are listed in
/// registration order so requests to the model are reproducible.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    order: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a tool; names must be unique
    pub fn register(&mut self, tool: Arc<dyn Tool>) -> Result<()> {
        let name = tool.name().to_string();
        if self.by_name.contains_key(&name) {
            return Err(Error::Configuration(format!(
                "Tool '{name}' is already registered"
            )));
        }
        self.by_name.insert(name, self.order.len());
        self.order.push(tool);
        Ok(())
    }

    /// Builder-style [`ToolRegistry::register`]
    pub fn with(mut self, tool: Arc<dyn Tool>) -> Result<Self> {
        self.register(tool)?;
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.by_name.get(name).map(|&i| Arc::clone(&self.order[i]))
    }

    pub fn names(&self) -> Vec<&str> {
        self.order.iter().map(|t| t.name()).collect()
    }

    pub fn definitions(&self) -> Vec<ToolDefinition> {
        self.order.iter().map(|t| t.definition()).collect()
    }

    /// Route a model tool call to the named tool
    ///
    /// An unknown name is a [`Error::ProcessingFailed`], which the agent loop
    /// reports back to the model.
    pub async fn dispatch(&self, call: &ToolCall) -> Result<Value> {
        let tool = self.get(&call.name).ok_or_else(|| {
            Error::ProcessingFailed(format!(
                "Unknown tool '{}'. Available tools: {}",
                call.name,
                self.names().join(", ")
            ))
        })?;
        debug!(tool = %call.name, call_id = %call.id, "dispatching tool call");
        tool.execute(call.input.clone()).await
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
