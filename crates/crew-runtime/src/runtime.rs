//! Runtime holding the shared model client
//!
//! The AgentRuntime owns the model client and the default model settings,
//! and builds [`RoleAgent`]s that share them.

use crew_core::{Error, Result};
use crew_llm::ModelClient;
use crew_tools::ToolRegistry;
use std::sync::Arc;

use crate::agent::{AgentConfig, RoleAgent};
use crate::executor::{DEFAULT_MODEL, ExecutorConfig};

/// Model settings shared by every agent of a runtime
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub model: String,
    pub max_tokens: u32,
    pub temperature: Option<f32>,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let executor = ExecutorConfig::default();
        Self {
            model: DEFAULT_MODEL.to_string(),
            max_tokens: executor.max_tokens,
            temperature: executor.temperature,
        }
    }
}

/// Shared resources for building agents
///
/// ```no_run
/// use crew_runtime::{AgentConfig, AgentRuntime};
/// use crew_tools::ToolRegistry;
/// # fn example(model: std::sync::Arc<dyn crew_llm::ModelClient>) -> crew_core::Result<()> {
/// let runtime = AgentRuntime::builder().model(model).build()?;
/// let config = AgentConfig::builder("Senior stock price Analyst")
///     .goal("Find the {{ ticker }} stock price and analysis trends")
///     .build()?;
/// let agent = runtime.create_agent(config, ToolRegistry::new());
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct AgentRuntime {
    model: Arc<dyn ModelClient>,
    config: RuntimeConfig,
}

impl AgentRuntime {
    pub fn new(model: Arc<dyn ModelClient>, config: RuntimeConfig) -> Self {
        Self { model, config }
    }

    pub fn builder() -> AgentRuntimeBuilder {
        AgentRuntimeBuilder::new()
    }

    pub fn model(&self) -> &Arc<dyn ModelClient> {
        &self.model
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Build an agent bound to `tools`
    pub fn create_agent(&self, config: AgentConfig, tools: ToolRegistry) -> RoleAgent {
        let executor_config = ExecutorConfig {
            max_iterations: config.max_iter,
            model: self.config.model.clone(),
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
        };
        RoleAgent::new(config, self.model.clone(), executor_config, tools)
    }
}

/// Builder for AgentRuntime
pub struct AgentRuntimeBuilder {
    model: Option<Arc<dyn ModelClient>>,
    config: RuntimeConfig,
}

impl AgentRuntimeBuilder {
    pub fn new() -> Self {
        Self {
            model: None,
            config: RuntimeConfig::default(),
        }
    }

    /// Set the model client
    pub fn model(mut self, model: Arc<dyn ModelClient>) -> Self {
        self.model = Some(model);
        self
    }

    pub fn config(mut self, config: RuntimeConfig) -> Self {
        self.config = config;
        self
    }

    /// Model name sent with every request
    pub fn model_name(mut self, name: impl Into<String>) -> Self {
        self.config.model = name.into();
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.config.max_tokens = max_tokens;
        self
    }

    pub fn temperature(mut self, temperature: Option<f32>) -> Self {
        self.config.temperature = temperature;
        self
    }

    /// # Errors
    ///
    /// Returns a configuration error if no model client was set
    pub fn build(self) -> Result<AgentRuntime> {
        let model = self
            .model
            .ok_or_else(|| Error::Configuration("Model client not set".to_string()))?;
        if self.config.model.trim().is_empty() {
            return Err(Error::Configuration("Model name must not be empty".into()));
        }
        Ok(AgentRuntime::new(model, self.config))
    }
}

impl Default for AgentRuntimeBuilder {
    fn default() -> Self {
        Self::new()
    }
}
