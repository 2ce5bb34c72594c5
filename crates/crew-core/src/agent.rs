//! Core Agent trait definition

use crate::{Inputs, Result};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A unit of work handed to an agent
///
/// The description is already rendered for the current run. `context` carries
/// the outputs of upstream tasks, if any.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub description: String,
    pub expected_output: String,
    pub context: Option<String>,
}

impl Assignment {
    pub fn new(description: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            expected_output: expected_output.into(),
            context: None,
        }
    }

    /// Attach upstream context; blank context is dropped
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        let context = context.into();
        self.context = (!context.trim().is_empty()).then_some(context);
        self
    }
}

/// Core trait that all agents must implement
#[async_trait]
pub trait Agent: Send + Sync {
    /// Carry out an assignment and return the final answer text
    ///
    /// `inputs` holds the per-run parameters (ticker, current date, ...) used
    /// to render the agent's own prompt templates.
    async fn execute(&self, assignment: &Assignment, inputs: &Inputs) -> Result<String>;

    /// The agent's role, unique within a crew
    fn role(&self) -> &str;
}
