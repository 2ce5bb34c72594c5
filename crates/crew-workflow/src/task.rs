//! Task definition and execution

use crew_core::{Agent, Assignment, Inputs, Result};
use crew_prompt::PromptTemplate;
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use tracing::{info, instrument};

/// Separator placed between upstream outputs handed to a task as context
pub const CONTEXT_DIVIDER: &str = "\n\n----------\n\n";

/// One unit of work, bound to the agent that performs it
///
/// The description is a template rendered against the run inputs, so a task
/// is built once and reused for every kickoff.
#[derive(Clone)]
pub struct Task {
    name: String,
    description: PromptTemplate,
    expected_output: String,
    agent: Arc<dyn Agent>,
    context: Vec<String>,
}

impl Task {
    pub fn builder(name: impl Into<String>) -> TaskBuilder {
        TaskBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn expected_output(&self) -> &str {
        &self.expected_output
    }

    pub fn agent(&self) -> &Arc<dyn Agent> {
        &self.agent
    }

    /// Names of the tasks whose outputs this task receives, in order
    pub fn context(&self) -> &[String] {
        &self.context
    }

    /// Run the task
    ///
    /// `upstream` holds the raw outputs of the context tasks in declaration
    /// order; they are joined with [`CONTEXT_DIVIDER`].
    #[instrument(skip_all, fields(task = %self.name, agent = %self.agent.role()))]
    pub async fn execute(&self, inputs: &Inputs, upstream: &[&str]) -> Result<TaskOutput> {
        let description = self.description.render(&inputs.to_value())?;
        let assignment = Assignment::new(description.clone(), self.expected_output.clone())
            .with_context(upstream.join(CONTEXT_DIVIDER));

        info!(context_tasks = upstream.len(), "Task started");
        let raw = self.agent.execute(&assignment, inputs).await?;
        info!(output_length = raw.len(), "Task finished");

        Ok(TaskOutput {
            task: self.name.clone(),
            agent: self.agent.role().to_string(),
            description,
            raw,
        })
    }
}

impl fmt::Debug for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Task")
            .field("name", &self.name)
            .field("agent", &self.agent.role())
            .field("context", &self.context)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Task`]
pub struct TaskBuilder {
    name: String,
    description: Option<String>,
    expected_output: String,
    agent: Option<Arc<dyn Agent>>,
    context: Vec<String>,
}

impl TaskBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            expected_output: String::new(),
            agent: None,
            context: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn expected_output(mut self, expected: impl Into<String>) -> Self {
        self.expected_output = expected.into();
        self
    }

    pub fn agent(mut self, agent: Arc<dyn Agent>) -> Self {
        self.agent = Some(agent);
        self
    }

    /// Add a task whose output is passed along as context
    pub fn context(mut self, task: impl Into<String>) -> Self {
        self.context.push(task.into());
        self
    }

    pub fn build(self) -> Result<Task> {
        use crew_core::Error;

        if self.name.trim().is_empty() {
            return Err(Error::Configuration("Task name must not be empty".into()));
        }
        let description = self.description.ok_or_else(|| {
            Error::Configuration(format!("Task '{}' has no description", self.name))
        })?;
        let agent = self
            .agent
            .ok_or_else(|| Error::Configuration(format!("Task '{}' has no agent", self.name)))?;

        Ok(Task {
            description: PromptTemplate::new(self.name.clone(), description)?,
            name: self.name,
            expected_output: self.expected_output,
            agent,
            context: self.context,
        })
    }
}

/// Output of one task run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskOutput {
    pub task: String,
    /// Role of the agent that produced it
    pub agent: String,
    /// Rendered description
    pub description: String,
    pub raw: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_agents::Recorder;
    use crew_core::Error;

    #[tokio::test]
    async fn test_execute_renders_and_joins_context() {
        let agent = Arc::new(Recorder::new("Writer"));
        let task = Task::builder("newsletter")
            .description("Write about {{ ticker }}")
            .expected_output("3 paragraphs")
            .agent(agent.clone())
            .build()
            .unwrap();

        let out = task
            .execute(&Inputs::new().with_ticker("AAPL"), &["trend: up", "news: calm"])
            .await
            .unwrap();

        assert_eq!(out.task, "newsletter");
        assert_eq!(out.agent, "Writer");
        assert_eq!(out.description, "Write about AAPL");

        let seen = agent.assignments();
        assert_eq!(seen[0].expected_output, "3 paragraphs");
        assert_eq!(
            seen[0].context.as_deref(),
            Some("trend: up\n\n----------\n\nnews: calm")
        );
    }

    #[tokio::test]
    async fn test_no_upstream_means_no_context() {
        let agent = Arc::new(Recorder::new("Analyst"));
        let task = Task::builder("price")
            .description("Analyze")
            .agent(agent.clone())
            .build()
            .unwrap();

        task.execute(&Inputs::new(), &[]).await.unwrap();
        assert!(agent.assignments()[0].context.is_none());
    }

    #[test]
    fn test_builder_requires_agent_and_description() {
        let missing_agent = Task::builder("t").description("d").build();
        assert!(matches!(missing_agent, Err(Error::Configuration(_))));

        let agent = Arc::new(Recorder::new("a"));
        assert!(Task::builder("t").agent(agent).build().is_err());
    }
}
