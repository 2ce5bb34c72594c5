//! Role-based agent: a persona wrapped around the executor loop

use crate::delegation::{AskQuestionTool, Coworkers, DelegateWorkTool};
use crate::executor::{AgentExecutor, DEFAULT_MAX_ITERATIONS, ExecutorConfig};
use async_trait::async_trait;
use crew_core::{Agent, Assignment, Error, Inputs, Result};
use crew_llm::ModelClient;
use crew_prompt::{PromptBuilder, PromptTemplate};
use crew_tools::ToolRegistry;
use std::sync::Arc;
use tracing::{info, instrument};

/// Persona and limits of one agent
///
/// Goal and backstory are templates rendered against the run inputs, so a
/// single config serves every ticker.
#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub role: String,
    pub goal: PromptTemplate,
    pub backstory: PromptTemplate,
    pub max_iter: usize,
    pub allow_delegation: bool,
}

impl AgentConfig {
    pub fn builder(role: impl Into<String>) -> AgentConfigBuilder {
        AgentConfigBuilder::new(role)
    }

    /// System prompt for one run
    pub fn render_system_prompt(&self, inputs: &Inputs) -> Result<String> {
        let vars = inputs.to_value();
        let backstory = self.backstory.render(&vars)?;
        let goal = self.goal.render(&vars)?;
        Ok(format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role,
            backstory.trim(),
            goal.trim()
        ))
    }
}

/// Builder for [`AgentConfig`]
pub struct AgentConfigBuilder {
    role: String,
    goal: Option<String>,
    backstory: Option<String>,
    max_iter: usize,
    allow_delegation: bool,
}

impl AgentConfigBuilder {
    pub fn new(role: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            goal: None,
            backstory: None,
            max_iter: DEFAULT_MAX_ITERATIONS,
            allow_delegation: false,
        }
    }

    pub fn goal(mut self, goal: impl Into<String>) -> Self {
        self.goal = Some(goal.into());
        self
    }

    pub fn backstory(mut self, backstory: impl Into<String>) -> Self {
        self.backstory = Some(backstory.into());
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    pub fn allow_delegation(mut self, allow: bool) -> Self {
        self.allow_delegation = allow;
        self
    }

    pub fn build(self) -> Result<AgentConfig> {
        if self.role.trim().is_empty() {
            return Err(Error::Configuration("Agent role must not be empty".into()));
        }
        if self.max_iter == 0 {
            return Err(Error::Configuration(format!(
                "Agent '{}' needs max_iter of at least 1",
                self.role
            )));
        }
        let goal = self
            .goal
            .ok_or_else(|| Error::Configuration(format!("Agent '{}' has no goal", self.role)))?;
        let backstory = self.backstory.unwrap_or_default();

        Ok(AgentConfig {
            goal: PromptTemplate::new(format!("{} goal", self.role), goal)?,
            backstory: PromptTemplate::new(format!("{} backstory", self.role), backstory)?,
            role: self.role,
            max_iter: self.max_iter,
            allow_delegation: self.allow_delegation,
        })
    }
}

/// An [`Agent`] that answers assignments through the model/tool loop
pub struct RoleAgent {
    config: AgentConfig,
    executor: AgentExecutor,
    tools: ToolRegistry,
    coworkers: Option<Coworkers>,
}

impl RoleAgent {
    /// The executor's iteration cap is taken from `config.max_iter`
    pub fn new(
        config: AgentConfig,
        model: Arc<dyn ModelClient>,
        executor_config: ExecutorConfig,
        tools: ToolRegistry,
    ) -> Self {
        let executor = AgentExecutor::new(
            model,
            ExecutorConfig {
                max_iterations: config.max_iter,
                ..executor_config
            },
        );
        Self {
            config,
            executor,
            tools,
            coworkers: None,
        }
    }

    /// Give a delegating agent its coworkers
    ///
    /// Ignored unless the config allows delegation.
    pub fn with_coworkers(mut self, coworkers: Vec<Arc<dyn Agent>>) -> Result<Self> {
        if self.config.allow_delegation {
            self.coworkers = Some(Coworkers::new(coworkers, &self.config.role)?);
        }
        Ok(self)
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn tools(&self) -> &ToolRegistry {
        &self.tools
    }

    /// Task prompt for one assignment
    pub fn render_task_prompt(assignment: &Assignment) -> String {
        PromptBuilder::new()
            .labeled("Current Task", assignment.description.trim())
            .blank_line()
            .labeled(
                "This is the expected criteria for your final answer",
                assignment.expected_output.trim(),
            )
            .line("You MUST return the actual complete content as the final answer, not a summary.")
            .when_some(
                "This is the context you're working with",
                assignment.context.as_deref(),
            )
            .blank_line()
            .line("Begin! Use the tools available when they help and give your best final answer.")
            .build()
    }

    /// Bound tools plus, for delegating agents, the coworker tools for this run
    fn tools_for_run(&self, inputs: &Inputs) -> Result<ToolRegistry> {
        let mut tools = self.tools.clone();
        if let Some(coworkers) = &self.coworkers {
            tools.register(Arc::new(DelegateWorkTool::new(coworkers.clone(), inputs.clone())))?;
            tools.register(Arc::new(AskQuestionTool::new(coworkers.clone(), inputs.clone())))?;
        }
        Ok(tools)
    }
}

#[async_trait]
impl Agent for RoleAgent {
    #[instrument(skip_all, fields(role = %self.config.role))]
    async fn execute(&self, assignment: &Assignment, inputs: &Inputs) -> Result<String> {
        let system = self.config.render_system_prompt(inputs)?;
        let prompt = Self::render_task_prompt(assignment);
        let tools = self.tools_for_run(inputs)?;

        let run = self.executor.run(&tools, system, prompt).await?;
        info!(
            iterations = run.iterations,
            total_tokens = run.usage.total(),
            "Agent finished assignment"
        );
        Ok(run.output)
    }

    fn role(&self) -> &str {
        &self.config.role
    }
}
