//! Crew definition and sequential kickoff

use crate::task::{Task, TaskOutput};
use crew_core::{Error, Inputs, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::time::Instant;
use tracing::{error, info, instrument};

/// How a crew schedules its tasks
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Process {
    /// Declaration order, one task at a time
    #[default]
    Sequential,
}

/// Result of one kickoff
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CrewOutput {
    /// Raw output of the last task
    pub final_output: String,
    /// Every task output in execution order
    pub tasks_output: Vec<TaskOutput>,
}

impl CrewOutput {
    pub fn task(&self, name: &str) -> Option<&TaskOutput> {
        self.tasks_output.iter().find(|t| t.task == name)
    }
}

/// An ordered set of tasks run as one pipeline
///
/// Context dependencies are validated at build time: a task may only name
/// tasks declared before it.
///
/// ```no_run
/// use crew_workflow::{Crew, Task};
/// # async fn example(price: Task, news: Task, writer: Task) -> crew_core::Result<()> {
/// let crew = Crew::builder().task(price).task(news).task(writer).build()?;
/// let output = crew.kickoff(&crew_core::Inputs::new().with_ticker("AAPL")).await?;
/// println!("{}", output.final_output);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Crew {
    tasks: Vec<Task>,
    process: Process,
}

impl Crew {
    pub fn builder() -> CrewBuilder {
        CrewBuilder::new()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn process(&self) -> Process {
        self.process
    }

    /// Run every task once
    ///
    /// The first failing task aborts the run; no partial output is returned.
    #[instrument(skip_all, fields(tasks = self.tasks.len()))]
    pub async fn kickoff(&self, inputs: &Inputs) -> Result<CrewOutput> {
        let started = Instant::now();
        let mut outputs: Vec<TaskOutput> = Vec::with_capacity(self.tasks.len());
        let mut by_name: HashMap<&str, usize> = HashMap::new();

        for task in &self.tasks {
            let upstream: Vec<&str> = task
                .context()
                .iter()
                .filter_map(|name| by_name.get(name.as_str()))
                .map(|&i| outputs[i].raw.as_str())
                .collect();

            let output = match task.execute(inputs, &upstream).await {
                Ok(output) => output,
                Err(e) => {
                    error!(task = %task.name(), kind = e.kind().as_str(), error = %e, "Task failed, aborting kickoff");
                    return Err(e);
                }
            };
            by_name.insert(task.name(), outputs.len());
            outputs.push(output);
        }

        let final_output = outputs
            .last()
            .map(|o| o.raw.clone())
            .ok_or_else(|| Error::Configuration("Crew has no tasks".into()))?;

        info!(
            duration_ms = started.elapsed().as_millis() as u64,
            "Kickoff finished"
        );
        Ok(CrewOutput {
            final_output,
            tasks_output: outputs,
        })
    }
}

/// Builder for [`Crew`]
#[derive(Default)]
pub struct CrewBuilder {
    tasks: Vec<Task>,
    process: Process,
}

impl CrewBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn process(mut self, process: Process) -> Self {
        self.process = process;
        self
    }

    pub fn build(self) -> Result<Crew> {
        if self.tasks.is_empty() {
            return Err(Error::Configuration("Crew needs at least one task".into()));
        }

        let mut declared: Vec<&str> = Vec::with_capacity(self.tasks.len());
        for task in &self.tasks {
            if declared.contains(&task.name()) {
                return Err(Error::Configuration(format!(
                    "Duplicate task name '{}'",
                    task.name()
                )));
            }
            for dependency in task.context() {
                if !declared.contains(&dependency.as_str()) {
                    return Err(Error::Configuration(format!(
                        "Task '{}' uses '{dependency}' as context, which is not declared before it",
                        task.name()
                    )));
                }
            }
            declared.push(task.name());
        }

        Ok(Crew {
            tasks: self.tasks,
            process: self.process,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_agents::{Failing, Recorder};
    use std::sync::Arc;

    fn task(name: &str, agent: Arc<Recorder>, context: &[&str]) -> Task {
        context
            .iter()
            .fold(
                Task::builder(name)
                    .description(format!("{name} for {{{{ ticker }}}}"))
                    .agent(agent),
                |builder, dep| builder.context(*dep),
            )
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_sequential_with_context() {
        let price = Arc::new(Recorder::new("price"));
        let news = Arc::new(Recorder::new("news"));
        let writer = Arc::new(Recorder::new("writer"));

        let crew = Crew::builder()
            .task(task("get_price", price.clone(), &[]))
            .task(task("get_news", news.clone(), &[]))
            .task(task("write", writer.clone(), &["get_price", "get_news"]))
            .build()
            .unwrap();

        let out = crew
            .kickoff(&Inputs::new().with_ticker("AAPL"))
            .await
            .unwrap();

        assert_eq!(out.tasks_output.len(), 3);
        assert_eq!(out.final_output, "writer: write for AAPL");
        assert_eq!(out.task("get_news").unwrap().agent, "news");
        assert!(price.assignments()[0].context.is_none());
        assert_eq!(
            writer.assignments()[0].context.as_deref(),
            Some("price: get_price for AAPL\n\n----------\n\nnews: get_news for AAPL")
        );
    }

    #[tokio::test]
    async fn test_failure_aborts_later_tasks() {
        let writer = Arc::new(Recorder::new("writer"));
        let crew = Crew::builder()
            .task(
                Task::builder("get_price")
                    .description("Analyze {{ ticker }}")
                    .agent(Arc::new(Failing))
                    .build()
                    .unwrap(),
            )
            .task(task("write", writer.clone(), &["get_price"]))
            .build()
            .unwrap();

        let err = crew
            .kickoff(&Inputs::new().with_ticker("ZZZZ"))
            .await
            .unwrap_err();

        assert!(matches!(err, Error::DataUnavailable { .. }));
        assert!(writer.assignments().is_empty());
    }

    #[tokio::test]
    async fn test_missing_input_fails_before_agent_call() {
        let agent = Arc::new(Recorder::new("price"));
        let crew = Crew::builder()
            .task(task("get_price", agent.clone(), &[]))
            .build()
            .unwrap();

        assert!(crew.kickoff(&Inputs::new()).await.is_err());
        assert!(agent.assignments().is_empty());
    }

    #[test]
    fn test_build_validation() {
        assert!(matches!(
            Crew::builder().build(),
            Err(Error::Configuration(_))
        ));

        let agent = Arc::new(Recorder::new("a"));
        let forward = Crew::builder()
            .task(task("write", agent.clone(), &["get_price"]))
            .task(task("get_price", agent.clone(), &[]))
            .build();
        assert!(matches!(forward, Err(Error::Configuration(msg)) if msg.contains("get_price")));

        let duplicate = Crew::builder()
            .task(task("t", agent.clone(), &[]))
            .task(task("t", agent.clone(), &[]))
            .build();
        assert!(duplicate.is_err());

        let unknown = Crew::builder()
            .task(task("t", agent, &["nope"]))
            .build();
        assert!(unknown.is_err());
    }
}
