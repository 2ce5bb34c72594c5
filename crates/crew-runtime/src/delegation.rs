//! Coworker delegation tools
//!
//! A delegating agent gets two extra tools: hand a sub-task to a coworker, or
//! ask a coworker a question. Coworkers are addressed by role,
//! case-insensitively, and are expected to have delegation disabled.

use async_trait::async_trait;
use crew_core::{Agent, Assignment, Error, Inputs, Result};
use crew_llm::tools::schema;
use crew_tools::{Tool, decode_input};
use serde::Deserialize;
use serde_json::{Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::info;

/// Agents a delegating agent may hand work to
#[derive(Clone)]
pub struct Coworkers {
    by_role: Arc<BTreeMap<String, Arc<dyn Agent>>>,
}

impl Coworkers {
    /// Index `agents` by role, leaving out the delegating agent itself
    pub fn new(agents: Vec<Arc<dyn Agent>>, own_role: &str) -> Result<Self> {
        let own = normalize(own_role);
        let mut by_role = BTreeMap::new();
        for agent in agents {
            let key = normalize(agent.role());
            if key == own {
                continue;
            }
            if by_role.insert(key, agent).is_some() {
                return Err(Error::Configuration(format!(
                    "Duplicate coworker role for {own_role}"
                )));
            }
        }
        Ok(Self {
            by_role: Arc::new(by_role),
        })
    }

    pub fn roles(&self) -> Vec<&str> {
        self.by_role.values().map(|a| a.role()).collect()
    }

    fn find(&self, role: &str) -> Result<&Arc<dyn Agent>> {
        self.by_role.get(&normalize(role)).ok_or_else(|| {
            Error::ProcessingFailed(format!(
                "Coworker '{role}' not found. Available coworkers: {}",
                self.roles().join(", ")
            ))
        })
    }

    fn describe(&self) -> String {
        self.roles().join(", ")
    }
}

fn normalize(role: &str) -> String {
    role.trim().to_lowercase()
}

#[derive(Debug, Deserialize)]
struct DelegateInput {
    coworker: String,
    task: String,
    #[serde(default)]
    context: String,
}

#[derive(Debug, Deserialize)]
struct QuestionInput {
    coworker: String,
    question: String,
    #[serde(default)]
    context: String,
}

/// Hands a sub-task to a coworker and returns its answer
pub struct DelegateWorkTool {
    coworkers: Coworkers,
    inputs: Inputs,
    description: String,
}

impl DelegateWorkTool {
    /// `inputs` are the current run's inputs, forwarded to the coworker
    pub fn new(coworkers: Coworkers, inputs: Inputs) -> Self {
        let description = format!(
            "Delegate a specific task to one of the following coworkers: {}. \
             Provide the full task and all the context the coworker needs, since they know nothing about your work.",
            coworkers.describe()
        );
        Self {
            coworkers,
            inputs,
            description,
        }
    }
}

#[async_trait]
impl Tool for DelegateWorkTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let input: DelegateInput = decode_input(self.name(), params)?;
        let coworker = self.coworkers.find(&input.coworker)?;
        info!(coworker = %coworker.role(), "Delegating work");

        let assignment = Assignment::new(
            input.task,
            "Your best answer to your coworker asking you this, accounting for the context shared.",
        )
        .with_context(input.context);

        let answer = coworker.execute(&assignment, &self.inputs).await?;
        Ok(Value::String(answer))
    }

    fn name(&self) -> &str {
        "delegate_work"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "coworker": schema::string("Role of the coworker to delegate to"),
                "task": schema::string("The task to delegate"),
                "context": schema::string("Everything the coworker needs to know"),
            }),
            &["coworker", "task"],
        )
    }
}

/// Asks a coworker a question and returns its answer
pub struct AskQuestionTool {
    coworkers: Coworkers,
    inputs: Inputs,
    description: String,
}

impl AskQuestionTool {
    pub fn new(coworkers: Coworkers, inputs: Inputs) -> Self {
        let description = format!(
            "Ask a specific question to one of the following coworkers: {}. \
             Include all the context they need to answer.",
            coworkers.describe()
        );
        Self {
            coworkers,
            inputs,
            description,
        }
    }
}

#[async_trait]
impl Tool for AskQuestionTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let input: QuestionInput = decode_input(self.name(), params)?;
        let coworker = self.coworkers.find(&input.coworker)?;
        info!(coworker = %coworker.role(), "Asking coworker");

        let assignment = Assignment::new(
            input.question,
            "A direct answer to the question, accounting for the context shared.",
        )
        .with_context(input.context);

        let answer = coworker.execute(&assignment, &self.inputs).await?;
        Ok(Value::String(answer))
    }

    fn name(&self) -> &str {
        "ask_question"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "coworker": schema::string("Role of the coworker to ask"),
                "question": schema::string("The question to ask"),
                "context": schema::string("Everything the coworker needs to know"),
            }),
            &["coworker", "question"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed {
        role: &'static str,
    }

    #[async_trait]
    impl Agent for Fixed {
        async fn execute(&self, assignment: &Assignment, inputs: &Inputs) -> Result<String> {
            Ok(format!(
                "{} answered '{}' for {}",
                self.role,
                assignment.description,
                inputs.ticker().unwrap_or("?")
            ))
        }

        fn role(&self) -> &str {
            self.role
        }
    }

    fn coworkers() -> Coworkers {
        Coworkers::new(
            vec![
                Arc::new(Fixed {
                    role: "Senior stock price Analyst",
                }),
                Arc::new(Fixed {
                    role: "Senior stock news Analyst",
                }),
                Arc::new(Fixed {
                    role: "Senior stock Analyst Writer",
                }),
            ],
            "Senior stock Analyst Writer",
        )
        .unwrap()
    }

    #[test]
    fn test_self_excluded() {
        let roles = coworkers().roles().join("|");
        assert!(!roles.contains("Writer"));
        assert!(roles.contains("Senior stock price Analyst"));
    }

    #[test]
    fn test_duplicate_roles_rejected() {
        let result = Coworkers::new(
            vec![
                Arc::new(Fixed { role: "Analyst" }),
                Arc::new(Fixed { role: "analyst " }),
            ],
            "Writer",
        );
        assert!(matches!(result, Err(Error::Configuration(_))));
    }

    #[tokio::test]
    async fn test_delegate_case_insensitive() {
        let tool = DelegateWorkTool::new(coworkers(), Inputs::new().with_ticker("AAPL"));
        let out = tool
            .execute(json!({
                "coworker": "senior stock PRICE analyst",
                "task": "Confirm the trend",
                "context": "Newsletter draft says up"
            }))
            .await
            .unwrap();
        assert_eq!(
            out,
            json!("Senior stock price Analyst answered 'Confirm the trend' for AAPL")
        );
    }

    #[tokio::test]
    async fn test_unknown_coworker_is_recoverable() {
        let tool = AskQuestionTool::new(coworkers(), Inputs::new());
        let err = tool
            .execute(json!({"coworker": "Chief Economist", "question": "Rates?"}))
            .await
            .unwrap_err();
        assert!(!err.is_fatal());
        assert!(err.to_string().contains("Senior stock news Analyst"));
    }

    #[test]
    fn test_description_lists_coworkers() {
        let tool = DelegateWorkTool::new(coworkers(), Inputs::new());
        assert!(tool.description().contains("Senior stock news Analyst"));
        assert_eq!(tool.definition().input_schema["required"][1], "task");
    }
}
