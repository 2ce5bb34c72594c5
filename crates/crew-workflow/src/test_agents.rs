//! Stand-in agents for crew tests

use async_trait::async_trait;
use crew_core::{Agent, Assignment, Error, Inputs, Result};
use std::sync::Mutex;

/// Answers `"{role}: {description}"` and records each assignment
pub struct Recorder {
    role: String,
    seen: Mutex<Vec<Assignment>>,
}

impl Recorder {
    pub fn new(role: &str) -> Self {
        Self {
            role: role.to_string(),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn assignments(&self) -> Vec<Assignment> {
        self.seen.lock().unwrap().clone()
    }
}

#[async_trait]
impl Agent for Recorder {
    async fn execute(&self, assignment: &Assignment, _inputs: &Inputs) -> Result<String> {
        self.seen.lock().unwrap().push(assignment.clone());
        Ok(format!("{}: {}", self.role, assignment.description))
    }

    fn role(&self) -> &str {
        &self.role
    }
}

/// Always fails as if the price provider knew nothing of the ticker
pub struct Failing;

#[async_trait]
impl Agent for Failing {
    async fn execute(&self, _assignment: &Assignment, inputs: &Inputs) -> Result<String> {
        Err(Error::data_unavailable(
            "yahoo_finance",
            format!("no price history for {}", inputs.ticker().unwrap_or("?")),
        ))
    }

    fn role(&self) -> &str {
        "failing"
    }
}
