//! Prompt templates for stock-crew
//!
//! Agent roles, goals, backstories and task descriptions are stored as
//! [`PromptTemplate`]s with Jinja2 placeholders such as `{{ ticker }}` and
//! rendered once per run. [`PromptBuilder`] assembles the final task prompt.
//!
//! ```
//! use crew_prompt::PromptTemplate;
//! use serde_json::json;
//!
//! let goal = PromptTemplate::new("goal", "Find the {{ ticker }} stock price").unwrap();
//! let text = goal.render(&json!({ "ticker": "AAPL" })).unwrap();
//! assert_eq!(text, "Find the AAPL stock price");
//! ```

mod builder;
mod error;
mod template;

pub use builder::PromptBuilder;
pub use error::{PromptError, Result};
pub use template::PromptTemplate;
