//! Agent runtime for role-based crews
//!
//! This crate provides the model/tool loop ([`AgentExecutor`]), the
//! persona-driven [`RoleAgent`], coworker delegation tools, and the
//! [`AgentRuntime`] that builds agents around a shared model client.

pub mod agent;
pub mod delegation;
pub mod executor;
pub mod runtime;

// Re-export key types
pub use agent::{AgentConfig, AgentConfigBuilder, RoleAgent};
pub use delegation::{AskQuestionTool, Coworkers, DelegateWorkTool};
pub use executor::{AgentExecutor, Execution, ExecutorConfig};
pub use runtime::{AgentRuntime, AgentRuntimeBuilder, RuntimeConfig};
