//! Task pipelines for role-based crews
//!
//! A [`Crew`] runs its [`Task`]s one after another, handing each task the
//! outputs of the tasks it names as context.

pub mod crew;
pub mod task;

#[cfg(test)]
mod test_agents;

// Re-export for convenience
pub use crew::{Crew, CrewBuilder, CrewOutput, Process};
pub use task::{CONTEXT_DIVIDER, Task, TaskBuilder, TaskOutput};
