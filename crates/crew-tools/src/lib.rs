//! Tool framework for stock-crew
//!
//! A [`Tool`] is a named capability with a JSON Schema input. Agents hold a
//! [`ToolRegistry`] and dispatch the model's tool calls through it.

pub mod registry;
pub mod tool;

pub use registry::ToolRegistry;
pub use tool::{Tool, decode_input};
