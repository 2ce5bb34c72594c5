//! Concrete model client implementations

pub mod openai;

pub use openai::{OpenAIClient, OpenAIConfig};
