//! Core abstractions for stock-crew
//!
//! This crate defines the traits and types shared by every other crate in the
//! workspace: the [`Agent`] trait, the per-run [`Inputs`] bag and the
//! workspace-wide [`Error`] kinds.

pub mod agent;
pub mod error;
pub mod inputs;

pub use agent::{Agent, Assignment};
pub use error::{Error, ErrorKind, Result};
pub use inputs::Inputs;
