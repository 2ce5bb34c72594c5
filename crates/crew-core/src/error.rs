//! Error types for crew-core

use thiserror::Error;

/// Result type alias for crew-core
pub type Result<T> = std::result::Result<T, Error>;

/// Error type shared by agents, tasks and the pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// User input was rejected before any external call
    #[error("Validation error: {0}")]
    Validation(String),

    /// An external data provider could not deliver
    #[error("Data unavailable from {provider}: {reason}")]
    DataUnavailable { provider: String, reason: String },

    /// The language model failed or never produced a final answer
    #[error("Generation failed: {0}")]
    GenerationFailure(String),

    /// Wiring or configuration problem detected at build time
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Processing failed for a reason the model may recover from
    #[error("Processing failed: {0}")]
    ProcessingFailed(String),
}

/// Coarse classification of [`Error`], used by presentation layers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    DataUnavailable,
    GenerationFailure,
    Configuration,
    Processing,
}

impl ErrorKind {
    /// Stable snake_case label
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Validation => "validation",
            Self::DataUnavailable => "data_unavailable",
            Self::GenerationFailure => "generation_failure",
            Self::Configuration => "configuration",
            Self::Processing => "processing",
        }
    }
}

impl Error {
    pub fn data_unavailable(provider: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::DataUnavailable {
            provider: provider.into(),
            reason: reason.into(),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::DataUnavailable { .. } => ErrorKind::DataUnavailable,
            Self::GenerationFailure(_) => ErrorKind::GenerationFailure,
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::ProcessingFailed(_) => ErrorKind::Processing,
        }
    }

    /// Whether this error must abort the whole run rather than be reported
    /// back to the model as a failed tool call
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            Self::DataUnavailable { .. } | Self::GenerationFailure(_) | Self::Configuration(_)
        )
    }
}
