//! Error types for prompt operations

use thiserror::Error;

/// Result type for prompt operations
pub type Result<T> = std::result::Result<T, PromptError>;

#[derive(Error, Debug)]
pub enum PromptError {
    #[error("Failed to parse template '{name}': {detail}")]
    TemplateParseFailed { name: String, detail: String },

    /// Usually an input the template references was not supplied
    #[error("Failed to render template '{name}': {detail}")]
    RenderError { name: String, detail: String },
}

impl From<PromptError> for crew_core::Error {
    fn from(err: PromptError) -> Self {
        crew_core::Error::Configuration(err.to_string())
    }
}
