//! Secret resolution
//!
//! Secrets come from the process environment first and fall back to a TOML
//! file of top-level string keys:
//!
//! ```toml
//! OPENAI_API_KEY = "sk-..."
//! ```

use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Env var naming an alternative secrets file
pub const SECRETS_PATH_ENV: &str = "STOCK_CREW_SECRETS";
/// Secrets file looked up in the working directory by default
pub const DEFAULT_SECRETS_FILE: &str = "secrets.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Missing secret {0}: set it in the environment or in {DEFAULT_SECRETS_FILE}")]
    MissingSecret(String),

    #[error("Failed to read secrets file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid secrets file: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Debug, Default, Deserialize)]
#[serde(transparent)]
struct SecretsFile(BTreeMap<String, toml::Value>);

/// Resolved secret store
#[derive(Debug, Clone, Default)]
pub struct Secrets {
    file: BTreeMap<String, String>,
}

impl Secrets {
    /// Load the secrets file named by `STOCK_CREW_SECRETS`, or `secrets.toml`
    ///
    /// A missing default file is not an error; a missing explicit file is.
    pub fn load() -> Result<Self, ConfigError> {
        match std::env::var(SECRETS_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(path),
            _ => {
                let path = Path::new(DEFAULT_SECRETS_FILE);
                if path.exists() {
                    Self::from_file(path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let SecretsFile(table) = toml::from_str(raw)?;
        let file = table
            .into_iter()
            .filter_map(|(k, v)| match v {
                toml::Value::String(s) => Some((k, s)),
                _ => None,
            })
            .collect();
        Ok(Self { file })
    }

    /// Look up a secret; blank values count as missing
    pub fn get(&self, name: &str) -> Option<String> {
        self.resolve(name, std::env::var(name).ok())
    }

    /// Like [`Secrets::get`] but fails with [`ConfigError::MissingSecret`]
    pub fn require(&self, name: &str) -> Result<String, ConfigError> {
        self.get(name)
            .ok_or_else(|| ConfigError::MissingSecret(name.to_string()))
    }

    fn resolve(&self, name: &str, from_env: Option<String>) -> Option<String> {
        from_env
            .filter(|v| !v.trim().is_empty())
            .or_else(|| self.file.get(name).filter(|v| !v.trim().is_empty()).cloned())
    }
}
