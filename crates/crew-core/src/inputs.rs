//! Per-run inputs for a crew kickoff
//!
//! `Inputs` is a small key-value store holding the parameters of one run
//! (ticker, current date, ...). Agents and tasks render their templates from
//! it, so every value must be JSON-serializable.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Well-known input keys
pub mod keys {
    /// Requested stock symbol
    pub const TICKER: &str = "ticker";
    /// Date of the run, formatted `%Y-%m-%d`
    pub const CURRENT_DATE: &str = "current_date";
    /// Asset always researched alongside the ticker
    pub const REFERENCE_ASSET: &str = "reference_asset";
}

/// Parameters of a single kickoff
///
/// Keys are kept ordered so rendering and logging are deterministic.
///
/// # Example
///
/// ```
/// use crew_core::Inputs;
///
/// let inputs = Inputs::new()
///     .with_ticker("AAPL")
///     .with_current_date("2024-08-08");
///
/// assert_eq!(inputs.ticker(), Some("AAPL"));
/// assert_eq!(inputs.current_date(), Some("2024-08-08"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inputs {
    data: BTreeMap<String, serde_json::Value>,
}

impl Inputs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ticker(mut self, ticker: impl Into<String>) -> Self {
        self.insert(keys::TICKER, serde_json::json!(ticker.into()));
        self
    }

    pub fn with_current_date(mut self, date: impl Into<String>) -> Self {
        self.insert(keys::CURRENT_DATE, serde_json::json!(date.into()));
        self
    }

    pub fn with_reference_asset(mut self, asset: impl Into<String>) -> Self {
        self.insert(keys::REFERENCE_ASSET, serde_json::json!(asset.into()));
        self
    }

    pub fn ticker(&self) -> Option<&str> {
        self.get_str(keys::TICKER)
    }

    pub fn current_date(&self) -> Option<&str> {
        self.get_str(keys::CURRENT_DATE)
    }

    pub fn reference_asset(&self) -> Option<&str> {
        self.get_str(keys::REFERENCE_ASSET)
    }

    fn insert(&mut self, key: impl Into<String>, value: serde_json::Value) {
        self.data.insert(key.into(), value);
    }

    fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.data.get(key)
    }

    fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|v| v.as_str())
    }

    /// JSON object view, suitable as template variables
    pub fn to_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.data
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}
