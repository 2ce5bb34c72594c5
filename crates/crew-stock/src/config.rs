//! Configuration for research runs

use crate::error::{DataError, Result};
use crate::types::DateRange;
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_REFERENCE_ASSET: &str = "BTC";
pub const DEFAULT_NEWS_LIMIT: usize = 10;
pub const DEFAULT_MAX_ITER: usize = 5;

/// Settings shared by every research run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResearchConfig {
    /// Chat model name
    pub model: String,

    pub temperature: Option<f32>,

    pub max_tokens: u32,

    /// Model calls allowed per agent and task
    pub max_iter: usize,

    /// Window of daily prices handed to the price tool
    pub price_range: DateRange,

    /// Cap on articles per news search
    pub news_limit: usize,

    /// Asset the news analyst always covers next to the requested ticker
    pub reference_asset: String,

    /// Timeout for each price and news request
    pub http_timeout: Duration,
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            temperature: Some(0.2),
            max_tokens: 1500,
            max_iter: DEFAULT_MAX_ITER,
            price_range: DateRange::default(),
            news_limit: DEFAULT_NEWS_LIMIT,
            reference_asset: DEFAULT_REFERENCE_ASSET.to_string(),
            http_timeout: Duration::from_secs(30),
        }
    }
}

impl ResearchConfig {
    pub fn builder() -> ResearchConfigBuilder {
        ResearchConfigBuilder::default()
    }

    /// Defaults overridden by `OPENAI_MODEL`, `STOCK_CREW_REFERENCE_ASSET`,
    /// `STOCK_CREW_NEWS_LIMIT`, `STOCK_CREW_PRICE_START` and
    /// `STOCK_CREW_PRICE_END`
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let mut builder = Self::builder();

        if let Some(model) = get("OPENAI_MODEL") {
            builder = builder.model(model.trim());
        }
        if let Some(asset) = get("STOCK_CREW_REFERENCE_ASSET") {
            builder = builder.reference_asset(asset.trim());
        }
        if let Some(limit) = get("STOCK_CREW_NEWS_LIMIT") {
            let limit = limit.trim().parse().map_err(|e| {
                DataError::Config(format!("STOCK_CREW_NEWS_LIMIT '{limit}': {e}"))
            })?;
            builder = builder.news_limit(limit);
        }
        match (get("STOCK_CREW_PRICE_START"), get("STOCK_CREW_PRICE_END")) {
            (Some(start), Some(end)) => builder = builder.price_range(DateRange::parse(&start, &end)?),
            (None, None) => {}
            _ => {
                return Err(DataError::Config(
                    "STOCK_CREW_PRICE_START and STOCK_CREW_PRICE_END must be set together"
                        .to_string(),
                ));
            }
        }

        builder.build()
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(DataError::Config("model must not be empty".to_string()));
        }
        if self.max_iter == 0 {
            return Err(DataError::Config(
                "max_iter must be greater than 0".to_string(),
            ));
        }
        if self.news_limit == 0 {
            return Err(DataError::Config(
                "news_limit must be greater than 0".to_string(),
            ));
        }
        if self.reference_asset.trim().is_empty() {
            return Err(DataError::Config(
                "reference_asset must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Builder for ResearchConfig
#[derive(Debug, Default)]
pub struct ResearchConfigBuilder {
    model: Option<String>,
    temperature: Option<Option<f32>>,
    max_tokens: Option<u32>,
    max_iter: Option<usize>,
    price_range: Option<DateRange>,
    news_limit: Option<usize>,
    reference_asset: Option<String>,
    http_timeout: Option<Duration>,
}

impl ResearchConfigBuilder {
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = Some(max_iter);
        self
    }

    pub fn price_range(mut self, range: DateRange) -> Self {
        self.price_range = Some(range);
        self
    }

    pub fn news_limit(mut self, limit: usize) -> Self {
        self.news_limit = Some(limit);
        self
    }

    pub fn reference_asset(mut self, asset: impl Into<String>) -> Self {
        self.reference_asset = Some(asset.into());
        self
    }

    pub fn http_timeout(mut self, timeout: Duration) -> Self {
        self.http_timeout = Some(timeout);
        self
    }

    /// Build and validate
    pub fn build(self) -> Result<ResearchConfig> {
        let defaults = ResearchConfig::default();
        let config = ResearchConfig {
            model: self.model.unwrap_or(defaults.model),
            temperature: self.temperature.unwrap_or(defaults.temperature),
            max_tokens: self.max_tokens.unwrap_or(defaults.max_tokens),
            max_iter: self.max_iter.unwrap_or(defaults.max_iter),
            price_range: self.price_range.unwrap_or(defaults.price_range),
            news_limit: self.news_limit.unwrap_or(defaults.news_limit),
            reference_asset: self.reference_asset.unwrap_or(defaults.reference_asset),
            http_timeout: self.http_timeout.unwrap_or(defaults.http_timeout),
        };
        config.validate()?;
        Ok(config)
    }
}
