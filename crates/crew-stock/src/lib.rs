//! Stock research crew
//!
//! Given a ticker, three agents run one after another:
//!
//! - The price analyst reads a year of daily prices (Yahoo Finance) and calls
//!   the trend up, down or sideways
//! - The news analyst searches news for the ticker and a reference asset
//!   (`BTC` by default) and scores each from 0 (extreme fear) to 100
//!   (extreme greed)
//! - The writer turns both reports into a three-paragraph markdown newsletter
//!
//! # Example
//!
//! ```rust,ignore
//! use crew_stock::{ResearchConfig, ResearchCrew, YahooFinanceClient, YahooNewsClient};
//! use crew_llm::providers::OpenAIClient;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ResearchConfig::from_env()?;
//!     let crew = ResearchCrew::new(
//!         Arc::new(OpenAIClient::from_env()?),
//!         Arc::new(YahooFinanceClient::new(config.http_timeout)),
//!         Arc::new(YahooNewsClient::new(config.http_timeout)?),
//!         config,
//!     )?;
//!
//!     let output = crew.kickoff("AAPL", chrono::Local::now().date_naive()).await?;
//!     println!("{}", output.final_output);
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod crew;
pub mod error;
pub mod prompts;
pub mod report;
pub mod tools;
pub mod types;

// Re-export main types for convenience
pub use api::{NewsSearcher, PriceFetcher, YahooFinanceClient, YahooNewsClient};
pub use config::{ResearchConfig, ResearchConfigBuilder};
pub use crew::ResearchCrew;
pub use error::{DataError, Result};
pub use report::{AssetScore, ReportHighlights, Trend};
pub use tools::{NewsSearchTool, StockPriceTool};
pub use types::{DateRange, NewsSnippet, PriceBar, PriceSeries, PriceSummary, Ticker};
