//! Tool for fetching and summarizing price history

use async_trait::async_trait;
use crew_core::{Error, Result};
use crew_llm::tools::schema;
use crew_tools::{Tool, decode_input};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::PriceFetcher;
use crate::types::{DateRange, Ticker};

/// Fetches daily history for the configured window and returns its summary
pub struct StockPriceTool {
    fetcher: Arc<dyn PriceFetcher>,
    range: DateRange,
}

#[derive(Debug, Deserialize)]
struct StockPriceInput {
    ticker: String,
}

impl StockPriceTool {
    pub fn new(fetcher: Arc<dyn PriceFetcher>, range: DateRange) -> Self {
        Self { fetcher, range }
    }
}

#[async_trait]
impl Tool for StockPriceTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let input: StockPriceInput = decode_input(self.name(), params)?;
        let ticker = Ticker::parse(&input.ticker)?;

        let series = self.fetcher.fetch(&ticker, &self.range).await?;
        let summary = series.summary().ok_or_else(|| {
            Error::data_unavailable("yahoo_finance", format!("no price history for {ticker}"))
        })?;

        serde_json::to_value(summary)
            .map_err(|e| Error::ProcessingFailed(format!("Failed to encode price summary: {e}")))
    }

    fn name(&self) -> &str {
        "stock_price"
    }

    fn description(&self) -> &str {
        "Fetch the daily price history of a stock ticker for the analysis period. \
         Returns first and last close, change, period high and low, 20 and 50 day \
         moving averages and the most recent daily bars."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({ "ticker": schema::string("Stock ticker symbol (e.g., 'AAPL')") }),
            &["ticker"],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockPriceFetcher;
    use crate::error::DataError;
    use crate::types::{PriceBar, PriceSeries};
    use chrono::NaiveDate;
    use mockall::predicate::always;

    fn series(ticker: &Ticker) -> PriceSeries {
        let bars = (1..=3)
            .map(|d| PriceBar {
                date: NaiveDate::from_ymd_opt(2024, 8, d).unwrap(),
                open: 200.0,
                high: 205.0,
                low: 195.0,
                close: 200.0 + f64::from(d),
                volume: 10,
            })
            .collect();
        PriceSeries::new(ticker.clone(), bars)
    }

    #[tokio::test]
    async fn test_fetches_configured_range() {
        let mut fetcher = MockPriceFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|ticker, range| ticker.as_str() == "AAPL" && *range == DateRange::default())
            .times(1)
            .returning(|ticker, _| Ok(series(ticker)));

        let tool = StockPriceTool::new(Arc::new(fetcher), DateRange::default());
        let out = tool.execute(json!({"ticker": " AAPL "})).await.unwrap();

        assert_eq!(out["ticker"], "AAPL");
        assert_eq!(out["last_close"], 203.0);
        assert_eq!(out["recent"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_unknown_ticker_is_fatal() {
        let mut fetcher = MockPriceFetcher::new();
        fetcher.expect_fetch().with(always(), always()).returning(|ticker, range| {
            Err(DataError::NoPriceHistory {
                ticker: ticker.to_string(),
                range: range.to_string(),
            })
        });

        let tool = StockPriceTool::new(Arc::new(fetcher), DateRange::default());
        let err = tool.execute(json!({"ticker": "ZZZZ"})).await.unwrap_err();
        assert!(matches!(err, Error::DataUnavailable { .. }));
        assert!(err.is_fatal());
    }

    #[tokio::test]
    async fn test_blank_ticker_never_fetches() {
        let mut fetcher = MockPriceFetcher::new();
        fetcher.expect_fetch().never();

        let tool = StockPriceTool::new(Arc::new(fetcher), DateRange::default());
        let err = tool.execute(json!({"ticker": "  "})).await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        assert!(tool.execute(json!({})).await.is_err());
    }
}
