//! Yahoo Finance price history client

use crate::error::{DataError, Result};
use crate::types::{DateRange, PriceBar, PriceSeries, Ticker};
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, NaiveTime};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::{debug, instrument};
use yahoo_finance_api as yahoo;

const PROVIDER: &str = "yahoo_finance";

/// Source of daily price history
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PriceFetcher: Send + Sync {
    /// Daily bars for `ticker` within `range`
    ///
    /// Unknown tickers and empty histories are errors, never an empty series.
    async fn fetch(&self, ticker: &Ticker, range: &DateRange) -> Result<PriceSeries>;
}

/// Yahoo Finance API client
#[derive(Debug, Clone)]
pub struct YahooFinanceClient {
    timeout: Duration,
}

impl YahooFinanceClient {
    /// `timeout` bounds every history request
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn connector(&self) -> Result<yahoo::YahooConnector> {
        yahoo::YahooConnector::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| DataError::provider(PROVIDER, e))
    }
}

fn to_offset(date: NaiveDate) -> Result<OffsetDateTime> {
    let timestamp = date.and_time(NaiveTime::MIN).and_utc().timestamp();
    OffsetDateTime::from_unix_timestamp(timestamp)
        .map_err(|e| DataError::InvalidRange(format!("{date}: {e}")))
}

#[async_trait]
impl PriceFetcher for YahooFinanceClient {
    #[instrument(skip(self), fields(ticker = %ticker, range = %range))]
    async fn fetch(&self, ticker: &Ticker, range: &DateRange) -> Result<PriceSeries> {
        let provider = self.connector()?;

        let response = provider
            .get_quote_history(ticker.as_str(), to_offset(range.start())?, to_offset(range.end())?)
            .await
            .map_err(|e| DataError::provider(PROVIDER, format!("{ticker}: {e}")))?;

        let quotes = response
            .quotes()
            .map_err(|e| DataError::provider(PROVIDER, format!("{ticker}: {e}")))?;

        let bars: Vec<PriceBar> = quotes
            .iter()
            .filter_map(|q| {
                let date = DateTime::from_timestamp(q.timestamp as i64, 0)?.date_naive();
                Some(PriceBar {
                    date,
                    open: q.open,
                    high: q.high,
                    low: q.low,
                    close: q.close,
                    volume: q.volume,
                })
            })
            .collect();

        if bars.is_empty() {
            return Err(DataError::NoPriceHistory {
                ticker: ticker.to_string(),
                range: range.to_string(),
            });
        }
        debug!(bars = bars.len(), "Price history fetched");
        Ok(PriceSeries::new(ticker.clone(), bars))
    }
}
