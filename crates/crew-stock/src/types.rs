//! Market data types shared by the providers and the tools

use crate::error::{DataError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use ta::Next;
use ta::indicators::SimpleMovingAverage;

/// Number of most recent bars included in a [`PriceSummary`]
const RECENT_BARS: usize = 10;

/// A stock ticker as typed by the user, trimmed
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Blank input is rejected; nothing else is checked
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DataError::InvalidTicker(
                "ticker must not be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Ticker {
    type Error = DataError;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

/// Inclusive range of calendar dates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawDateRange")]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

#[derive(Deserialize)]
struct RawDateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl TryFrom<RawDateRange> for DateRange {
    type Error = DataError;

    fn try_from(raw: RawDateRange) -> Result<Self> {
        Self::new(raw.start, raw.end)
    }
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(DataError::InvalidRange(format!(
                "start {start} is after end {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Parse `YYYY-MM-DD` bounds
    pub fn parse(start: &str, end: &str) -> Result<Self> {
        let parse = |s: &str| {
            NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map_err(|e| DataError::InvalidRange(format!("'{s}': {e}")))
        };
        Self::new(parse(start)?, parse(end)?)
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

/// The fixed one-year window 2023-08-08..2024-08-08
impl Default for DateRange {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2023, 8, 8).unwrap_or_default(),
            end: NaiveDate::from_ymd_opt(2024, 8, 8).unwrap_or_default(),
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// One daily bar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Daily bars for one ticker, ordered by date ascending
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    ticker: Ticker,
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn new(ticker: Ticker, mut bars: Vec<PriceBar>) -> Self {
        bars.sort_by_key(|b| b.date);
        Self { ticker, bars }
    }

    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Compact view of the series; `None` when there are no bars
    pub fn summary(&self) -> Option<PriceSummary> {
        let first = self.bars.first()?;
        let last = self.bars.last()?;

        let change = last.close - first.close;
        let change_pct = if first.close == 0.0 {
            0.0
        } else {
            change / first.close * 100.0
        };
        let high = self.bars.iter().map(|b| b.high).fold(f64::MIN, f64::max);
        let low = self.bars.iter().map(|b| b.low).fold(f64::MAX, f64::min);

        Some(PriceSummary {
            ticker: self.ticker.to_string(),
            start: first.date,
            end: last.date,
            bars: self.bars.len(),
            first_close: first.close,
            last_close: last.close,
            change: round2(change),
            change_pct: round2(change_pct),
            period_high: high,
            period_low: low,
            sma_20: self.sma(20),
            sma_50: self.sma(50),
            recent: self.bars[self.bars.len().saturating_sub(RECENT_BARS)..].to_vec(),
        })
    }

    /// Simple moving average of the close over the last `period` bars
    fn sma(&self, period: usize) -> Option<f64> {
        if self.bars.len() < period {
            return None;
        }
        let mut sma = SimpleMovingAverage::new(period).ok()?;
        let value = self
            .bars
            .iter()
            .fold(0.0, |_, bar| sma.next(bar.close));
        Some(round2(value))
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// What the price tool hands to the model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSummary {
    pub ticker: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub bars: usize,
    pub first_close: f64,
    pub last_close: f64,
    pub change: f64,
    pub change_pct: f64,
    pub period_high: f64,
    pub period_low: f64,
    pub sma_20: Option<f64>,
    pub sma_50: Option<f64>,
    pub recent: Vec<PriceBar>,
}

/// One news search hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsSnippet {
    pub title: String,
    pub source: String,
    pub published: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn bar(day: &str, close: f64) -> PriceBar {
        PriceBar {
            date: date(day),
            open: close - 1.0,
            high: close + 2.0,
            low: close - 2.0,
            close,
            volume: 1_000,
        }
    }

    #[test]
    fn test_ticker_parse() {
        assert_eq!(Ticker::parse("  AAPL ").unwrap().as_str(), "AAPL");
        assert_eq!(Ticker::parse("brk-b").unwrap().as_str(), "brk-b");
        assert!(matches!(Ticker::parse(""), Err(DataError::InvalidTicker(_))));
        assert!(Ticker::parse(" \t").is_err());
    }

    #[test]
    fn test_ticker_serde() {
        let t: Ticker = serde_json::from_str("\"MSFT\"").unwrap();
        assert_eq!(t.as_str(), "MSFT");
        assert!(serde_json::from_str::<Ticker>("\"  \"").is_err());
    }

    #[test]
    fn test_default_range_is_fixed() {
        let range = DateRange::default();
        assert_eq!(range.to_string(), "2023-08-08..2024-08-08");
    }

    #[test]
    fn test_range_validation() {
        assert!(DateRange::parse("2024-01-01", "2024-01-01").is_ok());
        assert!(matches!(
            DateRange::parse("2024-08-08", "2023-08-08"),
            Err(DataError::InvalidRange(_))
        ));
        assert!(DateRange::parse("yesterday", "2024-01-01").is_err());
    }

    #[test]
    fn test_range_serde_is_validated() {
        let range: DateRange =
            serde_json::from_str(r#"{"start":"2023-08-08","end":"2024-08-08"}"#).unwrap();
        assert_eq!(range, DateRange::default());

        let inverted = serde_json::from_str::<DateRange>(r#"{"start":"2024-08-08","end":"2023-08-08"}"#);
        assert!(inverted.unwrap_err().to_string().contains("is after end"));
    }

    #[test]
    fn test_series_sorted() {
        let series = PriceSeries::new(
            Ticker::parse("AAPL").unwrap(),
            vec![bar("2024-01-03", 3.0), bar("2024-01-01", 1.0), bar("2024-01-02", 2.0)],
        );
        let dates: Vec<_> = series.bars().iter().map(|b| b.date.to_string()).collect();
        assert_eq!(dates, ["2024-01-01", "2024-01-02", "2024-01-03"]);
    }

    #[test]
    fn test_summary() {
        let bars: Vec<_> = (0..60)
            .map(|i| {
                let day = date("2024-01-01") + chrono::Duration::days(i);
                PriceBar {
                    date: day,
                    ..bar("2024-01-01", 100.0 + i as f64)
                }
            })
            .collect();
        let series = PriceSeries::new(Ticker::parse("AAPL").unwrap(), bars);
        let summary = series.summary().unwrap();

        assert_eq!(summary.bars, 60);
        assert_eq!(summary.first_close, 100.0);
        assert_eq!(summary.last_close, 159.0);
        assert_eq!(summary.change, 59.0);
        assert_eq!(summary.change_pct, 59.0);
        assert_eq!(summary.period_high, 161.0);
        assert_eq!(summary.period_low, 98.0);
        // mean of closes 140..=159
        assert_eq!(summary.sma_20, Some(149.5));
        assert_eq!(summary.sma_50, Some(134.5));
        assert_eq!(summary.recent.len(), 10);
        assert_eq!(summary.recent[9].close, 159.0);
    }

    #[test]
    fn test_summary_short_and_empty() {
        let short = PriceSeries::new(Ticker::parse("X").unwrap(), vec![bar("2024-01-01", 5.0)]);
        let summary = short.summary().unwrap();
        assert_eq!(summary.sma_20, None);
        assert_eq!(summary.change, 0.0);

        let empty = PriceSeries::new(Ticker::parse("X").unwrap(), Vec::new());
        assert!(empty.summary().is_none());
    }
}
