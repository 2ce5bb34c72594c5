//! News search against the keyless Yahoo Finance search endpoint

use crate::error::{DataError, Result};
use crate::types::NewsSnippet;
use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, instrument};

const PROVIDER: &str = "yahoo_news";
const SEARCH_URL: &str = "https://query2.finance.yahoo.com/v1/finance/search";
// The endpoint rejects requests without a browser-like agent
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/126.0 Safari/537.36";

/// Source of recent news for a query
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait NewsSearcher: Send + Sync {
    /// At most `max_results` snippets, best match first; no match is an
    /// empty list
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<NewsSnippet>>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItem {
    title: String,
    #[serde(default)]
    publisher: Option<String>,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    provider_publish_time: Option<i64>,
    #[serde(default)]
    related_tickers: Vec<String>,
}

impl SearchItem {
    fn into_snippet(self) -> Option<NewsSnippet> {
        let published = DateTime::from_timestamp(self.provider_publish_time?, 0)?;
        let excerpt = (!self.related_tickers.is_empty())
            .then(|| format!("Related tickers: {}", self.related_tickers.join(", ")));
        Some(NewsSnippet {
            title: self.title,
            source: self.publisher.unwrap_or_else(|| "Unknown".to_string()),
            published,
            excerpt,
            link: self.link,
        })
    }
}

/// Yahoo Finance news search client
#[derive(Debug, Clone)]
pub struct YahooNewsClient {
    client: Client,
}

impl YahooNewsClient {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl NewsSearcher for YahooNewsClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, max_results: usize) -> Result<Vec<NewsSnippet>> {
        let count = max_results.to_string();
        let response = self
            .client
            .get(SEARCH_URL)
            .query(&[("q", query), ("newsCount", count.as_str()), ("quotesCount", "0")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(DataError::provider(PROVIDER, format!("HTTP {status}: {body}")));
        }

        let body: SearchResponse = response.json().await?;
        let snippets = parse_items(body, max_results);
        debug!(results = snippets.len(), "News search finished");
        Ok(snippets)
    }
}

fn parse_items(body: SearchResponse, max_results: usize) -> Vec<NewsSnippet> {
    body.news
        .into_iter()
        .filter_map(SearchItem::into_snippet)
        .take(max_results)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn body() -> SearchResponse {
        serde_json::from_value(json!({
            "explains": [],
            "count": 3,
            "news": [
                {
                    "uuid": "1",
                    "title": "Apple beats estimates",
                    "publisher": "Reuters",
                    "link": "https://example.com/a",
                    "providerPublishTime": 1_723_075_200,
                    "type": "STORY",
                    "relatedTickers": ["AAPL"]
                },
                {
                    "uuid": "2",
                    "title": "No timestamp, dropped",
                    "publisher": "Blog"
                },
                {
                    "uuid": "3",
                    "title": "Bitcoin steadies",
                    "providerPublishTime": 1_723_000_000
                }
            ]
        }))
        .unwrap()
    }

    #[test]
    fn test_parse_items() {
        let snippets = parse_items(body(), 10);
        assert_eq!(snippets.len(), 2);

        assert_eq!(snippets[0].title, "Apple beats estimates");
        assert_eq!(snippets[0].source, "Reuters");
        assert_eq!(snippets[0].published.to_rfc3339(), "2024-08-08T00:00:00+00:00");
        assert_eq!(snippets[0].excerpt.as_deref(), Some("Related tickers: AAPL"));

        assert_eq!(snippets[1].source, "Unknown");
        assert!(snippets[1].excerpt.is_none());
        assert!(snippets[1].link.is_none());
    }

    #[test]
    fn test_parse_items_truncates() {
        assert_eq!(parse_items(body(), 1).len(), 1);
    }

    #[test]
    fn test_missing_news_is_empty() {
        let empty: SearchResponse = serde_json::from_value(json!({"quotes": []})).unwrap();
        assert!(parse_items(empty, 10).is_empty());
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn test_search_live() {
        let client = YahooNewsClient::new(Duration::from_secs(30)).unwrap();
        let results = client.search("AAPL", 5).await.unwrap();
        assert!(results.len() <= 5);
    }
}
