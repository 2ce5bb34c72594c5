//! Tool for searching recent news

use async_trait::async_trait;
use crew_core::Result;
use crew_llm::tools::schema;
use crew_tools::{Tool, decode_input};
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::api::NewsSearcher;

/// Searches news for one asset per call
pub struct NewsSearchTool {
    searcher: Arc<dyn NewsSearcher>,
    limit: usize,
}

#[derive(Debug, Deserialize)]
struct NewsSearchInput {
    query: String,
    #[serde(default)]
    max_results: Option<usize>,
}

impl NewsSearchTool {
    /// `limit` caps the results of every search
    pub fn new(searcher: Arc<dyn NewsSearcher>, limit: usize) -> Self {
        Self {
            searcher,
            limit: limit.max(1),
        }
    }
}

#[async_trait]
impl Tool for NewsSearchTool {
    async fn execute(&self, params: Value) -> Result<Value> {
        let input: NewsSearchInput = decode_input(self.name(), params)?;
        let query = input.query.trim();
        if query.is_empty() {
            return Err(crew_core::Error::ProcessingFailed(
                "query must not be empty".to_string(),
            ));
        }
        let max_results = input.max_results.unwrap_or(self.limit).clamp(1, self.limit);

        let snippets = self.searcher.search(query, max_results).await?;
        Ok(json!({
            "query": query,
            "count": snippets.len(),
            "results": snippets,
        }))
    }

    fn name(&self) -> &str {
        "news_search"
    }

    fn description(&self) -> &str {
        "Search recent market news for one stock or asset. Call it once per asset."
    }

    fn input_schema(&self) -> Value {
        schema::object(
            json!({
                "query": schema::string("Ticker or asset name to search news for"),
                "max_results": schema::integer("Maximum number of articles", 1, self.limit as i64),
            }),
            &["query"],
        )
    }
}
