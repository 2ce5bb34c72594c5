//! Web front end for the stock research crew
//!
//! Serves a one-field form at `/`, a JSON endpoint at `/api/research` and a
//! health check at `/health`.

pub mod api;

use anyhow::Context;
use crew_llm::providers::{OpenAIClient, OpenAIConfig};
use crew_stock::{ResearchConfig, ResearchCrew, YahooFinanceClient, YahooNewsClient};
use crew_utils::Secrets;
use std::sync::Arc;

/// Wire the production crew: OpenAI-compatible model plus Yahoo data sources
pub fn build_crew(secrets: &Secrets) -> anyhow::Result<ResearchCrew> {
    let mut llm = OpenAIConfig::new(secrets.require("OPENAI_API_KEY")?);
    if let Some(base) = secrets.get("OPENAI_API_BASE") {
        llm = llm.with_api_base(base);
    }
    let model = OpenAIClient::with_config(llm).context("Failed to create model client")?;

    let config = ResearchConfig::from_env().context("Invalid research configuration")?;
    let searcher =
        YahooNewsClient::new(config.http_timeout).context("Failed to create news client")?;

    tracing::info!(
        model = %config.model,
        reference_asset = %config.reference_asset,
        range = %config.price_range,
        "research crew configured"
    );

    let crew = ResearchCrew::new(
        Arc::new(model),
        Arc::new(YahooFinanceClient::new(config.http_timeout)),
        Arc::new(searcher),
        config,
    )?;
    Ok(crew)
}
