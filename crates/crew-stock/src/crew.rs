//! The three-agent research crew
//!
//! Price analyst, then news analyst, then writer. The writer receives both
//! earlier outputs as context and may delegate follow-up questions to the
//! two analysts.

use chrono::NaiveDate;
use crew_core::{Agent, Inputs, Result};
use crew_llm::ModelClient;
use crew_runtime::{AgentConfig, AgentRuntime};
use crew_tools::{Tool, ToolRegistry};
use crew_workflow::{Crew, CrewOutput, Process, Task};
use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::{NewsSearcher, PriceFetcher};
use crate::config::ResearchConfig;
use crate::prompts;
use crate::tools::{NewsSearchTool, StockPriceTool};
use crate::types::Ticker;

pub const PRICE_TASK_NAME: &str = "get_stock_price";
pub const NEWS_TASK_NAME: &str = "get_news";
pub const WRITER_TASK_NAME: &str = "write_analysis";

/// Agents, tasks and crew, built once and shared by every run
pub struct ResearchCrew {
    crew: Crew,
    config: ResearchConfig,
}

impl ResearchCrew {
    pub fn new(
        model: Arc<dyn ModelClient>,
        fetcher: Arc<dyn PriceFetcher>,
        searcher: Arc<dyn NewsSearcher>,
        config: ResearchConfig,
    ) -> Result<Self> {
        config.validate()?;

        let runtime = AgentRuntime::builder()
            .model(model)
            .model_name(config.model.clone())
            .max_tokens(config.max_tokens)
            .temperature(config.temperature)
            .build()?;

        let price_tool: Arc<dyn Tool> = Arc::new(StockPriceTool::new(fetcher, config.price_range));
        let news_tool: Arc<dyn Tool> = Arc::new(NewsSearchTool::new(searcher, config.news_limit));

        let price_analyst: Arc<dyn Agent> = Arc::new(runtime.create_agent(
            AgentConfig::builder(prompts::PRICE_ANALYST_ROLE)
                .goal(prompts::PRICE_ANALYST_GOAL)
                .backstory(prompts::PRICE_ANALYST_BACKSTORY)
                .max_iter(config.max_iter)
                .build()?,
            ToolRegistry::new().with(price_tool.clone())?,
        ));

        let news_analyst: Arc<dyn Agent> = Arc::new(runtime.create_agent(
            AgentConfig::builder(prompts::NEWS_ANALYST_ROLE)
                .goal(prompts::NEWS_ANALYST_GOAL)
                .backstory(prompts::NEWS_ANALYST_BACKSTORY)
                .max_iter(config.max_iter)
                .build()?,
            ToolRegistry::new().with(news_tool)?,
        ));

        let writer: Arc<dyn Agent> = Arc::new(
            runtime
                .create_agent(
                    AgentConfig::builder(prompts::WRITER_ROLE)
                        .goal(prompts::WRITER_GOAL)
                        .backstory(prompts::WRITER_BACKSTORY)
                        .max_iter(config.max_iter)
                        .allow_delegation(true)
                        .build()?,
                    ToolRegistry::new().with(price_tool)?,
                )
                .with_coworkers(vec![price_analyst.clone(), news_analyst.clone()])?,
        );

        let crew = Crew::builder()
            .process(Process::Sequential)
            .task(
                Task::builder(PRICE_TASK_NAME)
                    .description(prompts::PRICE_TASK)
                    .expected_output(prompts::PRICE_TASK_EXPECTED)
                    .agent(price_analyst)
                    .build()?,
            )
            .task(
                Task::builder(NEWS_TASK_NAME)
                    .description(prompts::NEWS_TASK)
                    .expected_output(prompts::NEWS_TASK_EXPECTED)
                    .agent(news_analyst)
                    .build()?,
            )
            .task(
                Task::builder(WRITER_TASK_NAME)
                    .description(prompts::WRITER_TASK)
                    .expected_output(prompts::WRITER_TASK_EXPECTED)
                    .agent(writer)
                    .context(PRICE_TASK_NAME)
                    .context(NEWS_TASK_NAME)
                    .build()?,
            )
            .build()?;

        Ok(Self { crew, config })
    }

    pub fn config(&self) -> &ResearchConfig {
        &self.config
    }

    /// Research one ticker
    ///
    /// A blank ticker fails with a validation error before any provider or
    /// model call.
    #[instrument(skip(self), fields(current_date = %current_date))]
    pub async fn kickoff(&self, ticker: &str, current_date: NaiveDate) -> Result<CrewOutput> {
        let ticker = Ticker::parse(ticker)?;
        info!(ticker = %ticker, "Research started");

        let inputs = Inputs::new()
            .with_ticker(ticker.as_str())
            .with_current_date(current_date.format("%Y-%m-%d").to_string())
            .with_reference_asset(self.config.reference_asset.as_str());

        self.crew.kickoff(&inputs).await
    }
}
