use axum::{Json, extract::State};
use chrono::NaiveDate;
use crew_stock::report;
use std::sync::Arc;

use super::dto::{HealthResponse, ResearchRequest, ResearchResponse};
use super::error::ApiError;
use super::state::AppState;

/// POST /api/research - Run the crew for one ticker
pub async fn research(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ResearchRequest>,
) -> Result<Json<ResearchResponse>, ApiError> {
    let ticker = req.ticker.trim().to_string();
    if ticker.is_empty() {
        return Err(ApiError::Validation("Ticker cannot be empty".into()));
    }

    let date = match req.date.as_deref().map(str::trim).filter(|d| !d.is_empty()) {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .map_err(|e| ApiError::Validation(format!("Invalid date '{raw}': {e}")))?,
        None => chrono::Local::now().date_naive(),
    };

    let output = state.crew.kickoff(&ticker, date).await?;
    let highlights = report::extract(&output.final_output);
    tracing::info!(ticker = %ticker, trend = ?highlights.trend, "research finished");

    Ok(Json(ResearchResponse {
        ticker,
        date,
        newsletter: output.final_output,
        highlights,
        tasks: output.tasks_output,
    }))
}

/// GET /health - Health check
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
