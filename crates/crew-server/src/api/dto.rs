use chrono::NaiveDate;
use crew_stock::ReportHighlights;
use crew_workflow::TaskOutput;
use serde::{Deserialize, Serialize};

// ============ Request DTOs ============

#[derive(Deserialize)]
pub struct ResearchRequest {
    pub ticker: String,
    /// `YYYY-MM-DD`; defaults to today
    #[serde(default)]
    pub date: Option<String>,
}

// ============ Response DTOs ============

#[derive(Serialize)]
pub struct ResearchResponse {
    pub ticker: String,
    pub date: NaiveDate,
    pub newsletter: String,
    pub highlights: ReportHighlights,
    pub tasks: Vec<TaskOutput>,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
