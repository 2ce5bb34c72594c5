use askama::Template;
use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use crew_stock::report;
use std::sync::Arc;

use crate::api::error::status_for;
use crate::api::markdown;
use crate::api::state::AppState;

pub const EMPTY_TICKER_MESSAGE: &str = "Please fill the ticker field";

/// Helper to render templates into axum responses
fn render_template<T: Template>(template: &T) -> Response {
    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template render error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Template error: {}", e),
            )
                .into_response()
        }
    }
}

/// GET / and POST /research - the research form, with an error or a result
#[derive(Template, Default)]
#[template(path = "index.html")]
pub struct ResearchPage {
    pub ticker: String,
    pub error: Option<String>,
    pub result: Option<ResultView>,
}

/// A finished newsletter as shown on the page
pub struct ResultView {
    pub ticker: String,
    /// Newsletter rendered from markdown, safe to embed
    pub html: String,
    pub trend: Option<String>,
    pub scores: Vec<ScoreView>,
}

pub struct ScoreView {
    pub asset: String,
    pub score: u8,
}

pub async fn index() -> Response {
    render_template(&ResearchPage::default())
}

#[derive(serde::Deserialize)]
pub struct ResearchForm {
    #[serde(default)]
    pub ticker: String,
}

pub async fn research(State(state): State<Arc<AppState>>, Form(form): Form<ResearchForm>) -> Response {
    let ticker = form.ticker.trim().to_string();

    if ticker.is_empty() {
        let page = ResearchPage {
            error: Some(EMPTY_TICKER_MESSAGE.to_string()),
            ..ResearchPage::default()
        };
        return (StatusCode::UNPROCESSABLE_ENTITY, render_template(&page)).into_response();
    }

    let today = chrono::Local::now().date_naive();
    match state.crew.kickoff(&ticker, today).await {
        Ok(output) => {
            let highlights = report::extract(&output.final_output);
            let result = ResultView {
                ticker: ticker.clone(),
                trend: highlights.trend.map(|t| t.to_string()),
                scores: highlights
                    .scores
                    .into_iter()
                    .map(|s| ScoreView {
                        asset: s.asset.unwrap_or_else(|| "-".to_string()),
                        score: s.score,
                    })
                    .collect(),
                html: markdown::to_html(&output.final_output),
            };
            render_template(&ResearchPage {
                ticker,
                error: None,
                result: Some(result),
            })
        }
        Err(e) => {
            let kind = e.kind();
            tracing::error!(ticker = %ticker, kind = kind.as_str(), error = %e, "Research failed");
            let page = ResearchPage {
                ticker,
                error: Some(format!("Research failed ({}): {e}", kind.as_str())),
                result: None,
            };
            (status_for(kind), render_template(&page)).into_response()
        }
    }
}
