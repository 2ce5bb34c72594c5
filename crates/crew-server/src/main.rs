//! Command-line entry point for the stock research crew

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use crew_server::{api, build_crew};
use crew_utils::Secrets;
use std::net::SocketAddr;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-research")]
#[command(about = "Multi-agent stock research newsletter", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Serve the research form over HTTP
    Serve {
        #[arg(long, default_value = "127.0.0.1:8080")]
        bind: SocketAddr,
    },
    /// Run one research and print the newsletter
    Run {
        ticker: String,
        /// Date given to the news analyst (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    crew_utils::init_tracing();

    let args = Args::parse();
    let secrets = Secrets::load()?;
    let crew = build_crew(&secrets)?;

    match args.command {
        Command::Serve { bind } => {
            let app = api::router(api::AppState::new(crew));
            let listener = tokio::net::TcpListener::bind(bind)
                .await
                .with_context(|| format!("Failed to bind {bind}"))?;
            info!("Listening on http://{}", bind);
            axum::serve(listener, app).await?;
        }
        Command::Run { ticker, date } => {
            let date = date.unwrap_or_else(|| chrono::Local::now().date_naive());
            info!(ticker = %ticker, %date, "Starting research");
            let output = crew.kickoff(&ticker, date).await?;
            println!("{}", output.final_output);
        }
    }

    Ok(())
}
