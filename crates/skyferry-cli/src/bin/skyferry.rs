//! Skyferry dispatcher - plan and record one day of drone deliveries.

use anyhow::Result;
use chrono::NaiveDate;
use clap::Parser;
use skyferry_cli::config::Config;
use skyferry_cli::dispatch;
use skyferry_core::planner::RoutePlanner;
use skyferry_rest::RestClient;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Plan and record a day of drone deliveries
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Delivery date to process (YYYY-MM-DD)
    #[arg(long)]
    date: NaiveDate,

    /// Base URL of the delivery data service (default: SKYFERRY_BASE_URL)
    #[arg(long)]
    url: Option<String>,

    /// Directory for result files (default: SKYFERRY_OUT_DIR)
    #[arg(long)]
    out_dir: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("skyferry_cli=info".parse()?)
                .add_directive("skyferry_rest=info".parse()?),
        )
        .init();

    let args = Args::parse();
    let config = Config::from_env();
    let base_url = args.url.unwrap_or(config.base_url);
    let out_dir = args.out_dir.unwrap_or_else(|| PathBuf::from(config.out_dir));

    let client = RestClient::new(&base_url);
    let no_fly_zones = client.get_no_fly_zones().await?;
    let central_area = client.get_central_area().await?;
    tracing::info!(
        "Loaded {} no-fly zones and the central area from {}",
        no_fly_zones.len(),
        base_url
    );

    let planner = RoutePlanner::new(no_fly_zones, central_area)?;
    dispatch::process_day_orders(&client, &planner, args.date, &out_dir).await
}
