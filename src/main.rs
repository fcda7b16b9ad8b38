//! CLI entry point for the SEPTA routes builder.
//!
//! Fetches the published routes feed, attaches the frequent-bus flag and
//! schedule/map document links to every route, and writes the result to
//! `routes.json` in the working directory.

use anyhow::{Context, Result};
use clap::Parser;
use septa_routes::{
    annotate::annotate_all,
    fetch::{BasicClient, ROUTES_FEED_URL, fetch_routes, is_remote_source},
    logging,
    output::{DEFAULT_OUTPUT_PATH, write_routes},
    parser::parse_routes,
    route::Route,
};
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "septa_routes")]
#[command(about = "Builds routes.json with schedule and map links", long_about = None)]
struct Cli {
    /// Routes feed URL, or a local JSON file
    #[arg(short, long, value_name = "FILE_OR_URL", default_value = ROUTES_FEED_URL)]
    source: String,

    /// File to write the annotated routes to
    #[arg(short, long, default_value = DEFAULT_OUTPUT_PATH)]
    output: String,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    // File logging is opt-in; a log file that cannot be opened never stops a run.
    let log_file_path = std::env::var_os("LOG_FILE_PATH").map(PathBuf::from);
    let _file_guard = logging::init(log_file_path.as_deref())?;

    let cli = Cli::parse();

    if let Err(e) = run(&cli.source, &cli.output).await {
        error!(error = %format!("{e:#}"), "Failed to build routes file");
        return Err(e);
    }

    Ok(())
}

async fn run(source: &str, output: &str) -> Result<()> {
    let routes = load_routes(source).await?;
    let routes = annotate_all(routes);

    let frequent = routes
        .iter()
        .filter(|r| r.get("is_frequent_bus").and_then(|v| v.as_bool()) == Some(true))
        .count();
    info!(routes = routes.len(), frequent, "Routes annotated");

    write_routes(output, &routes)
}

/// Loads the routes feed from a local file path or fetches it over HTTP.
#[tracing::instrument]
async fn load_routes(source: &str) -> Result<Vec<Route>> {
    if is_remote_source(source) {
        let client = BasicClient::new();
        fetch_routes(&client, source).await
    } else {
        let bytes =
            std::fs::read(source).with_context(|| format!("failed to read '{source}'"))?;
        parse_routes(&bytes)
    }
}
