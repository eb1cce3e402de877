//! pgql-client - demonstration client for a remote graph-analytics server.
//!
//! Exchanges a username/password for a bearer token, prints a report of the
//! token, then opens a session and runs a single PGQL statement against a
//! shared graph.

use std::io;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pgql_client::utils::format::{format_row, token_report};
use pgql_client::{ApiClient, Config, TokenManager};

/// Statement run by the demo: edge counts grouped by label.
const DEMO_STATEMENT: &str =
    "SELECT label(e) AS label, COUNT(*) AS num_edges MATCH () -[e]-> () GROUP BY label(e)";

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let config = match Config::from_args(&args) {
        Some(config) => config,
        None => Config::from_env().context(
            "usage: pgql-client <server-url> <username> <password> <graph> \
             (or set the GRAPH_SERVER_* variables)",
        )?,
    };

    println!("Connecting to graph server {}", config.server_url);
    info!(server = %config.server_url, user = %config.username, "authenticating");
    let manager =
        TokenManager::connect(&config.server_url, &config.username, &config.password).await?;
    print!("{}", token_report(&manager).await?);

    let token = manager
        .access_token()
        .await?
        .context("no token present after successful logon")?;
    let client = ApiClient::new(manager.base_url())?.with_token(token);

    let version = client.fetch_version().await?;
    println!("Server version: {}", version.summary());
    if let Some(ref pgql) = version.pgql_version {
        println!("PGQL version: {}", pgql);
    }

    println!("Starting session");
    let session = client.create_session("pgql-client").await?;

    println!("Accessing graph \"{}\"", config.graph);
    println!("Running PGQL");
    let results = client
        .run_query(&session.session_id, &config.graph, DEMO_STATEMENT)
        .await?;

    println!("PGQL Results:");
    for row in &results.rows {
        println!("{}", format_row(row));
    }
    if results.is_empty() {
        println!("(no rows)");
    }

    client.close_session(&session.session_id).await?;
    info!("session closed");
    Ok(())
}
