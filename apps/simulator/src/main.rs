mod cli;
mod config;
mod errors;
mod interview;
mod llm_client;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::cli::{Cli, Command, RunArgs};
use crate::config::Config;
use crate::llm_client::{ChatCompletion, LlmClient};
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli
        .command
        .unwrap_or_else(|| Command::Run(RunArgs::default()))
    {
        // Reading a saved run needs neither credentials nor a client
        Command::Show(args) => cli::show(&args),
        Command::Run(args) => {
            let (config, llm) = bootstrap()?;
            cli::run(args, &config, llm).await
        }
        Command::Serve(args) => {
            let (config, llm) = bootstrap()?;
            serve(config, llm, args.port).await
        }
    }
}

/// Loads configuration, initializes logging, and builds the LLM client.
fn bootstrap() -> Result<(Config, Arc<dyn ChatCompletion>)> {
    // Load configuration first (fails on a missing API key)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting interview-sim v{}", env!("CARGO_PKG_VERSION"));

    let llm: Arc<dyn ChatCompletion> = Arc::new(LlmClient::new(
        config.groq_api_key.clone(),
        &config.llm_base_url,
    )?);
    info!(
        "LLM client initialized (interviewer model: {})",
        config.interviewer_model
    );

    Ok((config, llm))
}

async fn serve(config: Config, llm: Arc<dyn ChatCompletion>, port: Option<u16>) -> Result<()> {
    let port = port.unwrap_or(config.port);

    let state = AppState {
        llm,
        settings: config.simulation_settings(),
        config,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{port}").parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
