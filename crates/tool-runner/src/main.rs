//! Tool runner - dispatches agent tool calls from the command line.

mod cli;
mod config;
mod error;
mod setup;

use crate::cli::{Cli, Command};
use crate::config::{Config, LogFormat, LoggingConfig};
use crate::error::AppResult;
use anyhow::Context;
use clap::Parser;
use std::sync::Arc;
use tools::{ToolCall, ToolExecutor};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.logging);

    debug!(
        max_search_results = config.context.max_search_results,
        "Configuration loaded"
    );

    let registry = setup::build_registry(&config).context("Failed to build tools")?;
    let executor = ToolExecutor::new(Arc::new(registry))
        .with_timeout(config.executor.timeout)
        .with_max_response_len(config.executor.max_response_len);

    match cli.command {
        Command::List => {
            let definitions = executor.registry().get_definitions();
            println!("{}", serde_json::to_string_pretty(&definitions)?);
        }
        Command::Call { tool, arguments } => {
            let call = ToolCall::new("cli-call-1", tool, arguments);
            let result = executor.execute(&call).await;
            println!("{}", result.content);

            if !result.success {
                info!("Tool call failed");
                std::process::exit(1);
            }
        }
    }

    Ok(())
}

fn init_logging(config: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    // Logs go to stderr; stdout carries tool output.
    let registry = tracing_subscriber::registry().with(filter);
    match config.format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init(),
        LogFormat::Text => registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init(),
    }
}
