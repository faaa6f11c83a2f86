//! AnySite - turn any website into callable tools
//!
//! Main entry point for the AnySite CLI.

mod app;
mod cli;

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use tracing::{info, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use anysite_config::{ConfigLoader, ConfigValidator};
use anysite_core::{DiscoverOptions, IntegrationConfig, IntegrationStatus};

use crate::app::{App, integration_name, parse_args, tool_line};
use crate::cli::{Cli, Commands};

/// `~/.anysite`.
fn anysite_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".anysite")
}

/// Initialize tracing with a stderr console layer and a daily rolling file
/// under ~/.anysite/logs/.
fn init_tracing() -> anyhow::Result<()> {
    let log_dir = anysite_dir().join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("anysite")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Flushes the file writer at exit.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

fn discover_options(skip_llm: bool) -> DiscoverOptions {
    DiscoverOptions::new()
        .with_skip_llm(skip_llm)
        .with_progress(|stage, message| eprintln!("  Stage {}: {}", stage.number(), message))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing()?;

    let config = ConfigLoader::load_or_default(cli.config.as_deref())?;
    let report = ConfigValidator::validate(&config);
    for warning in &report.warnings {
        warn!("Config: {}", warning);
    }
    if !report.is_valid() {
        for error in &report.errors {
            eprintln!("Config error: {}", error);
        }
        bail!("invalid configuration");
    }

    let app = App::from_config(&config)?;

    match cli.command {
        Commands::Analyze { url, skip_llm, json } => {
            let skip_llm = app.skip_llm(skip_llm || config.discovery.skip_llm);
            run_analyze(&app, &url, skip_llm, json).await
        }
        Commands::Call {
            url,
            tool,
            args,
            skip_llm,
        } => {
            let skip_llm = app.skip_llm(skip_llm || config.discovery.skip_llm);
            let args = parse_args(args.as_deref())?;
            run_call(&app, &url, &tool, args, skip_llm).await
        }
    }
}

async fn run_analyze(app: &App, url: &str, skip_llm: bool, json: bool) -> anyhow::Result<()> {
    eprintln!("Analyzing {}...", url);
    let name = integration_name(url);
    let entry = app
        .hub
        .connect(IntegrationConfig::new(&name, url), &discover_options(skip_llm))
        .await;
    if entry.status == IntegrationStatus::Error {
        bail!("{}", entry.error.unwrap_or_default());
    }

    let via = entry.discovered_via.map(|v| v.as_str()).unwrap_or("unknown");
    if json {
        let result = serde_json::json!({
            "tools": entry.tools,
            "sourceUrl": url,
            "discoveredVia": via,
        });
        println!("{}", serde_json::to_string_pretty(&result)?);
        return Ok(());
    }

    println!("\nDiscovered {} tools (via {}):\n", entry.tools.len(), via);
    for tool in &entry.tools {
        println!("{}", tool_line(tool));
    }
    Ok(())
}

async fn run_call(
    app: &App,
    url: &str,
    tool: &str,
    args: anysite_protocols::Args,
    skip_llm: bool,
) -> anyhow::Result<()> {
    let name = integration_name(url);
    let entry = app
        .hub
        .connect(IntegrationConfig::new(&name, url), &discover_options(skip_llm))
        .await;
    if entry.status == IntegrationStatus::Error {
        bail!("{}", entry.error.unwrap_or_default());
    }
    info!("Calling {} on {}", tool, name);

    let output = app.hub.call(&name, tool, &args).await?;
    println!("{}", serde_json::to_string_pretty(&output.into_value())?);
    Ok(())
}
