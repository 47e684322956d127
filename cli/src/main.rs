//! CLI entrypoint for askbatch
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use askbatch_application::{BatchProgressNotifier, NoProgress, RunBatchUseCase};
use askbatch_infrastructure::{ConfigLoader, FileConfig, RestNlpService, load_batch_file};
use askbatch_presentation::{Cli, OutputConfig, ProgressReporter, ReportFormatter, SimpleProgress};
use clap::Parser;
use std::io::IsTerminal;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    let Some(batch_path) = cli.batch_file.as_deref() else {
        bail!("A batch file is required. Use --show-config to inspect configuration sources.");
    };

    // === Configuration ===
    let mut file_config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref()).context("Failed to load configuration")?
    };
    apply_cli_overrides(&cli, &mut file_config);
    file_config.validate()?;

    let client_config = file_config.to_client_config()?;
    let output = OutputConfig {
        format: cli
            .output
            .map(Into::into)
            .or(file_config.output.format)
            .unwrap_or_default(),
        color: file_config.output.color && !cli.no_color,
        show_progress: !cli.quiet,
    };

    if !output.color {
        colored::control::set_override(false);
    }

    let sentences = load_batch_file(batch_path)?;
    info!(
        "Loaded {} sentence(s) from {}",
        sentences.len(),
        batch_path.display()
    );

    // === Dependency Injection ===
    let service = Arc::new(RestNlpService::new(
        &file_config.server.base_url,
        file_config.http_timeout(),
    )?);
    info!("Using service at {}", service.base_url());

    let use_case = RunBatchUseCase::new(service, client_config);

    let progress: Box<dyn BatchProgressNotifier> = if !output.show_progress {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let report = use_case
        .execute_with_progress(sentences, progress.as_ref())
        .await?
        .report;

    println!("{}", ReportFormatter::format(&report, output.format));

    if !report.is_clean() {
        bail!(
            "{} sentence(s) failed validation, {} unexpected outcome(s)",
            report.stats.failed,
            report.unexpected_outcomes()
        );
    }

    Ok(())
}

/// CLI flags take precedence over every config source.
fn apply_cli_overrides(cli: &Cli, config: &mut FileConfig) {
    if let Some(base_url) = &cli.base_url {
        config.server.base_url = base_url.clone();
    }
    if let Some(email) = &cli.email {
        config.server.email = email.clone();
    }
    if let Some(password) = &cli.password {
        config.server.password = password.clone();
    }
    if let Some(interval) = cli.check_interval_ms {
        config.execution.check_interval_ms = interval;
    }
    if let Some(budget) = cli.max_check_time_ms {
        config.execution.max_check_time_ms = budget;
    }
    if cli.clear_conversation {
        config.execution.clear_conversation = true;
    }
    if cli.sync {
        config.execution.async_mode = false;
    }
}
