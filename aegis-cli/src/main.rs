//! Aegis command-line entry point
//!
//! Runs one scan, streaming progress lines to stderr, then prints the record
//! and the advisory to stdout (plain text or JSON).

mod cli;
mod config;
mod render;

use std::process::ExitCode;
use std::sync::Arc;

use aegis_core::{PacingConfig, ScanReport, SecurityScanService, ServiceContext};
use tokio::sync::broadcast::error::RecvError;
use clap::Parser;
use cli::Cli;
use config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> ExitCode {
    // Logs go to stderr; stdout carries the report
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .without_time()
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();

    match run(&cli).await {
        Ok(report) => {
            if cli.json {
                match serde_json::to_string_pretty(&report) {
                    Ok(json) => println!("{json}"),
                    Err(e) => {
                        tracing::error!("Failed to serialize report: {e}");
                        return ExitCode::FAILURE;
                    }
                }
            } else {
                print!("{}", render::report_text(&report));
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: &Cli) -> anyhow::Result<ScanReport> {
    let config = AppConfig::load(cli.config.as_deref())?;

    let pacing = if cli.no_pacing {
        PacingConfig::none()
    } else {
        config.pacing_config()
    };
    let advisory = config.advisory_config();
    if !cli.skip_advisory && advisory.credential().is_none() {
        tracing::warn!(
            "No advisory API key configured (set {} or advisory.api_key)",
            config::API_KEY_ENV
        );
    }

    let ctx = Arc::new(ServiceContext::from_settings(
        &config.geo_options(),
        advisory,
        pacing,
    ));
    let service = SecurityScanService::new(&ctx);

    // 每个步骤打印一行，服务释放后通道关闭
    let mut steps = service.subscribe_steps();
    let printer = tokio::spawn(async move {
        loop {
            match steps.recv().await {
                Ok(step) => eprintln!("{}", render::progress_line(step)),
                Err(RecvError::Lagged(n)) => tracing::debug!("Progress printer skipped {n} steps"),
                Err(RecvError::Closed) => break,
            }
        }
    });

    let result = if cli.skip_advisory {
        service.scan_without_advisory().await
    } else {
        service.scan().await
    };
    let report = result.inspect_err(|e| {
        if e.is_expected() {
            tracing::warn!("Scan not started: {e}");
        }
    })?;

    drop(service);
    if let Err(e) = printer.await {
        tracing::warn!("Progress printer failed: {e}");
    }

    if !report.record.success {
        tracing::warn!("IP lookup failed on all providers; showing placeholder record");
    }
    Ok(report)
}
