//! Decomp Driver - Main Entry Point
//! Runs one pipeline job per manifest, concurrently, and prints JSON reports.

use anyhow::{Context, Result};
use std::sync::Arc;
use tokio::task::JoinSet;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use decomp_core::port::UuidProvider;
use decomp_driver::config::DEFAULT_LOG_FILTER;
use decomp_driver::{collect_reports, run_job, DriverConfig, JobManifest, JobReport, LogFormat};
use decomp_infra_demangler::builtin_factories;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Load configuration
    let config = DriverConfig::from_env().context("Invalid driver configuration")?;

    // 2. Initialize logging
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_FILTER))
        .context("Failed to create env filter")?;

    match config.log_format {
        LogFormat::Json => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }

    info!(version = VERSION, manifests = config.manifests.len(), "Decomp driver starting");

    // 3. One job per manifest, each with its own pipeline context
    let id_provider = Arc::new(UuidProvider);
    let mut jobs: JoinSet<Result<JobReport>> = JoinSet::new();
    for path in config.manifests.clone() {
        let registry_config = config.registry_config();
        let id_provider = id_provider.clone();
        jobs.spawn_blocking(move || {
            let manifest = JobManifest::load(&path)
                .with_context(|| format!("Failed to load manifest {}", path.display()))?;
            Ok(run_job(&manifest, builtin_factories(), registry_config, id_provider))
        });
    }

    // 4. Collect reports
    let outcome = collect_reports(jobs).await;
    for report in &outcome.reports {
        println!("{}", serde_json::to_string(report)?);
    }

    if outcome.failed > 0 {
        anyhow::bail!("{} job(s) failed", outcome.failed);
    }

    info!("All jobs complete.");
    Ok(())
}
