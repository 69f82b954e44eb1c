//! Relay Runner
//!
//! A daemon that polls the scheduling API for pending tasks, executes each
//! task as an outbound HTTP call to the named method, and reports the
//! outcome back.
//!
//! Architecture:
//! - Configuration: YAML file with environment interpolation, loaded once
//! - Client: typed HTTP access to the scheduling API (relay-client)
//! - Scheduler: polling loop with linear backoff feeding a bounded channel
//!   drained by a fixed pool of workers
//!
//! The runner has no shutdown path; it polls until the process is
//! terminated.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use relay_client::SchedulerClient;
use relay_runner::config::{self, Config};
use relay_runner::scheduler::Scheduler;

#[derive(Debug, Parser)]
#[command(name = "relay-runner", about = "Task polling daemon for the scheduling API")]
struct Args {
    /// Path to the configuration file
    #[arg(short = 'c', long = "config", default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // A broken configuration is the one fatal error: nothing else may take
    // the process down.
    let config = Config::load(&args.config)?;

    init_tracing(&config);

    info!("Starting relay runner");
    info!(
        "Loaded configuration from {}: api_url={}, workers={}, poll_interval={:?}",
        args.config.display(),
        config.scheduler.api_url,
        config.scheduler.worker_count,
        config.scheduler.poll_interval()
    );

    let http_client = reqwest::Client::builder()
        .timeout(config.scheduler.request_timeout())
        .build()
        .context("Failed to build HTTP client")?;

    let client = Arc::new(SchedulerClient::with_client(
        config.scheduler.api_url.clone(),
        http_client,
    ));

    let scheduler = Scheduler::new(config.scheduler, client);
    scheduler.run().await;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_ansi(config.logging.ansi))
        .init();
}
