use clap::Parser;
use ferrous_pathstore_domain::CliOverrides;
use ferrous_pathstore_infrastructure::path_store::SystemClock;
use ferrous_pathstore_jobs::{ExpirySweepJob, JobRunner};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::info;

mod bootstrap;
mod di;
mod replay;

#[derive(Parser)]
#[command(name = "ferrous-pathstore")]
#[command(version = "0.1.0")]
#[command(about = "Ferrous PathStore - candidate path cache for path-aware inter-domain routing")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// JSON file of segment announcements and withdrawals to replay
    #[arg(short = 's', long, value_name = "FILE")]
    segments: Option<String>,

    /// Number of best segments to report per destination
    #[arg(short = 'k', long)]
    best: Option<usize>,

    /// Keep running with the expiry sweep until interrupted
    #[arg(long)]
    serve: bool,

    /// Expiry sweep interval in seconds
    #[arg(long)]
    sweep_interval: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        log_level: cli.log_level.clone(),
        expiry_sweep_interval_secs: cli.sweep_interval,
    };

    let config = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config.logging);

    info!("Starting Ferrous PathStore v{}", env!("CARGO_PKG_VERSION"));

    let services = di::PathStoreServices::new(&config, Arc::new(SystemClock))?;

    if let Some(path) = cli.segments.as_deref() {
        let entries = replay::load_entries(path)?;
        info!(entries = entries.len(), path, "Replaying segments");
        let reports = replay::replay(&services, entries, cli.best).await?;
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }

    if cli.serve {
        let shutdown = CancellationToken::new();
        let sweep = ExpirySweepJob::new(services.registry.clone())
            .with_interval(config.store.expiry_sweep_interval_secs);

        JobRunner::new()
            .with_expiry_sweep(sweep)
            .with_shutdown_token(shutdown.clone())
            .start()
            .await;

        info!("Serving; press Ctrl-C to stop");
        tokio::signal::ctrl_c().await?;

        shutdown.cancel();
        services.registry.shutdown();
    }

    info!("Shutdown complete");
    Ok(())
}
