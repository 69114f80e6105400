//! nodewarden daemon
//!
//! Loads seed nodes from configuration, starts the ones marked `autostart`,
//! runs the health monitor and tears every listener down on Ctrl-C.

#![allow(missing_docs)]

use clap::Parser;
use nodewarden::{
    BroadcastNotifier, Config, ConfigSource, MemoryNodeStore, NodeManager, NodeStore, Result,
    WardenError, build_info, utils::logging::init_logging,
};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "nodewarden", version, about = "Node lifecycle supervisor and health monitor")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, env = "NODEWARDEN_CONFIG", default_value = "config/nodewarden.yaml")]
    config: PathBuf,

    /// Override the configured log level
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<()> {
    let (mut config, source) = Config::from_file_or_env(&args.config).await?;

    if let Some(level) = args.log_level {
        config.warden.logging.level = level;
        config.validate()?;
    }
    init_logging(config.logging())?;

    let build = build_info();
    info!(version = build.version, git_hash = build.git_hash, "Starting nodewarden");
    match source {
        ConfigSource::File => info!("Configuration loaded from {}", args.config.display()),
        ConfigSource::Environment => warn!(
            "Config file {} not found, using default configuration",
            args.config.display()
        ),
    }

    let seeds = config.seed_nodes()?;
    let store = Arc::new(MemoryNodeStore::with_nodes(seeds.iter().cloned()));
    let notifier = Arc::new(BroadcastNotifier::default());
    let manager = NodeManager::new(config.manager_settings(), store.clone(), notifier.clone());

    let events = tokio::spawn(log_events(notifier.clone()));

    for seed in config.nodes().iter().filter(|s| s.autostart) {
        let Some(node) = store.find_by_id(seed.id.into()).await? else {
            continue;
        };
        if let Err(e) = manager.start_node(&node).await {
            error!(node_id = %node.id, error = %e, "Failed to start node");
        }
    }

    let cancel = CancellationToken::new();
    let monitor = config
        .monitor()
        .enabled
        .then(|| manager.spawn_monitor(cancel.clone()));

    info!(
        nodes = seeds.len(),
        running = manager.supervisor().running_count(),
        "nodewarden ready"
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| WardenError::internal(format!("Failed to listen for shutdown signal: {}", e)))?;
    info!("Shutdown signal received");

    cancel.cancel();
    if let Some(monitor) = monitor {
        monitor.shutdown().await;
    }
    let stopped = manager.stop_all().await;
    events.abort();

    info!(stopped, "nodewarden stopped");
    Ok(())
}

async fn log_events(notifier: Arc<BroadcastNotifier>) {
    let mut receiver = notifier.subscribe();
    loop {
        match receiver.recv().await {
            Ok(event) => match event.to_json() {
                Ok(payload) => info!(%payload, "Health event"),
                Err(e) => warn!(error = %e, "Failed to encode health event"),
            },
            Err(RecvError::Lagged(skipped)) => {
                warn!(skipped, "Health event log lagging behind");
            }
            Err(RecvError::Closed) => break,
        }
    }
}
