use anyhow::{Context, Result};
use sentry::{
    integrations::{anyhow::capture_anyhow, tracing as sentry_tracing},
    ClientOptions, IntoDsn,
};
use structopt::StructOpt;
use tokio::{
    signal::unix::{signal, SignalKind},
    sync::broadcast,
    task,
};
use tracing::info;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

use args::Args;

mod args;
mod config;
mod ip;
mod provider;
mod updater;

use config::SharedConfig;
use updater::Updater;

#[tokio::main]
async fn main() -> Result<()> {
    // Parse the cli
    let cli = Args::from_args();

    // Get the configuration
    let configuration = config::load(&cli).context("Failed to load configuration")?;

    // Setup logging
    init_tracing(cli.log_level.unwrap_or_else(|| "info".into()));

    // Initialize sentry
    let _guard = sentry::init(sentry_config(&configuration.sentry)?);

    match run(configuration).await {
        Ok(()) => Ok(()),
        Err(e) => {
            capture_anyhow(&e);
            Err(e)
        }
    }
}

/// Start the update loop and wait for a shutdown signal
async fn run(configuration: SharedConfig) -> Result<()> {
    let (stop_tx, _) = broadcast::channel(1);

    // Start watching for address changes
    let updater = Updater::new(configuration).context("failed to start the updater")?;
    let updater_handle = task::spawn(updater.run(stop_tx.subscribe()));

    // Wait for shutdown
    wait_for_exit()
        .await
        .context("failed to listen for event")?;
    info!("signal received, shutting down...");

    // Shutdown the update loop
    stop_tx.send(()).unwrap();
    updater_handle.await.unwrap();

    info!("successfully shutdown, good bye!");
    Ok(())
}

/// Wait for a SIGINT or SIGTERM and then exit
async fn wait_for_exit() -> Result<()> {
    let mut int = signal(SignalKind::interrupt())?;
    let mut term = signal(SignalKind::terminate())?;

    tokio::select! {
        _ = int.recv() => Ok(()),
        _ = term.recv() => Ok(()),
    }
}

/// Generate a registry for tracing
fn init_tracing(raw_filter: String) {
    let filter = EnvFilter::builder().parse_lossy(raw_filter);

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_span_events(FmtSpan::CLOSE)
                .with_filter(filter),
        )
        .with(sentry_tracing::layer())
        .init();
}

/// Generate configuration for Sentry
fn sentry_config(url: &Option<String>) -> Result<ClientOptions> {
    let dsn = url
        .as_ref()
        .map(String::as_str)
        .map(IntoDsn::into_dsn)
        .transpose()
        .context("failed to parse Sentry DSN")?
        .flatten();

    let options = ClientOptions {
        dsn,
        release: sentry::release_name!(),
        attach_stacktrace: true,
        ..Default::default()
    };

    Ok(options)
}
