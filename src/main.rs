use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use apc_env_exporter::{
    AppConfig, MetricDescriptors, SnmpConnector, build_orchestrator,
    routes::{AppState, create_router},
};

/// Prometheus exporter for APC environmental sensors
#[derive(Parser, Debug)]
#[command(name = "apc-env-exporter", version, about, long_about = None)]
struct Cli {
    /// Path to an optional YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Comma-separated list of SNMP targets
    #[arg(long = "snmp.targets")]
    targets: Option<String>,

    /// SNMPv2c community string
    #[arg(long = "snmp.community")]
    community: Option<String>,

    /// Address to listen on for HTTP requests
    #[arg(long = "web.listen-address")]
    listen_address: Option<String>,

    /// Path under which to expose metrics
    #[arg(long = "web.telemetry-path")]
    telemetry_path: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,apc_env_exporter=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_ref())?;

    // CLI > ENV > config file
    config.apply_env_overrides()?;
    if let Some(targets) = cli.targets {
        config.settings.targets = targets;
    }
    if let Some(community) = cli.community {
        config.settings.auth.v2c.community = community;
    }
    if let Some(listen) = cli.listen_address {
        config.settings.web.listen_address = listen;
    }
    if let Some(path) = cli.telemetry_path {
        config.settings.web.telemetry_path = path;
    }

    config.validate()?;
    config.debug_config();

    let descriptors = Arc::new(MetricDescriptors::new().context("invalid metric descriptors")?);
    for desc in descriptors.describe() {
        tracing::debug!(name = %desc.fq_name, labels = ?desc.variable_labels, "descriptor declared");
    }

    let connector = Arc::new(SnmpConnector::new(
        config.get_community(),
        config.get_port(),
        config.get_timeout(),
    ));
    let orchestrator = Arc::new(build_orchestrator(&config, connector));

    let state = AppState {
        orchestrator,
        descriptors,
        telemetry_path: config.settings.web.telemetry_path.clone(),
    };
    let app = create_router(state);

    let addr: SocketAddr = config
        .settings
        .web
        .listen_address
        .parse()
        .with_context(|| format!("invalid listen address {}", config.settings.web.listen_address))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;
    tracing::info!(
        "listening on http://{}{}",
        addr,
        config.settings.web.telemetry_path
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => tracing::info!("received Ctrl+C"),
        _ = terminate => tracing::info!("received terminate signal"),
    }
}
