// ============================
// chatter-server/src/main.rs
// ============================
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chatter_backend::{
    config::{LogFormat, Settings, StorageBackend},
    create_router,
    store::{FlatFileUserStore, MemoryUserStore, UserStore},
    AppState,
};
use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

/// chatter user-account server
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// TOML configuration file
    #[arg(long, default_value = "config.toml")]
    config: PathBuf,

    /// Override the configured bind address
    #[arg(long)]
    bind: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let mut settings = Settings::load_from(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?;
    if let Some(bind) = args.bind {
        settings.bind_addr = bind;
    }
    settings.validate().context("invalid configuration")?;

    init_tracing(&settings);
    tracing::info!(?settings, "configuration loaded");

    match settings.storage.backend {
        StorageBackend::FlatFile => {
            let store = FlatFileUserStore::open(&settings.storage.path)
                .await
                .with_context(|| format!("opening {}", settings.storage.path.display()))?;
            serve(store, &settings).await
        },
        StorageBackend::Memory => {
            tracing::warn!("using in-memory store; users are lost on restart");
            serve(MemoryUserStore::new(), &settings).await
        },
    }
}

fn init_tracing(settings: &Settings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_level));

    match settings.log_format {
        LogFormat::Pretty => tracing_subscriber::fmt().with_env_filter(filter).init(),
        LogFormat::Json => tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init(),
    }
}

async fn serve<S: UserStore + 'static>(storage: S, settings: &Settings) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(storage, settings)?);
    let app = create_router(state);

    let listener = TcpListener::bind(settings.bind_addr)
        .await
        .with_context(|| format!("binding {}", settings.bind_addr))?;
    tracing::info!(addr = %settings.bind_addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
}
