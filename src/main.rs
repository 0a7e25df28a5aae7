//! Vitrina HTTP server entrypoint.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use vitrina::catalog::FsCatalogStore;
use vitrina::config::Config;
use vitrina::encoder::{EncoderAdapter, RemoteEncoder, RemoteEncoderConfig};
use vitrina::gateway::{HandlerState, create_router_with_state};
use vitrina::scoring::{RemoteTextScorer, RemoteTextScorerConfig};
use vitrina::search::SearchEngine;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    println!(
        r#"
██╗   ██╗██╗████████╗██████╗ ██╗███╗   ██╗ █████╗
██║   ██║██║╚══██╔══╝██╔══██╗██║████╗  ██║██╔══██╗
██║   ██║██║   ██║   ██████╔╝██║██╔██╗ ██║███████║
╚██╗ ██╔╝██║   ██║   ██╔══██╗██║██║╚██╗██║██╔══██║
 ╚████╔╝ ██║   ██║   ██║  ██║██║██║ ╚████║██║  ██║
  ╚═══╝  ╚═╝   ╚═╝   ╚═╝  ╚═╝╚═╝╚═╝  ╚═══╝╚═╝  ╚═╝

        RETRIEVE. RERANK. RANK.
                                        AGPL-3.0
"#
    );

    if std::env::args().any(|arg| arg == "--health-check") {
        std::process::exit(run_health_check());
    }

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let config = Config::from_env()?;
    config.validate()?;
    let addr: SocketAddr = config.socket_addr().parse()?;

    tracing::info!(
        bind_addr = %config.bind_addr,
        port = config.port,
        catalog_dir = %config.catalog_dir.display(),
        "Vitrina starting"
    );

    // Fail fast: a misaligned catalog must never serve queries.
    let catalog = Arc::new(FsCatalogStore::new(config.catalog_dir.clone()).load()?);

    let timeout = Duration::from_secs(config.remote_timeout_secs);

    let encoder = RemoteEncoder::new(
        RemoteEncoderConfig::new(config.encoder_url.clone()).with_timeout(timeout),
    )?;
    let scorer = RemoteTextScorer::new(
        RemoteTextScorerConfig::new(config.scorer_url.clone()).with_timeout(timeout),
    )?;

    tracing::info!(
        encoder_url = %config.encoder_url,
        scorer_url = %config.scorer_url,
        "Remote collaborators configured"
    );

    let adapter = EncoderAdapter::new(encoder.clone(), encoder);
    let engine = Arc::new(SearchEngine::new(catalog, adapter, scorer));

    let app = create_router_with_state(HandlerState::new(engine));

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Vitrina shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("VITRINA_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/healthz", port);

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("failed to build runtime");

    rt.block_on(async {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(1))
            .build()
            .expect("failed to build client");

        match client.get(&url).send().await {
            Ok(res) if res.status().is_success() => 0,
            _ => 1,
        }
    })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, initiating graceful shutdown");
        }
    }
}
