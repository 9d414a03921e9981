//! Cinesearch HTTP server entrypoint.

use std::net::SocketAddr;
use std::time::Duration;

use mimalloc::MiMalloc;
use tokio::net::TcpListener;
use tokio::signal;

use cinesearch::config::Config;
use cinesearch::gateway::{HandlerState, create_router_with_state};
use cinesearch::lastfm::LastfmClient;
use cinesearch::llm::OpenAiClient;
use cinesearch::tmdb::TmdbClient;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
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
        "cinesearch starting"
    );

    let http = reqwest::Client::builder()
        .timeout(config.http_timeout())
        .build()?;

    // validate() guarantees the TMDb key is present.
    let tmdb_key = config
        .tmdb_api_key
        .clone()
        .ok_or_else(|| anyhow::anyhow!("TMDb API key missing after validation"))?;

    if config.lastfm_api_key.is_none() {
        tracing::warn!("No Last.fm API key configured, soundtracks will be generated");
    }
    if config.openai_api_key.is_none() {
        tracing::warn!("No OpenAI API key configured, refinement and enrichment are degraded");
    }

    let movies = TmdbClient::new(http.clone(), tmdb_key);
    let soundtracks = LastfmClient::new(http.clone(), config.lastfm_api_key.clone());
    let assistant = OpenAiClient::new(
        http,
        config.openai_api_key.clone(),
        config.openai_model.clone(),
    );

    let state = HandlerState::new(movies, soundtracks, assistant);
    let app = create_router_with_state(state);

    let listener = TcpListener::bind(addr).await?;
    tracing::info!(addr = %addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("cinesearch shutdown complete");
    Ok(())
}

fn run_health_check() -> i32 {
    let port = std::env::var("CINESEARCH_PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .unwrap_or(8080);

    let url = format!("http://127.0.0.1:{}/status", port);

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
