//! semvizd — the semviz HTTP daemon.
//!
//! Environment:
//! - `SEMVIZ_CONFIG` — optional TOML engine configuration
//! - `SEMVIZ_SERVER_BIND` — bind address (default `0.0.0.0`)
//! - `SEMVIZ_SERVER_PORT` — port (default `8080`)
//!
//! Build and run: `cargo run --features server --bin semvizd`

use std::path::PathBuf;
use std::sync::Arc;

use semviz::config::EngineConfig;
use semviz::engine::Engine;
use semviz::server::{AppState, router};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let bind = std::env::var("SEMVIZ_SERVER_BIND").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("SEMVIZ_SERVER_PORT").unwrap_or_else(|_| "8080".to_string());
    let port: u16 = port.parse().unwrap_or_else(|_| {
        tracing::error!(%port, "SEMVIZ_SERVER_PORT must be a valid u16");
        std::process::exit(1);
    });
    let addr = format!("{bind}:{port}");

    let config = match std::env::var_os("SEMVIZ_CONFIG").map(PathBuf::from) {
        Some(path) => EngineConfig::load(&path).unwrap_or_else(|e| {
            tracing::error!(path = %path.display(), "failed to load config: {e}");
            std::process::exit(1);
        }),
        None => EngineConfig::default(),
    };

    let engine = Engine::new(config).unwrap_or_else(|e| {
        tracing::error!("failed to initialize engine: {e}");
        std::process::exit(1);
    });

    let app = router(Arc::new(AppState::new(engine)));

    tracing::info!("semvizd listening on {addr}");

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!("failed to bind {addr}: {e}");
            std::process::exit(1);
        }
    };

    // Serve with graceful shutdown on SIGTERM/SIGINT.
    let served = axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let ctrl_c = tokio::signal::ctrl_c();
            #[cfg(unix)]
            {
                match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                    Ok(mut sigterm) => {
                        tokio::select! {
                            _ = ctrl_c => {},
                            _ = sigterm.recv() => {},
                        }
                    }
                    Err(_) => {
                        ctrl_c.await.ok();
                    }
                }
            }
            #[cfg(not(unix))]
            {
                ctrl_c.await.ok();
            }
            tracing::info!("semvizd shutting down");
        })
        .await;

    if let Err(e) = served {
        tracing::error!("server error: {e}");
        std::process::exit(1);
    }
}
