//! Paint Mixer Back binary entrypoint wiring the REST, SSE and palette
//! storage layers around the color-science core.

use std::{env, net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use paint_mixer_back::{
    config::AppConfig,
    dao::palette_store::{PaletteStore, file::FilePaletteStore},
    routes,
    services::storage_supervisor,
    state::{AppState, SharedState},
};

#[cfg(feature = "couch-store")]
use paint_mixer_back::dao::palette_store::couchdb::{CouchConfig, CouchPaletteStore};

/// File the palette persists to when no other backend is selected.
const DEFAULT_STORE_PATH: &str = "data/palette.json";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let app_state = AppState::new(config);

    tokio::spawn(run_store_supervisor(app_state.clone()));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(app_state);

    let port = env::var("PORT")
        .or_else(|_| env::var("SERVER_PORT"))
        .ok()
        .and_then(|value| value.parse::<u16>().ok())
        .unwrap_or(8080);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    let service = app.into_make_service();
    axum::serve(listener, service)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Pick the configured storage backend and keep it supervised for the
/// lifetime of the process.
async fn run_store_supervisor(state: SharedState) {
    let backend = env::var("PALETTE_STORE").unwrap_or_else(|_| "file".into());

    match backend.as_str() {
        #[cfg(feature = "couch-store")]
        "couchdb" => {
            storage_supervisor::run(state, || async {
                let config = CouchConfig::from_env()?;
                let store = CouchPaletteStore::connect(config).await?;
                Ok(Arc::new(store) as Arc<dyn PaletteStore>)
            })
            .await;
        }
        other => {
            if other != "file" {
                warn!(backend = other, "unknown palette store backend; using the file store");
            }
            let path =
                env::var("PALETTE_STORE_PATH").unwrap_or_else(|_| DEFAULT_STORE_PATH.into());
            storage_supervisor::run(state, move || {
                let path = path.clone();
                async move {
                    let store = FilePaletteStore::connect(path).await?;
                    Ok(Arc::new(store) as Arc<dyn PaletteStore>)
                }
            })
            .await;
        }
    }
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
