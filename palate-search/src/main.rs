use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod error;
mod handlers;
mod loader;
mod models;
mod state;

use config::SearchConfig;
use state::AppState;

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("palate_search=info".parse().expect("static directive"))
                .add_directive("palate_core=info".parse().expect("static directive")),
        )
        .init();

    info!("Initializing palate search service...");

    let config = SearchConfig::from_env();
    info!(
        snapshot = ?config.snapshot_path,
        metadata = ?config.metadata_path,
        "Using catalog locations"
    );

    let app_state = AppState::new();

    // Load the catalog before serving. A snapshot failure degrades to the
    // placeholder inside the loader; only synthesis failure is fatal.
    match loader::load_catalog(&config.snapshot_path, &config.metadata_path) {
        Ok(catalog) => {
            info!(source = catalog.source.as_str(), "Catalog reached Ready");
            app_state.install(catalog).await;
        }
        Err(e) => {
            error!(error = %e, "Catalog load failed fatally; shutting down");
            std::process::exit(1);
        }
    }

    let app = handlers::router(app_state.clone())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Starting server on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", config.listen_addr, e));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(app_state))
        .await
        .expect("server error");
}

async fn shutdown_signal(app_state: AppState) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        },
        _ = terminate => {
            info!("Received terminate signal, initiating graceful shutdown...");
        },
    }

    app_state.teardown().await;
    info!("Catalog released. Shutting down.");
}
