use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod clients;
mod config;
mod error;
mod handlers;
mod models;
mod pipeline;

use clients::http::{
    build_http_client, HttpEmbeddingGenerator, HttpJustificationGenerator, HttpProfileGenerator,
    HttpSearchClient, HttpTranslator,
};
use clients::stub::{
    StubEmbeddingGenerator, StubJustificationGenerator, StubProfileGenerator, StubSearchClient,
    StubTranslator,
};
use config::{GatewayConfig, GatewayMode};
use pipeline::Recommender;

// Matches the search service's placeholder catalog dimension, so stub mode
// works against a degraded search service out of the box.
const STUB_EMBEDDING_DIMENSION: usize = 100;

fn build_recommender(config: &GatewayConfig) -> Recommender {
    match config.mode {
        GatewayMode::Http => {
            let client = build_http_client(config.request_timeout)
                .expect("HTTP client construction only fails on invalid TLS config");
            Recommender::new(
                Arc::new(HttpProfileGenerator::new(client.clone(), &config.profile_url)),
                Arc::new(HttpEmbeddingGenerator::new(client.clone(), &config.embedding_url)),
                Arc::new(HttpSearchClient::new(client.clone(), &config.search_url)),
                Arc::new(HttpJustificationGenerator::new(client.clone(), &config.profile_url)),
                Arc::new(HttpTranslator::new(client, &config.translate_url)),
                config.k,
            )
        }
        GatewayMode::Stub => Recommender::new(
            Arc::new(StubProfileGenerator),
            Arc::new(StubEmbeddingGenerator::new(STUB_EMBEDDING_DIMENSION)),
            Arc::new(StubSearchClient),
            Arc::new(StubJustificationGenerator),
            Arc::new(StubTranslator),
            config.k,
        ),
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing subscriber for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env()
                .add_directive("palate_gateway=info".parse().expect("static directive")),
        )
        .init();

    info!("Initializing palate gateway...");

    let config = GatewayConfig::from_env();
    info!(mode = ?config.mode, k = config.k, "Gateway configuration loaded");

    let recommender = Arc::new(build_recommender(&config));

    let app = handlers::router(recommender)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    info!("Starting server on {}", config.listen_addr);
    let listener = tokio::net::TcpListener::bind(&config.listen_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", config.listen_addr, e));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}

async fn shutdown_signal() {
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
}
