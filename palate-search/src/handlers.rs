use crate::error::{ServerError, ServerResult};
use crate::models::{CandidateItem, HealthResponse, SearchRequest};
use crate::state::AppState;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use palate_core::Embedding;
use tracing::{debug, warn};

/// Builds the search service router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/search", post(search))
        .route("/health", get(health))
        .with_state(state)
}

/// Handler for `POST /search`
/// Finds the k nearest dishes to the query vector and joins their metadata.
#[axum::debug_handler]
pub async fn search(
    State(state): State<AppState>,
    Json(payload): Json<SearchRequest>,
) -> ServerResult<Json<Vec<CandidateItem>>> {
    debug!(k = payload.k, dims = payload.query_vector.len(), "Received search request");

    if payload.query_vector.is_empty() {
        return Err(ServerError::BadRequest(
            "query_vector must not be empty".to_string(),
        ));
    }
    if payload.query_vector.iter().any(|v| !v.is_finite()) {
        return Err(ServerError::BadRequest(
            "query_vector must contain only finite numbers".to_string(),
        ));
    }

    let catalog = state
        .ready_catalog()
        .await
        .ok_or(ServerError::IndexNotReady)?;

    let query: Embedding = payload.query_vector.into();
    // Dimension mismatch surfaces from the core as a 400.
    let hits = catalog.index.query(&query, payload.k)?;
    debug!(hit_count = hits.len(), "Index query completed");

    // Join each hit onto the metadata store. Ids without a record are
    // dropped, which can shrink the list below k.
    let mut results: Vec<CandidateItem> = Vec::with_capacity(hits.len());
    for (id, distance) in hits {
        match catalog.metadata.get(id) {
            Some(record) => results.push(CandidateItem::from(record)),
            None => {
                warn!(id, distance, "Search hit has no metadata; dropping from results");
            }
        }
    }

    Ok(Json(results))
}

/// Handler for `GET /health`
/// Reports readiness and whether the catalog is real or the placeholder.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    match state.ready_catalog().await {
        Some(catalog) => Json(HealthResponse {
            status: "ready".to_string(),
            source: Some(catalog.source.as_str().to_string()),
            vectors: catalog.index.len(),
            dimensions: catalog.index.dimensions(),
        }),
        None => Json(HealthResponse {
            status: "loading".to_string(),
            source: None,
            vectors: 0,
            dimensions: 0,
        }),
    }
}
