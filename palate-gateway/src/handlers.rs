use crate::error::GatewayResult;
use crate::models::RecommendationResponse;
use crate::pipeline::Recommender;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;

/// Builds the gateway router around a configured recommender.
pub fn router(recommender: Arc<Recommender>) -> Router {
    Router::new()
        .route("/recommend", post(recommend))
        .route("/health", get(health))
        .with_state(recommender)
}

/// Query parameters for `POST /recommend`.
#[derive(Deserialize, Debug)]
pub struct RecommendParams {
    #[serde(default)]
    foreign_food: String,
    target_lang: Option<String>,
}

/// Handler for `POST /recommend?foreign_food=<name>[&target_lang=<code>]`
#[axum::debug_handler]
pub async fn recommend(
    State(recommender): State<Arc<Recommender>>,
    Query(params): Query<RecommendParams>,
) -> GatewayResult<Json<RecommendationResponse>> {
    debug!(foreign_food = %params.foreign_food, target_lang = ?params.target_lang, "Received recommend request");

    let response = recommender
        .recommend(&params.foreign_food, params.target_lang.as_deref())
        .await?;

    Ok(Json(response))
}

/// Handler for `GET /health`
#[axum::debug_handler]
pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
