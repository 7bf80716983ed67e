//! HTTP-level tests for the gateway router.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use std::sync::Arc;
use tower::ServiceExt; // For oneshot()

use async_trait::async_trait;
use palate_gateway::clients::stub::{
    StubEmbeddingGenerator, StubJustificationGenerator, StubProfileGenerator, StubSearchClient,
    StubTranslator,
};
use palate_gateway::clients::{ClientError, ClientResult, EmbeddingGenerator, JustificationGenerator};
use palate_gateway::handlers;
use palate_gateway::models::{CandidateItem, RecommendationResponse};
use palate_gateway::pipeline::Recommender;

struct FailingEmbedding;

#[async_trait]
impl EmbeddingGenerator for FailingEmbedding {
    async fn generate_embedding(&self, _text: &str) -> ClientResult<Vec<f32>> {
        Err(ClientError::Unavailable("connection refused".to_string()))
    }
}

struct FailingJustifier;

#[async_trait]
impl JustificationGenerator for FailingJustifier {
    async fn justify(
        &self,
        _candidates: &[CandidateItem],
        _profile: &str,
        _query: &str,
    ) -> ClientResult<Vec<String>> {
        Err(ClientError::Unavailable("timed out".to_string()))
    }
}

fn stub_recommender() -> Arc<Recommender> {
    Arc::new(Recommender::new(
        Arc::new(StubProfileGenerator),
        Arc::new(StubEmbeddingGenerator::new(100)),
        Arc::new(StubSearchClient),
        Arc::new(StubJustificationGenerator),
        Arc::new(StubTranslator),
        5,
    ))
}

fn recommend_request(query: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(format!("/recommend?{}", query))
        .body(Body::empty())
        .unwrap()
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_recommend_happy_path() {
    let app = handlers::router(stub_recommender());

    let response = app
        .oneshot(recommend_request("foreign_food=pizza"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: RecommendationResponse = json_body(response.into_body()).await;
    assert_eq!(body.input_food, "pizza");
    assert_eq!(body.items.len(), 2);
    assert_eq!(body.items[0].name, "cream tteokbokki");
    assert!(body.items.iter().all(|item| !item.reason.is_empty()));
}

#[tokio::test]
async fn test_recommend_with_target_lang_translates_reasons() {
    let app = handlers::router(stub_recommender());

    let response = app
        .oneshot(recommend_request("foreign_food=pizza&target_lang=en"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: RecommendationResponse = json_body(response.into_body()).await;
    assert!(body.items.iter().all(|item| item.reason.starts_with("[en] ")));
}

#[tokio::test]
async fn test_recommend_missing_input_is_bad_request() {
    let app = handlers::router(stub_recommender());

    let response = app.oneshot(recommend_request("")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let app = handlers::router(stub_recommender());
    let response = app
        .oneshot(recommend_request("foreign_food=%20%20"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_recommend_embedding_outage_is_service_unavailable() {
    let recommender = Arc::new(Recommender::new(
        Arc::new(StubProfileGenerator),
        Arc::new(FailingEmbedding),
        Arc::new(StubSearchClient),
        Arc::new(StubJustificationGenerator),
        Arc::new(StubTranslator),
        5,
    ));
    let app = handlers::router(recommender);

    let response = app
        .oneshot(recommend_request("foreign_food=pizza"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_recommend_justification_outage_still_succeeds() {
    let recommender = Arc::new(Recommender::new(
        Arc::new(StubProfileGenerator),
        Arc::new(StubEmbeddingGenerator::new(100)),
        Arc::new(StubSearchClient),
        Arc::new(FailingJustifier),
        Arc::new(StubTranslator),
        5,
    ));
    let app = handlers::router(recommender);

    let response = app
        .oneshot(recommend_request("foreign_food=pizza"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: RecommendationResponse = json_body(response.into_body()).await;
    assert_eq!(body.items.len(), 2);
    // Order preserved from search, reasons left empty.
    assert_eq!(body.items[0].name, "cream tteokbokki");
    assert_eq!(body.items[1].name, "kimchi jeon");
    assert!(body.items.iter().all(|item| item.reason.is_empty()));
}
