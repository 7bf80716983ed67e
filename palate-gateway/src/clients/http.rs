//! reqwest-backed collaborator implementations.
//!
//! All clients share one pooled `reqwest::Client` carrying the request and
//! connect timeouts, so no external call can hang past the configured bound.

use super::{
    ClientError, ClientResult, EmbeddingGenerator, JustificationGenerator, ProfileGenerator,
    SearchClient, Translator,
};
use crate::models::CandidateItem;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use tracing::debug;

/// Builds the shared HTTP client used by every collaborator.
pub fn build_http_client(request_timeout: Duration) -> ClientResult<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(request_timeout)
        .connect_timeout(Duration::from_secs(5))
        .build()
        .map_err(|e| ClientError::InvalidResponse(format!("failed to build HTTP client: {}", e)))
}

fn map_transport_error(e: reqwest::Error) -> ClientError {
    // Anything that never produced a usable response counts as unavailable.
    if e.is_connect() || e.is_timeout() || e.is_request() {
        ClientError::Unavailable(e.to_string())
    } else {
        ClientError::InvalidResponse(e.to_string())
    }
}

fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else if status.is_server_error() {
        Err(ClientError::Unavailable(format!("upstream answered {}", status)))
    } else {
        Err(ClientError::InvalidResponse(format!(
            "upstream answered {}",
            status
        )))
    }
}

// --- Profile generator ---

pub struct HttpProfileGenerator {
    client: reqwest::Client,
    url: String,
}

impl HttpProfileGenerator {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        HttpProfileGenerator {
            client,
            url: format!("{}/profile", base_url.trim_end_matches('/')),
        }
    }
}

#[derive(Deserialize)]
struct ProfileResponse {
    profile: String,
}

#[async_trait]
impl ProfileGenerator for HttpProfileGenerator {
    async fn generate_profile(&self, food: &str) -> ClientResult<String> {
        debug!(url = %self.url, food, "Requesting food profile");
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "food_name": food }))
            .send()
            .await
            .map_err(map_transport_error)?;
        let body: ProfileResponse = check_status(response)?
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(body.profile)
    }
}

// --- Embedding generator ---

pub struct HttpEmbeddingGenerator {
    client: reqwest::Client,
    url: String,
}

impl HttpEmbeddingGenerator {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        HttpEmbeddingGenerator {
            client,
            url: format!("{}/embed", base_url.trim_end_matches('/')),
        }
    }
}

#[derive(Deserialize)]
struct EmbeddingResponse {
    embedding: Vec<f32>,
}

#[async_trait]
impl EmbeddingGenerator for HttpEmbeddingGenerator {
    async fn generate_embedding(&self, text: &str) -> ClientResult<Vec<f32>> {
        debug!(url = %self.url, "Requesting embedding");
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(map_transport_error)?;
        let body: EmbeddingResponse = check_status(response)?
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        if body.embedding.is_empty() {
            return Err(ClientError::InvalidResponse(
                "embedding service returned an empty vector".to_string(),
            ));
        }
        Ok(body.embedding)
    }
}

// --- Search client ---

pub struct HttpSearchClient {
    client: reqwest::Client,
    url: String,
}

impl HttpSearchClient {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        HttpSearchClient {
            client,
            url: format!("{}/search", base_url.trim_end_matches('/')),
        }
    }
}

#[derive(Serialize)]
struct SearchRequestBody<'a> {
    query_vector: &'a [f32],
    k: usize,
}

#[async_trait]
impl SearchClient for HttpSearchClient {
    async fn search(&self, vector: &[f32], k: usize) -> ClientResult<Vec<CandidateItem>> {
        debug!(url = %self.url, k, dims = vector.len(), "Requesting vector search");
        let response = self
            .client
            .post(&self.url)
            .json(&SearchRequestBody { query_vector: vector, k })
            .send()
            .await
            .map_err(map_transport_error)?;
        check_status(response)?
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }
}

// --- Justification generator ---

pub struct HttpJustificationGenerator {
    client: reqwest::Client,
    url: String,
}

impl HttpJustificationGenerator {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        HttpJustificationGenerator {
            client,
            url: format!("{}/justify", base_url.trim_end_matches('/')),
        }
    }
}

#[derive(Deserialize)]
struct JustificationResponse {
    reasons: Vec<String>,
}

#[async_trait]
impl JustificationGenerator for HttpJustificationGenerator {
    async fn justify(
        &self,
        candidates: &[CandidateItem],
        profile: &str,
        original_query: &str,
    ) -> ClientResult<Vec<String>> {
        debug!(url = %self.url, count = candidates.len(), "Requesting justifications");
        let response = self
            .client
            .post(&self.url)
            .json(&json!({
                "candidates": candidates,
                "profile": profile,
                "original_query": original_query,
            }))
            .send()
            .await
            .map_err(map_transport_error)?;
        let body: JustificationResponse = check_status(response)?
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(body.reasons)
    }
}

// --- Translator ---

pub struct HttpTranslator {
    client: reqwest::Client,
    url: String,
}

impl HttpTranslator {
    pub fn new(client: reqwest::Client, base_url: &str) -> Self {
        HttpTranslator {
            client,
            url: format!("{}/translate", base_url.trim_end_matches('/')),
        }
    }
}

#[derive(Deserialize)]
struct TranslateResponse {
    translated_text: String,
}

#[async_trait]
impl Translator for HttpTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> ClientResult<String> {
        debug!(url = %self.url, target_lang, "Requesting translation");
        let response = self
            .client
            .post(&self.url)
            .json(&json!({ "text": text, "target_lang": target_lang }))
            .send()
            .await
            .map_err(map_transport_error)?;
        let body: TranslateResponse = check_status(response)?
            .json()
            .await
            .map_err(|e| ClientError::InvalidResponse(e.to_string()))?;
        Ok(body.translated_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_urls_are_joined_without_double_slash() {
        let client = build_http_client(Duration::from_secs(1)).unwrap();
        let search = HttpSearchClient::new(client.clone(), "http://search:8001/");
        assert_eq!(search.url, "http://search:8001/search");
        let translate = HttpTranslator::new(client, "http://translate:8002");
        assert_eq!(translate.url, "http://translate:8002/translate");
    }

    #[tokio::test]
    async fn test_unreachable_upstream_maps_to_unavailable() {
        let client = build_http_client(Duration::from_millis(200)).unwrap();
        // Nothing listens on this port.
        let profile = HttpProfileGenerator::new(client, "http://127.0.0.1:19");
        let err = profile.generate_profile("pizza").await.unwrap_err();
        assert!(matches!(err, ClientError::Unavailable(_)));
    }
}
