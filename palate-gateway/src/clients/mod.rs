//! Capability seams for the five external collaborators.
//!
//! Each collaborator is a trait with two implementations: a reqwest-backed
//! one talking to the real service and a deterministic stub for running the
//! gateway without any backends. The pipeline only ever sees the trait.

pub mod http;
pub mod stub;

use crate::models::CandidateItem;
use async_trait::async_trait;
use thiserror::Error;

/// Errors surfaced by collaborator calls. `Unavailable` covers transport
/// problems (connect failure, timeout) and maps to a 503; `InvalidResponse`
/// covers a reachable service answering with something unusable and maps
/// to a 500.
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("upstream unavailable: {0}")]
    Unavailable(String),

    #[error("invalid upstream response: {0}")]
    InvalidResponse(String),
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Turns a dish name into a free-text feature profile.
#[async_trait]
pub trait ProfileGenerator: Send + Sync {
    async fn generate_profile(&self, food: &str) -> ClientResult<String>;
}

/// Turns a feature profile into a fixed-dimension embedding vector.
#[async_trait]
pub trait EmbeddingGenerator: Send + Sync {
    async fn generate_embedding(&self, text: &str) -> ClientResult<Vec<f32>>;
}

/// Nearest-neighbor lookup against the search service.
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, vector: &[f32], k: usize) -> ClientResult<Vec<CandidateItem>>;
}

/// Produces one human-readable reason per candidate, in candidate order.
#[async_trait]
pub trait JustificationGenerator: Send + Sync {
    async fn justify(
        &self,
        candidates: &[CandidateItem],
        profile: &str,
        original_query: &str,
    ) -> ClientResult<Vec<String>>;
}

/// Translates a reason into the requested target language.
#[async_trait]
pub trait Translator: Send + Sync {
    async fn translate(&self, text: &str, target_lang: &str) -> ClientResult<String>;
}
