//! Deterministic in-process collaborators.
//!
//! Selected with `PALATE_GATEWAY_MODE=stub`, these let the gateway serve
//! complete (if canned) responses with no generator, search, or translation
//! backends running. Every output is a pure function of the input, so tests
//! and demos are reproducible.

use super::{
    ClientResult, EmbeddingGenerator, JustificationGenerator, ProfileGenerator, SearchClient,
    Translator,
};
use crate::models::CandidateItem;
use async_trait::async_trait;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Produces a fixed flavor profile mentioning the queried dish.
pub struct StubProfileGenerator;

#[async_trait]
impl ProfileGenerator for StubProfileGenerator {
    async fn generate_profile(&self, food: &str) -> ClientResult<String> {
        Ok(format!(
            "Taste: soft, savory and cheese-forward like {}. Texture: chewy and springy. \
             Preparation: simmered or stir-fried.",
            food
        ))
    }
}

/// Derives a fixed-dimension vector from a hash of the input text.
/// Identical text always yields the identical vector.
pub struct StubEmbeddingGenerator {
    dimension: usize,
}

impl StubEmbeddingGenerator {
    pub fn new(dimension: usize) -> Self {
        StubEmbeddingGenerator { dimension }
    }
}

#[async_trait]
impl EmbeddingGenerator for StubEmbeddingGenerator {
    async fn generate_embedding(&self, text: &str) -> ClientResult<Vec<f32>> {
        let mut hasher = DefaultHasher::new();
        text.hash(&mut hasher);
        let h = hasher.finish();
        let vector = (0..self.dimension)
            .map(|i| (((h >> (i % 32)) as f32) * 0.0001).sin())
            .collect();
        Ok(vector)
    }
}

/// Returns two canned candidates regardless of the query vector.
pub struct StubSearchClient;

#[async_trait]
impl SearchClient for StubSearchClient {
    async fn search(&self, _vector: &[f32], k: usize) -> ClientResult<Vec<CandidateItem>> {
        let canned = vec![
            CandidateItem {
                id: 1,
                name: "cream tteokbokki".to_string(),
                spicy_level: 1,
                main_ingredients: "rice cake, cream sauce".to_string(),
                image_url: "url_to_cream_tteok".to_string(),
            },
            CandidateItem {
                id: 2,
                name: "kimchi jeon".to_string(),
                spicy_level: 3,
                main_ingredients: "kimchi, flour".to_string(),
                image_url: "url_to_kimchi_jeon".to_string(),
            },
        ];
        Ok(canned.into_iter().take(k).collect())
    }
}

/// Fills a templated reason for every candidate, in order.
pub struct StubJustificationGenerator;

#[async_trait]
impl JustificationGenerator for StubJustificationGenerator {
    async fn justify(
        &self,
        candidates: &[CandidateItem],
        _profile: &str,
        original_query: &str,
    ) -> ClientResult<Vec<String>> {
        Ok(candidates
            .iter()
            .map(|candidate| {
                format!(
                    "{} shares the mild, savory flavor of {} and has a similar chewy texture.",
                    candidate.name, original_query
                )
            })
            .collect())
    }
}

/// Tags the text with the target language instead of translating it.
pub struct StubTranslator;

#[async_trait]
impl Translator for StubTranslator {
    async fn translate(&self, text: &str, target_lang: &str) -> ClientResult<String> {
        Ok(format!("[{}] {}", target_lang, text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_stub_embedding_is_deterministic_and_sized() {
        let generator = StubEmbeddingGenerator::new(100);
        let a = generator.generate_embedding("pizza profile").await.unwrap();
        let b = generator.generate_embedding("pizza profile").await.unwrap();
        assert_eq!(a.len(), 100);
        assert_eq!(a, b);

        let other = generator.generate_embedding("ramen profile").await.unwrap();
        assert_ne!(a, other);
    }

    #[tokio::test]
    async fn test_stub_search_respects_k() {
        let client = StubSearchClient;
        assert_eq!(client.search(&[0.0], 1).await.unwrap().len(), 1);
        assert_eq!(client.search(&[0.0], 5).await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_stub_justifier_returns_one_reason_per_candidate() {
        let client = StubSearchClient;
        let candidates = client.search(&[0.0], 5).await.unwrap();
        let reasons = StubJustificationGenerator
            .justify(&candidates, "profile", "pizza")
            .await
            .unwrap();
        assert_eq!(reasons.len(), candidates.len());
        assert!(reasons[0].contains("cream tteokbokki"));
        assert!(reasons[0].contains("pizza"));
    }
}
