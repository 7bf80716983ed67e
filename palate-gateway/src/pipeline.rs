//! The five-stage recommendation pipeline.
//!
//! Stages run strictly sequentially because each consumes the previous
//! stage's output. Profile, embedding, and search failures are fatal to the
//! request; justification and translation degrade gracefully so a working
//! search result is never thrown away over a missing nicety.

use crate::clients::{
    ClientError, EmbeddingGenerator, JustificationGenerator, ProfileGenerator, SearchClient,
    Translator,
};
use crate::error::{GatewayError, GatewayResult};
use crate::models::{RecommendationItem, RecommendationResponse};
use std::sync::Arc;
use tracing::{info, warn};

/// Per-request record of how far each degradable stage got. Logged with the
/// response so partial success is visible instead of buried in branches.
#[derive(Debug, Default)]
struct StageReport {
    candidates: usize,
    justified: bool,
    translated: usize,
}

/// Orchestrates the recommendation pipeline over the collaborator seams.
#[derive(Clone)]
pub struct Recommender {
    profile: Arc<dyn ProfileGenerator>,
    embedding: Arc<dyn EmbeddingGenerator>,
    search: Arc<dyn SearchClient>,
    justify: Arc<dyn JustificationGenerator>,
    translate: Arc<dyn Translator>,
    k: usize,
}

fn stage_error(stage: &'static str, e: ClientError) -> GatewayError {
    match e {
        ClientError::Unavailable(reason) => GatewayError::UpstreamUnavailable { stage, reason },
        ClientError::InvalidResponse(reason) => {
            GatewayError::Internal(format!("{} stage: {}", stage, reason))
        }
    }
}

impl Recommender {
    pub fn new(
        profile: Arc<dyn ProfileGenerator>,
        embedding: Arc<dyn EmbeddingGenerator>,
        search: Arc<dyn SearchClient>,
        justify: Arc<dyn JustificationGenerator>,
        translate: Arc<dyn Translator>,
        k: usize,
    ) -> Self {
        Recommender {
            profile,
            embedding,
            search,
            justify,
            translate,
            k,
        }
    }

    /// Runs the full pipeline for one request. Candidate order established
    /// by the search stage is preserved through justification and
    /// translation.
    pub async fn recommend(
        &self,
        foreign_food: &str,
        target_lang: Option<&str>,
    ) -> GatewayResult<RecommendationResponse> {
        let foreign_food = foreign_food.trim();
        if foreign_food.is_empty() {
            return Err(GatewayError::Validation(
                "foreign_food must be a non-empty string".to_string(),
            ));
        }

        let mut report = StageReport::default();

        // Stage 1: profile. No profile means nothing to embed, so fatal.
        let profile = self
            .profile
            .generate_profile(foreign_food)
            .await
            .map_err(|e| stage_error("profile", e))?;

        // Stage 2: embedding. Fatal; the search stage is never reached on
        // failure.
        let vector = self
            .embedding
            .generate_embedding(&profile)
            .await
            .map_err(|e| stage_error("embedding", e))?;

        // Stage 3: search. Fatal on transport failure; an empty candidate
        // list is a valid answer.
        let candidates = self
            .search
            .search(&vector, self.k)
            .await
            .map_err(|e| stage_error("search", e))?;
        report.candidates = candidates.len();

        // Stage 4: justification. Degrades to empty reasons; a reason-count
        // mismatch is treated the same so ordering can never drift.
        let reasons = match self
            .justify
            .justify(&candidates, &profile, foreign_food)
            .await
        {
            Ok(reasons) if reasons.len() == candidates.len() => {
                report.justified = true;
                reasons
            }
            Ok(reasons) => {
                warn!(
                    expected = candidates.len(),
                    actual = reasons.len(),
                    "Justification count mismatch; returning candidates without reasons"
                );
                vec![String::new(); candidates.len()]
            }
            Err(e) => {
                warn!(error = %e, "Justification failed; returning candidates without reasons");
                vec![String::new(); candidates.len()]
            }
        };

        // Stage 5: translation, opt-in per request. A failed item keeps its
        // untranslated reason.
        let reasons = match target_lang {
            Some(lang) if report.justified => {
                let mut translated = Vec::with_capacity(reasons.len());
                for reason in reasons {
                    match self.translate.translate(&reason, lang).await {
                        Ok(text) => {
                            report.translated += 1;
                            translated.push(text);
                        }
                        Err(e) => {
                            warn!(error = %e, "Translation failed for one item; keeping original text");
                            translated.push(reason);
                        }
                    }
                }
                translated
            }
            _ => reasons,
        };

        let items: Vec<RecommendationItem> = candidates
            .into_iter()
            .zip(reasons)
            .map(|(candidate, reason)| RecommendationItem::from_candidate(candidate, reason))
            .collect();

        info!(
            input_food = foreign_food,
            candidates = report.candidates,
            justified = report.justified,
            translated = report.translated,
            "Recommendation pipeline completed"
        );

        Ok(RecommendationResponse {
            input_food: foreign_food.to_string(),
            items,
        })
    }
}
