//! Defines the data structures used for API request and response bodies,
//! including the wire types shared with the search service.

use serde::{Deserialize, Serialize};

/// A search candidate as returned by the search service (no reason yet).
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CandidateItem {
    pub id: u64,
    pub name: String,
    pub spicy_level: u8,
    pub main_ingredients: String,
    pub image_url: String,
}

/// A recommended dish with its generated justification attached.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecommendationItem {
    pub name: String,
    pub spicy_level: u8,
    pub main_ingredients: String,
    pub reason: String,
    pub image_url: String,
}

impl RecommendationItem {
    pub fn from_candidate(candidate: CandidateItem, reason: String) -> Self {
        RecommendationItem {
            name: candidate.name,
            spicy_level: candidate.spicy_level,
            main_ingredients: candidate.main_ingredients,
            reason,
            image_url: candidate.image_url,
        }
    }
}

/// Response body for `POST /recommend`. Items are in search order,
/// nearest first.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct RecommendationResponse {
    pub input_food: String,
    pub items: Vec<RecommendationItem>,
}
