//! Defines the data structures used for API request and response bodies.

use palate_core::{DishId, DishRecord};
use serde::{Deserialize, Serialize};

fn default_k() -> usize {
    5
}

// --- Request Bodies ---

/// Request body for searching the catalog.
#[derive(Deserialize)]
pub struct SearchRequest {
    pub query_vector: Vec<f32>,
    #[serde(default = "default_k")]
    pub k: usize,
}

// --- Response Bodies ---

/// A single search result: the dish record joined onto an index hit.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct CandidateItem {
    pub id: DishId,
    pub name: String,
    pub spicy_level: u8,
    pub main_ingredients: String,
    pub image_url: String,
}

impl From<&DishRecord> for CandidateItem {
    fn from(record: &DishRecord) -> Self {
        CandidateItem {
            id: record.id,
            name: record.name.clone(),
            spicy_level: record.spicy_level,
            main_ingredients: record.main_ingredients.clone(),
            image_url: record.image_url.clone(),
        }
    }
}

/// Response body for the health endpoint.
#[derive(Serialize, Deserialize, Debug)]
pub struct HealthResponse {
    pub status: String,
    pub source: Option<String>,
    pub vectors: usize,
    pub dimensions: usize,
}
