use serde::{Deserialize, Serialize};

use super::location::{Coordinate, StoredLocation};

/// Restaurant document as held in the store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: String,
    #[serde(default)]
    pub place_id: String,
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub location: Option<StoredLocation>,
    /// Average rating on a 0-5 scale
    pub rating: f64,
    /// Price tier, nominally 1-5
    #[serde(default)]
    pub price_level: Option<i32>,
    #[serde(default)]
    pub image: Option<String>,
    /// Category tags, most significant first
    #[serde(default)]
    pub types: Vec<String>,
}

/// Category used when a restaurant carries no tags
pub const FALLBACK_CATEGORY: &str = "Other";

impl Restaurant {
    /// Leading category tag used for diversity bucketing
    pub fn main_category(&self) -> &str {
        self.types
            .first()
            .map(String::as_str)
            .unwrap_or(FALLBACK_CATEGORY)
    }
}

/// A restaurant selected for the current request, with its derived score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoredRestaurant {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    /// Normalized location the score was computed from
    pub coordinate: Coordinate,
    pub distance_km: f64,
    pub recommendation_score: f64,
}
