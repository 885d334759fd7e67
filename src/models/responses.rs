use serde::{Deserialize, Serialize};
use crate::models::domain::{Property, ScoreResult};

/// Response for the match endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResponse {
    pub results: Vec<ScoreResult>,
    pub total_candidates: usize,
}

/// Listing entry without the feature vector
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertySummary {
    pub id: String,
    pub title: String,
    pub location: String,
    pub price: f64,
    pub bedrooms: u32,
    pub bathrooms: u32,
    pub area_sqm: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub amenities: Vec<String>,
}

impl From<Property> for PropertySummary {
    fn from(p: Property) -> Self {
        Self {
            id: p.id,
            title: p.title,
            location: p.location,
            price: p.price,
            bedrooms: p.bedrooms,
            bathrooms: p.bathrooms,
            area_sqm: p.area_sqm,
            amenities: p.amenities,
        }
    }
}

/// Paginated property listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertiesListResponse {
    pub limit: usize,
    pub offset: usize,
    pub total: usize,
    pub items: Vec<PropertySummary>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Acknowledgement for a delete
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
}
