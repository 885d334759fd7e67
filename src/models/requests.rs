use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::domain::{ClientProfile, Features, ListParams, Property, SortKey};

/// Request to score listings against a client profile
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchRequest {
    #[serde(default)]
    pub profile: ClientProfile,
    /// Values <= 0 fall back to the configured default
    #[serde(default)]
    pub limit: i64,
}

/// Query string accepted by the match endpoint.
///
/// Kept as raw text so an unparsable `limit` is ignored rather than rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchQuery {
    pub limit: Option<String>,
}

impl MatchQuery {
    pub fn limit(&self) -> Option<i64> {
        self.limit.as_deref().and_then(|v| v.trim().parse().ok())
    }
}

/// Query string for listing properties
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListPropertiesQuery {
    pub location: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub min_bedrooms: Option<String>,
    pub sort: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

fn parse_lenient<T: std::str::FromStr>(raw: Option<&str>) -> Option<T> {
    raw.and_then(|v| v.trim().parse().ok())
}

impl ListPropertiesQuery {
    /// Convert into store parameters.
    ///
    /// Unparsable numbers are ignored, `limit <= 0` becomes `default_limit`,
    /// limits above `max_limit` are capped and a negative offset becomes 0.
    pub fn to_params(&self, default_limit: usize, max_limit: usize) -> ListParams {
        let limit = match parse_lenient::<i64>(self.limit.as_deref()) {
            Some(v) if v > 0 => usize::try_from(v).unwrap_or(max_limit),
            _ => default_limit,
        }
        .min(max_limit);

        let offset = parse_lenient::<i64>(self.offset.as_deref())
            .and_then(|v| usize::try_from(v).ok())
            .unwrap_or(0);

        ListParams {
            location: self.location.clone(),
            min_price: parse_lenient(self.min_price.as_deref()),
            max_price: parse_lenient(self.max_price.as_deref()),
            min_bedrooms: parse_lenient(self.min_bedrooms.as_deref()),
            sort: self.sort.as_deref().map(SortKey::parse).unwrap_or_default(),
            limit,
            offset,
        }
    }
}

/// Request to create a new listing
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreatePropertyRequest {
    #[validate(length(min = 1, message = "title is required"))]
    #[serde(default)]
    pub title: String,
    #[validate(length(min = 1, message = "location is required"))]
    #[serde(default)]
    pub location: String,
    #[validate(range(exclusive_min = 0.0, message = "price must be > 0"))]
    #[serde(default)]
    pub price: f64,
    #[serde(default)]
    pub bedrooms: u32,
    #[serde(default)]
    pub bathrooms: u32,
    #[serde(default)]
    pub area_sqm: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_urls: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
    #[serde(default)]
    pub features: Features,
}

impl From<CreatePropertyRequest> for Property {
    fn from(req: CreatePropertyRequest) -> Self {
        Property {
            id: String::new(),
            title: req.title,
            location: req.location,
            price: req.price,
            bedrooms: req.bedrooms,
            bathrooms: req.bathrooms,
            area_sqm: req.area_sqm,
            description: req.description,
            image_urls: req.image_urls,
            amenities: req.amenities,
            features: req.features,
        }
    }
}
