use serde::{Deserialize, Serialize};

/// Client preference profile submitted with a match request
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientProfile {
    pub name: String,
    /// Advisory only, not enforced by the engine
    pub location_preference: String,
    /// 0 means no lower bound
    pub budget_min: f64,
    /// 0 means no upper bound
    pub budget_max: f64,
    pub desired_bedrooms: u32,
    pub desired_bathrooms: u32,
    pub priorities: PreferenceWeights,
    pub hard_filters: HardFilters,
}

/// Admission requirements checked before scoring
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HardFilters {
    pub must_have_amenities: Vec<String>,
}

/// How much the client cares about each dimension.
///
/// Values are not clamped. Zero means indifferent; values above 1 amplify the
/// dimension without bound.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceWeights {
    pub quietness: f64,
    pub sun_exposure: f64,
    pub wind_protection: f64,
    pub low_tourism: f64,
    pub family_friendliness: f64,
    pub expat_community: f64,
    pub investment_focus: f64,
    pub walkability: f64,
    pub green_areas: f64,
    pub sea_proximity: f64,
}

/// A listing as stored and returned by the API
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Property {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub location: String,
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

/// Normalized listing attributes.
///
/// Everything except `distance_to_sea_km` is expected in [0, 1]; out-of-range
/// values are clamped when scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Features {
    pub quietness: f64,
    pub sun_exposure: f64,
    pub wind_protection: f64,
    pub tourism_intensity: f64,
    pub family_friendly: f64,
    pub expat_friendly: f64,
    pub investment_potential: f64,
    pub distance_to_sea_km: f64,
    pub walkability: f64,
    pub green_areas: f64,
}

/// A scored listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreResult {
    pub property: Property,
    pub score: f64,
    pub reasons: Vec<ScoreReason>,
}

/// One explanation entry attached to a score
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreReason {
    #[serde(rename = "type")]
    pub kind: String,
    pub message: String,
    /// Relative to the top reason once ranked (top reason is 1.0)
    pub impact: f64,
}

/// Operator-level calibration applied to every request.
///
/// Loaded once at startup and never mutated afterwards. Fields missing from a
/// weights file keep their default value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringWeights {
    pub quietness: f64,
    pub sun_exposure: f64,
    pub wind_protection: f64,
    pub low_tourism: f64,
    pub family_friendliness: f64,
    pub expat_community: f64,
    pub investment_focus: f64,
    pub walkability: f64,
    pub green_areas: f64,
    pub sea_proximity: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        Self {
            quietness: 1.0,
            sun_exposure: 0.9,
            wind_protection: 0.6,
            low_tourism: 1.0,
            family_friendliness: 0.9,
            expat_community: 0.7,
            investment_focus: 0.85,
            walkability: 0.7,
            green_areas: 0.6,
            sea_proximity: 0.8,
        }
    }
}

/// Sort order for property listings
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    IdAsc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Unknown keys fall back to id order
    pub fn parse(raw: &str) -> Self {
        match raw.trim() {
            "price_asc" => SortKey::PriceAsc,
            "price_desc" => SortKey::PriceDesc,
            _ => SortKey::IdAsc,
        }
    }
}

/// Filter, sort and pagination parameters for a property listing query
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListParams {
    pub location: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub min_bedrooms: Option<u32>,
    pub sort: SortKey,
    pub limit: usize,
    pub offset: usize,
}

impl ListParams {
    /// Location needle, lowercased, if non-blank
    pub fn location_needle(&self) -> Option<String> {
        self.location
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_lowercase)
    }

    /// Whether a property passes the filter part of the query
    pub fn matches(&self, property: &Property) -> bool {
        if let Some(needle) = self.location_needle() {
            if !property.location.to_lowercase().contains(&needle) {
                return false;
            }
        }
        if let Some(min) = self.min_price.filter(|v| *v > 0.0) {
            if property.price < min {
                return false;
            }
        }
        if let Some(max) = self.max_price.filter(|v| *v > 0.0) {
            if property.price > max {
                return false;
            }
        }
        if let Some(min) = self.min_bedrooms.filter(|v| *v > 0) {
            if property.bedrooms < min {
                return false;
            }
        }
        true
    }
}
