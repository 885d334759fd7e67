//! The ten matching dimensions shared by scoring, tests and docs.

use crate::core::distance::{clamp01, sea_proximity};
use crate::models::{Features, PreferenceWeights, ScoringWeights};

/// Direction in which a normalized feature is desirable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    HigherIsBetter,
    /// The stored attribute measures the opposite of what the client wants
    LowerIsBetter,
}

/// Descriptor tying one client preference to one listing attribute
#[derive(Debug, Clone, Copy)]
pub struct Dimension {
    /// Stable machine key, used as the reason type
    pub key: &'static str,
    /// Human label used in reason messages
    pub label: &'static str,
    pub polarity: Polarity,
    pub weight: fn(&ScoringWeights) -> f64,
    pub preference: fn(&PreferenceWeights) -> f64,
    /// Normalized [0, 1] listing value before polarity is applied
    pub value: fn(&Features) -> f64,
}

impl Dimension {
    /// Listing value with polarity applied, in [0, 1]
    #[inline]
    pub fn effective_value(&self, features: &Features) -> f64 {
        let v = (self.value)(features);
        match self.polarity {
            Polarity::HigherIsBetter => v,
            Polarity::LowerIsBetter => 1.0 - v,
        }
    }
}

pub const DIMENSIONS: [Dimension; 10] = [
    Dimension {
        key: "quietness",
        label: "quietness",
        polarity: Polarity::HigherIsBetter,
        weight: |w| w.quietness,
        preference: |p| p.quietness,
        value: |f| clamp01(f.quietness),
    },
    Dimension {
        key: "sun_exposure",
        label: "sun exposure",
        polarity: Polarity::HigherIsBetter,
        weight: |w| w.sun_exposure,
        preference: |p| p.sun_exposure,
        value: |f| clamp01(f.sun_exposure),
    },
    Dimension {
        key: "wind_protection",
        label: "wind protection",
        polarity: Polarity::HigherIsBetter,
        weight: |w| w.wind_protection,
        preference: |p| p.wind_protection,
        value: |f| clamp01(f.wind_protection),
    },
    Dimension {
        key: "low_tourism",
        label: "low tourism",
        polarity: Polarity::LowerIsBetter,
        weight: |w| w.low_tourism,
        preference: |p| p.low_tourism,
        value: |f| clamp01(f.tourism_intensity),
    },
    Dimension {
        key: "family_friendliness",
        label: "family friendly",
        polarity: Polarity::HigherIsBetter,
        weight: |w| w.family_friendliness,
        preference: |p| p.family_friendliness,
        value: |f| clamp01(f.family_friendly),
    },
    Dimension {
        key: "expat_community",
        label: "expat friendly",
        polarity: Polarity::HigherIsBetter,
        weight: |w| w.expat_community,
        preference: |p| p.expat_community,
        value: |f| clamp01(f.expat_friendly),
    },
    Dimension {
        key: "investment_focus",
        label: "investment potential",
        polarity: Polarity::HigherIsBetter,
        weight: |w| w.investment_focus,
        preference: |p| p.investment_focus,
        value: |f| clamp01(f.investment_potential),
    },
    Dimension {
        key: "walkability",
        label: "walkability",
        polarity: Polarity::HigherIsBetter,
        weight: |w| w.walkability,
        preference: |p| p.walkability,
        value: |f| clamp01(f.walkability),
    },
    Dimension {
        key: "green_areas",
        label: "green areas",
        polarity: Polarity::HigherIsBetter,
        weight: |w| w.green_areas,
        preference: |p| p.green_areas,
        value: |f| clamp01(f.green_areas),
    },
    Dimension {
        key: "sea_proximity",
        label: "sea proximity",
        polarity: Polarity::HigherIsBetter,
        weight: |w| w.sea_proximity,
        preference: |p| p.sea_proximity,
        value: |f| sea_proximity(f.distance_to_sea_km),
    },
];

/// Look up a dimension by key
pub fn dimension(key: &str) -> Option<&'static Dimension> {
    DIMENSIONS.iter().find(|d| d.key == key)
}
