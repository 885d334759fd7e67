use crate::core::{filters::admits, ranking::rank, scoring::calculate_match_score};
use crate::models::{ClientProfile, Property, ScoreResult, ScoringWeights};

/// Result of the matching process
#[derive(Debug)]
pub struct MatchResult {
    pub matches: Vec<ScoreResult>,
    pub total_candidates: usize,
    pub admitted: usize,
}

/// Main matching orchestrator
///
/// Holds the global scoring weights for its lifetime; they are never mutated,
/// so one `Matcher` can serve concurrent requests by value or reference.
///
/// # Pipeline Stages
/// 1. Hard filter (budget bounds, required amenities)
/// 2. Weighted scoring with reasons
/// 3. Ranking and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single listing, ignoring hard filters
    pub fn score(&self, profile: &ClientProfile, property: &Property) -> ScoreResult {
        let (score, reasons) = calculate_match_score(profile, property, &self.weights);
        ScoreResult {
            property: property.clone(),
            score,
            reasons,
        }
    }

    /// Find the best listings for a client profile
    ///
    /// # Arguments
    /// * `profile` - The client's preferences and hard filters
    /// * `candidates` - Listings to consider
    /// * `limit` - Maximum number of results; 0 means the default of 5
    ///
    /// # Returns
    /// MatchResult with at most `limit` results, best first
    pub fn find_matches(
        &self,
        profile: &ClientProfile,
        candidates: &[Property],
        limit: usize,
    ) -> MatchResult {
        let scored: Vec<ScoreResult> = candidates
            .iter()
            .filter(|property| admits(profile, property))
            .map(|property| self.score(profile, property))
            .collect();

        let admitted = scored.len();

        MatchResult {
            matches: rank(scored, limit),
            total_candidates: candidates.len(),
            admitted,
        }
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Features, HardFilters, PreferenceWeights};

    fn create_candidate(id: &str, price: f64, quietness: f64, amenities: &[&str]) -> Property {
        Property {
            id: id.to_string(),
            title: format!("Listing {}", id),
            location: "Valencia".to_string(),
            price,
            bedrooms: 3,
            bathrooms: 2,
            area_sqm: 110.0,
            amenities: amenities.iter().map(|a| a.to_string()).collect(),
            features: Features {
                quietness,
                ..Default::default()
            },
            ..Default::default()
        }
    }

    fn create_profile() -> ClientProfile {
        ClientProfile {
            name: "Demo".to_string(),
            budget_min: 200_000.0,
            budget_max: 400_000.0,
            priorities: PreferenceWeights {
                quietness: 1.0,
                ..Default::default()
            },
            hard_filters: HardFilters {
                must_have_amenities: vec!["parking".to_string()],
            },
            ..Default::default()
        }
    }

    #[test]
    fn test_find_matches_basic() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_candidate("1", 300_000.0, 0.9, &["parking"]),
            create_candidate("2", 450_000.0, 0.9, &["parking"]), // Over budget
            create_candidate("3", 300_000.0, 0.9, &["pool"]),    // Missing parking
        ];

        let result = matcher.find_matches(&create_profile(), &candidates, 10);

        assert_eq!(result.matches.len(), 1);
        assert_eq!(result.matches[0].property.id, "1");
        assert_eq!(result.total_candidates, 3);
        assert_eq!(result.admitted, 1);
    }

    #[test]
    fn test_matches_sorted_by_score() {
        let matcher = Matcher::with_default_weights();
        let candidates = vec![
            create_candidate("1", 250_000.0, 0.3, &["parking"]),
            create_candidate("2", 250_000.0, 0.95, &["parking"]),
        ];

        let result = matcher.find_matches(&create_profile(), &candidates, 10);

        assert_eq!(result.matches[0].property.id, "2");
        assert!(result.matches[0].score >= result.matches[1].score);
    }

    #[test]
    fn test_respects_limit() {
        let matcher = Matcher::with_default_weights();
        let candidates: Vec<Property> = (0..20u32)
            .map(|i| create_candidate(&i.to_string(), 300_000.0, f64::from(i) / 20.0, &["parking"]))
            .collect();

        assert_eq!(matcher.find_matches(&create_profile(), &candidates, 5).matches.len(), 5);
        assert_eq!(matcher.find_matches(&create_profile(), &candidates, 0).matches.len(), 5);
    }

    #[test]
    fn test_custom_weights_are_used() {
        let weights = ScoringWeights {
            quietness: 0.0,
            ..Default::default()
        };
        let matcher = Matcher::new(weights);
        let candidates = vec![create_candidate("1", 300_000.0, 0.9, &["parking"])];

        let result = matcher.find_matches(&create_profile(), &candidates, 5);

        // Only dimension the client cares about is disabled by the operator
        assert_eq!(result.matches[0].score, 50.0);
        assert_eq!(matcher.weights().quietness, 0.0);
    }
}
