//! Property Match - explainable property-to-client matching service
//!
//! This library scores real-estate listings against a client profile with a
//! weighted average over ten lifestyle dimensions, applies hard amenity filters,
//! and ranks the results with human-readable reasons.

pub mod config;
pub mod core;
pub mod logging;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use core::{calculate_match_score, Matcher};
pub use models::{
    ClientProfile, Features, MatchRequest, MatchResponse, PreferenceWeights, Property,
    ScoreReason, ScoreResult, ScoringWeights,
};
