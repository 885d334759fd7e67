// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    ClientProfile, Features, HardFilters, ListParams, PreferenceWeights, Property, ScoreReason,
    ScoreResult, ScoringWeights, SortKey,
};
pub use requests::{CreatePropertyRequest, ListPropertiesQuery, MatchQuery, MatchRequest};
pub use responses::{
    ErrorResponse, HealthResponse, MatchResponse, PropertiesListResponse, PropertySummary,
    StatusResponse,
};
