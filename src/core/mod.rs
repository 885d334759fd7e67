// Core algorithm exports
pub mod dimensions;
pub mod distance;
pub mod filters;
pub mod matcher;
pub mod ranking;
pub mod scoring;

pub use dimensions::{dimension, Dimension, Polarity, DIMENSIONS};
pub use distance::{clamp01, sea_proximity};
pub use filters::admits;
pub use matcher::{MatchResult, Matcher};
pub use ranking::{effective_limit, rank, DEFAULT_RESULT_LIMIT};
pub use scoring::{budget_closeness, calculate_match_score, reason_message, top_reasons, NEUTRAL_SCORE};
