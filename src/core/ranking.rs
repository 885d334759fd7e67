use std::cmp::Ordering;

use crate::models::ScoreResult;

/// Result count used when the caller asks for zero results
pub const DEFAULT_RESULT_LIMIT: usize = 5;

/// Resolve a caller-supplied limit; anything <= 0 means the default
pub fn effective_limit(requested: i64) -> usize {
    if requested <= 0 {
        return DEFAULT_RESULT_LIMIT;
    }
    usize::try_from(requested).unwrap_or(usize::MAX)
}

/// Sort scored listings by descending score and keep the first `limit`
///
/// Ties are broken by property id ascending, then by input order. A zero
/// `limit` means [`DEFAULT_RESULT_LIMIT`].
pub fn rank(mut results: Vec<ScoreResult>, limit: usize) -> Vec<ScoreResult> {
    let limit = if limit == 0 { DEFAULT_RESULT_LIMIT } else { limit };

    results.sort_by(|a, b| {
        b.score
            .partial_cmp(&a.score)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.property.id.cmp(&b.property.id))
    });

    results.truncate(limit);
    results
}
