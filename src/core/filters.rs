use std::collections::HashSet;

use crate::models::{ClientProfile, Property};

/// Normalize an amenity tag for comparison
#[inline]
fn normalize_amenity(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Check whether a property passes the client's hard filters
///
/// Rejects listings outside a set budget bound (0 means unbounded) and
/// listings missing any required amenity. Amenity comparison is trimmed and
/// case-insensitive; blank requirements are ignored.
pub fn admits(profile: &ClientProfile, property: &Property) -> bool {
    if profile.budget_min > 0.0 && property.price < profile.budget_min {
        return false;
    }
    if profile.budget_max > 0.0 && property.price > profile.budget_max {
        return false;
    }

    let required = &profile.hard_filters.must_have_amenities;
    if required.is_empty() {
        return true;
    }

    let have: HashSet<String> = property
        .amenities
        .iter()
        .map(|a| normalize_amenity(a))
        .collect();

    required
        .iter()
        .map(|r| normalize_amenity(r))
        .filter(|r| !r.is_empty())
        .all(|r| have.contains(&r))
}
