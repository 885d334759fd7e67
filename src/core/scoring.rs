use std::cmp::Ordering;

use crate::core::{dimensions::DIMENSIONS, distance::clamp01};
use crate::models::{ClientProfile, Property, ScoreReason, ScoringWeights};

/// Score returned when no factor is active
pub const NEUTRAL_SCORE: f64 = 50.0;

/// Reasons kept for a differentiated score
pub const MAX_REASONS: usize = 7;

/// Reasons kept on the neutral path
pub const NEUTRAL_MAX_REASONS: usize = 5;

/// Share of the accumulated active weight given to budget closeness
const BUDGET_NUDGE_SHARE: f64 = 0.05;

/// Price/budget ratio at or below which closeness is full
const BUDGET_COMFORT_RATIO: f64 = 0.7;

/// Ratio span over which closeness decays from 1 to 0
const BUDGET_DECAY_SPAN: f64 = 0.3;

/// Calculate a match score (0-100) and its explanation for one listing
///
/// The score is a weighted average over the active subset of dimensions:
///
/// ```text
/// w_i   = client_preference_i * global_weight_i   (only when both > 0)
/// score = sum(w_i * v_i) / sum(w_i) * 100
/// ```
///
/// where `v_i` is the normalized listing value (inverted for low tourism).
/// When a max budget is set and at least one dimension is active, budget
/// closeness joins with weight `0.05 * sum(w_i)`. With no active dimension the
/// result is exactly 50.0.
///
/// # Returns
/// The score rounded to one decimal and up to 7 reasons, strongest first,
/// with impacts relative to the strongest one.
pub fn calculate_match_score(
    profile: &ClientProfile,
    property: &Property,
    weights: &ScoringWeights,
) -> (f64, Vec<ScoreReason>) {
    let mut sum_w = 0.0;
    let mut sum = 0.0;
    let mut reasons = Vec::with_capacity(DIMENSIONS.len() + 1);

    for dim in &DIMENSIONS {
        let weight = (dim.weight)(weights);
        let pref = (dim.preference)(&profile.priorities);
        // Indifference on either side drops the dimension from both sums
        if pref <= 0.0 || weight <= 0.0 {
            continue;
        }

        let w = pref * weight;
        let v = dim.effective_value(&property.features);
        sum_w += w;
        sum += w * v;

        reasons.push(ScoreReason {
            kind: dim.key.to_string(),
            message: reason_message(dim.label, v),
            impact: w * v,
        });
    }

    if profile.budget_max > 0.0 && sum_w > 0.0 {
        let closeness = budget_closeness(property.price, profile.budget_max);
        let w = BUDGET_NUDGE_SHARE * sum_w;
        sum_w += w;
        sum += w * closeness;

        reasons.push(ScoreReason {
            kind: "budget_closeness".to_string(),
            message: reason_message("budget closeness", closeness),
            impact: w * closeness,
        });
    }

    if sum_w <= 0.0 {
        return (NEUTRAL_SCORE, top_reasons(reasons, NEUTRAL_MAX_REASONS));
    }

    let score = (sum / sum_w * 1000.0).round() / 10.0;
    (score.clamp(0.0, 100.0), top_reasons(reasons, MAX_REASONS))
}

/// How comfortably a price sits within the max budget, in [0, 1]
///
/// Full credit at or below 70% of the budget, falling linearly to 0 at 100%.
/// A non-positive budget yields 0.5.
#[inline]
pub fn budget_closeness(price: f64, budget_max: f64) -> f64 {
    if budget_max <= 0.0 {
        return 0.5;
    }
    let ratio = price / budget_max;
    clamp01(1.0 - (ratio - BUDGET_COMFORT_RATIO) / BUDGET_DECAY_SPAN)
}

/// Banded message for a [0, 1] value
pub fn reason_message(label: &str, v: f64) -> String {
    let band = if v >= 0.8 {
        "strong match"
    } else if v >= 0.6 {
        "good"
    } else if v >= 0.4 {
        "mixed"
    } else {
        "weak"
    };
    format!("{}: {}", label, band)
}

/// Keep the `max` strongest reasons and rescale impacts to the best one
///
/// Equal impacts keep their insertion order. When the best raw impact is not
/// positive the impacts are left as they are.
pub fn top_reasons(mut reasons: Vec<ScoreReason>, max: usize) -> Vec<ScoreReason> {
    reasons.sort_by(|a, b| b.impact.partial_cmp(&a.impact).unwrap_or(Ordering::Equal));
    let max = if max == 0 { NEUTRAL_MAX_REASONS } else { max };
    reasons.truncate(max);

    let best = match reasons.first() {
        Some(r) => r.impact,
        None => return reasons,
    };
    if best <= 0.0 {
        return reasons;
    }

    for reason in &mut reasons {
        reason.impact = (reason.impact / best * 100.0).round() / 100.0;
    }
    reasons
}
