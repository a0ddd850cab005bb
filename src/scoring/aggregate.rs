use super::normalize::{effective_weight, normalize};
use crate::types::scoring::{Score, ScoreMap, ScoreParameter};

/// Composite steps per scale point; results snap to multiples of 1/5.
const SNAP_STEPS: f64 = 5.0;

/// Weighted composite of `scores` over the registered `parameters`.
///
/// Only parameters present in both inputs contribute. Scores for parameters
/// that are no longer registered are ignored. When nothing contributes the
/// result is `0.0`.
pub fn aggregate(scores: &ScoreMap, parameters: &[ScoreParameter]) -> Score {
    let mut weighted_sum = 0.0;
    let mut total_weight = 0.0;

    for parameter in parameters {
        let Some(raw) = scores.get(&parameter.id) else {
            continue;
        };
        let normalized = normalize(*raw, parameter.preferred_direction);
        let weight = effective_weight(parameter.weight, parameter.preferred_direction);
        weighted_sum += f64::from(normalized.get()) * weight;
        total_weight += weight;
    }

    if total_weight == 0.0 {
        return 0.0;
    }

    ((weighted_sum / total_weight) * SNAP_STEPS).round() / SNAP_STEPS
}
