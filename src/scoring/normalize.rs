use crate::types::scoring::{PreferredDirection, ScoreLevel};

pub const NEUTRAL_WEIGHT_FACTOR: f64 = 0.5;

/// Maps a raw score onto the "higher is better" scale.
pub fn normalize(raw: ScoreLevel, direction: PreferredDirection) -> ScoreLevel {
    match direction {
        PreferredDirection::High | PreferredDirection::Neutral => raw,
        PreferredDirection::Low => raw.inverted(),
    }
}

pub fn effective_weight(weight: f64, direction: PreferredDirection) -> f64 {
    match direction {
        PreferredDirection::Neutral => weight * NEUTRAL_WEIGHT_FACTOR,
        PreferredDirection::High | PreferredDirection::Low => weight,
    }
}
