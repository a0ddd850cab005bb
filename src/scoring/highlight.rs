use crate::types::scoring::{Highlight, PreferredDirection, ScoreLevel, ScoreMap, ScoreParameter};
use std::collections::BTreeMap;

const FAVORABLE_HIGH: u8 = 4;
const FAVORABLE_LOW: u8 = 2;

pub fn classify(raw: ScoreLevel, direction: PreferredDirection) -> Option<Highlight> {
    let value = raw.get();
    match direction {
        PreferredDirection::High if value >= FAVORABLE_HIGH => Some(Highlight::High),
        PreferredDirection::High if value <= FAVORABLE_LOW => Some(Highlight::Low),
        PreferredDirection::Low if value <= FAVORABLE_LOW => Some(Highlight::High),
        PreferredDirection::Low if value >= FAVORABLE_HIGH => Some(Highlight::Low),
        _ => None,
    }
}

/// Highlight of every registered parameter; a missing score reads as the midpoint.
pub fn highlights(
    scores: &ScoreMap,
    parameters: &[ScoreParameter],
) -> BTreeMap<String, Option<Highlight>> {
    parameters
        .iter()
        .map(|parameter| {
            let raw = scores.get(&parameter.id).copied().unwrap_or(ScoreLevel::MID);
            (
                parameter.id.clone(),
                classify(raw, parameter.preferred_direction),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn level(value: u8) -> ScoreLevel {
        ScoreLevel::new(value).expect("test level should be in range")
    }

    #[test]
    fn higher_is_better_thresholds() {
        let high = PreferredDirection::High;
        assert_eq!(classify(level(5), high), Some(Highlight::High));
        assert_eq!(classify(level(4), high), Some(Highlight::High));
        assert_eq!(classify(level(3), high), None);
        assert_eq!(classify(level(2), high), Some(Highlight::Low));
        assert_eq!(classify(level(1), high), Some(Highlight::Low));
    }

    #[test]
    fn lower_is_better_thresholds_flip() {
        let low = PreferredDirection::Low;
        assert_eq!(classify(level(5), low), Some(Highlight::Low));
        assert_eq!(classify(level(3), low), None);
        assert_eq!(classify(level(1), low), Some(Highlight::High));
    }

    #[test]
    fn neutral_is_never_highlighted() {
        for value in 1..=5 {
            assert_eq!(classify(level(value), PreferredDirection::Neutral), None);
        }
    }

    #[test]
    fn highlights_cover_every_registered_parameter() {
        let parameters = vec![
            ScoreParameter::new("impact", "Impact", "", 1.0),
            ScoreParameter::new("cost", "Cost", "", 1.0).with_direction(PreferredDirection::Low),
        ];
        let mut scores = ScoreMap::new();
        scores.insert("impact".to_string(), level(5));

        let result = highlights(&scores, &parameters);
        assert_eq!(result.get("impact"), Some(&Some(Highlight::High)));
        assert_eq!(result.get("cost"), Some(&None));
    }
}
