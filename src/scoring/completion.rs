use crate::types::scoring::{ScoreLevel, ScoreMap, ScoreParameter};
use crate::types::use_case::LegacyLevel;

const LEGACY_IMPACT_ID: &str = "impact";
const LEGACY_EASE_ID: &str = "easeOfImplementation";

/// Fresh map with every registered parameter at its default.
pub fn default_scores(parameters: &[ScoreParameter]) -> ScoreMap {
    parameters
        .iter()
        .map(|parameter| (parameter.id.clone(), parameter.fallback_score()))
        .collect()
}

/// Returns a superset of the registered ids: present entries are kept as-is
/// (including ones for parameters that no longer exist), missing ones get the
/// parameter default.
pub fn complete(scores: Option<&ScoreMap>, parameters: &[ScoreParameter]) -> ScoreMap {
    let Some(scores) = scores else {
        return default_scores(parameters);
    };

    let mut completed = scores.clone();
    for parameter in parameters {
        completed
            .entry(parameter.id.clone())
            .or_insert_with(|| parameter.fallback_score());
    }
    completed
}

pub fn legacy_level_score(level: LegacyLevel) -> ScoreLevel {
    match level {
        LegacyLevel::High => ScoreLevel::MAX,
        LegacyLevel::Medium => ScoreLevel::MID,
        LegacyLevel::Low => ScoreLevel::MIN,
    }
}

/// Defaults, with the coarse impact/ease ratings mapped onto their parameters
/// when those parameters are registered.
pub fn default_scores_with_legacy(
    parameters: &[ScoreParameter],
    impact: Option<LegacyLevel>,
    ease: Option<LegacyLevel>,
) -> ScoreMap {
    let mut scores = default_scores(parameters);
    for (id, level) in [(LEGACY_IMPACT_ID, impact), (LEGACY_EASE_ID, ease)] {
        if let (Some(level), Some(slot)) = (level, scores.get_mut(id)) {
            *slot = legacy_level_score(level);
        }
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn level(value: u8) -> ScoreLevel {
        ScoreLevel::new(value).expect("test level should be in range")
    }

    fn parameters() -> Vec<ScoreParameter> {
        let mut risky = ScoreParameter::new("risk", "Risk", "", 0.5);
        risky.default_value = Some(level(2));
        let mut unset = ScoreParameter::new("reach", "Reach", "", 0.5);
        unset.default_value = None;
        vec![ScoreParameter::new("impact", "Impact", "", 1.0), risky, unset]
    }

    #[test]
    fn absent_scores_use_parameter_defaults() {
        let completed = complete(None, &parameters());
        assert_eq!(completed.get("impact"), Some(&level(3)));
        assert_eq!(completed.get("risk"), Some(&level(2)));
        assert_eq!(completed.get("reach"), Some(&level(3)));
    }

    #[test]
    fn existing_and_orphaned_entries_are_preserved() {
        let mut scores = ScoreMap::new();
        scores.insert("impact".to_string(), level(5));
        scores.insert("retired".to_string(), level(1));

        let completed = complete(Some(&scores), &parameters());
        assert_eq!(completed.get("impact"), Some(&level(5)));
        assert_eq!(completed.get("retired"), Some(&level(1)));
        assert_eq!(completed.get("risk"), Some(&level(2)));
        assert_eq!(completed.len(), 4);
    }

    #[test]
    fn legacy_levels_map_onto_known_parameters() {
        let mut parameters = parameters();
        parameters.push(ScoreParameter::new(LEGACY_EASE_ID, "Ease", "", 0.8));

        let scores =
            default_scores_with_legacy(&parameters, Some(LegacyLevel::High), Some(LegacyLevel::Low));
        assert_eq!(scores.get("impact"), Some(&level(5)));
        assert_eq!(scores.get(LEGACY_EASE_ID), Some(&level(1)));
        assert_eq!(scores.get("risk"), Some(&level(2)));
    }

    #[test]
    fn legacy_levels_are_dropped_without_matching_parameter() {
        let parameters = vec![ScoreParameter::new("reach", "Reach", "", 1.0)];
        let scores = default_scores_with_legacy(&parameters, Some(LegacyLevel::High), None);
        assert_eq!(scores.len(), 1);
        assert!(!scores.contains_key("impact"));
    }

    proptest! {
        #[test]
        fn completion_is_idempotent(
            entries in proptest::collection::btree_map("[a-z]{1,8}", 1u8..=5, 0..6)
        ) {
            let scores = entries
                .into_iter()
                .map(|(id, v)| (id, level(v)))
                .collect::<ScoreMap>();
            let parameters = parameters();
            let once = complete(Some(&scores), &parameters);
            let twice = complete(Some(&once), &parameters);
            prop_assert_eq!(&once, &twice);
            prop_assert!(parameters.iter().all(|p| once.contains_key(&p.id)));
        }
    }
}
