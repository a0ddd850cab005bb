pub mod aggregate;
pub mod completion;
pub mod highlight;
pub mod normalize;

use crate::types::scoring::ScoreParameter;
use crate::types::use_case::UseCase;

pub use aggregate::aggregate;
pub use completion::complete;
pub use highlight::highlights;

/// Re-completes and re-aggregates one use case against `parameters`.
pub fn rescore(mut use_case: UseCase, parameters: &[ScoreParameter]) -> UseCase {
    use_case.scores = complete(Some(&use_case.scores), parameters);
    use_case.score = aggregate(&use_case.scores, parameters);
    use_case
}

/// Single pass that brings every cached composite score in line with the
/// current parameters. Must run after any registry change and after loading,
/// before anything reads `score`.
pub fn recompute_all(parameters: &[ScoreParameter], use_cases: Vec<UseCase>) -> Vec<UseCase> {
    use_cases
        .into_iter()
        .map(|use_case| rescore(use_case, parameters))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::scoring::{default_parameters, ScoreLevel, ScoreMap};
    use crate::types::use_case::UseCaseDraft;

    fn use_case(id: &str, pairs: &[(&str, u8)]) -> UseCase {
        let scores = pairs
            .iter()
            .map(|(k, v)| {
                (
                    (*k).to_string(),
                    ScoreLevel::new(*v).expect("test level should be in range"),
                )
            })
            .collect::<ScoreMap>();
        let draft = UseCaseDraft {
            title: id.to_string(),
            ..UseCaseDraft::default()
        };
        UseCase::from_draft(id.to_string(), draft, scores, 0.0)
    }

    #[test]
    fn recompute_fills_scores_and_refreshes_cache() {
        let parameters = default_parameters();
        let stale = use_case("u1", &[("impact", 5), ("businessValue", 5)]);

        let refreshed = recompute_all(&parameters, vec![stale]);
        let only = &refreshed[0];
        assert!(parameters.iter().all(|p| only.scores.contains_key(&p.id)));
        assert_eq!(only.score, aggregate(&only.scores, &parameters));
        assert!(only.score > 3.0);
    }

    #[test]
    fn reordering_parameters_leaves_scores_unchanged() {
        let parameters = default_parameters();
        let cases = vec![
            use_case("a", &[("impact", 5), ("ethicalConsiderations", 1)]),
            use_case("b", &[("impact", 2), ("maintainability", 4)]),
            use_case("c", &[("dataAvailability", 1), ("ethicalConsiderations", 5)]),
        ];
        let before = recompute_all(&parameters, cases.clone());

        let mut reordered = parameters.clone();
        reordered.swap(0, 6);
        reordered.swap(2, 3);
        let after = recompute_all(&reordered, cases);

        for (left, right) in before.iter().zip(after.iter()) {
            assert_eq!(left.score, right.score);
        }
    }
}
