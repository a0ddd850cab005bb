use crate::scoring::completion::default_scores_with_legacy;
use crate::types::challenge::{Challenge, SelectionThresholds};
use crate::types::scoring::{ScoreMap, ScoreParameter};
use crate::types::use_case::{Status, UseCaseDraft};
use chrono::Utc;

/// Challenge meets or exceeds every threshold. Unscored challenges never qualify.
pub fn qualifies(challenge: &Challenge, thresholds: &SelectionThresholds) -> bool {
    challenge.scores.is_some_and(|scores| {
        scores.impact >= thresholds.impact
            && scores.feasibility >= thresholds.feasibility
            && scores.priority >= thresholds.priority
    })
}

pub fn auto_select(challenges: &[Challenge], thresholds: &SelectionThresholds) -> Vec<String> {
    challenges
        .iter()
        .filter(|challenge| qualifies(challenge, thresholds))
        .map(|challenge| challenge.id.clone())
        .collect()
}

/// Selection becomes exactly `selected_ids`; everything else is deselected.
pub fn apply_selection(challenges: Vec<Challenge>, selected_ids: &[String]) -> Vec<Challenge> {
    let now = Utc::now();
    challenges
        .into_iter()
        .map(|mut challenge| {
            let selected = selected_ids.contains(&challenge.id);
            if challenge.selected != selected {
                challenge.selected = selected;
                challenge.updated_at = now;
            }
            challenge
        })
        .collect()
}

/// Draft of a backlog use case seeded from a challenge.
pub fn promote(challenge: &Challenge, parameters: &[ScoreParameter]) -> UseCaseDraft {
    let scores: ScoreMap = default_scores_with_legacy(parameters, challenge.impact, None);
    UseCaseDraft {
        title: challenge.title.clone(),
        description: challenge
            .category
            .map(|category| format!("Addresses a {} challenge.", category.as_str()))
            .unwrap_or_default(),
        scores: Some(scores),
        status: Status::Backlog,
        team_id: challenge.team_id.clone(),
        ..UseCaseDraft::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::challenge::{ChallengeCategory, ChallengeScores};
    use crate::types::scoring::{default_parameters, ScoreLevel};
    use crate::types::use_case::LegacyLevel;

    fn level(value: u8) -> ScoreLevel {
        ScoreLevel::new(value).expect("test level should be in range")
    }

    fn challenge(id: &str, scores: Option<(u8, u8, u8)>) -> Challenge {
        Challenge {
            id: id.to_string(),
            title: format!("challenge {id}"),
            category: None,
            impact: None,
            status: Status::Backlog,
            scores: scores.map(|(impact, feasibility, priority)| ChallengeScores {
                impact: level(impact),
                feasibility: level(feasibility),
                priority: level(priority),
            }),
            selected: false,
            team_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn auto_select_requires_every_axis() {
        let challenges = vec![
            challenge("all-high", Some((4, 4, 4))),
            challenge("exact", Some((3, 3, 3))),
            challenge("one-short", Some((5, 2, 5))),
            challenge("unscored", None),
        ];
        let selected = auto_select(&challenges, &SelectionThresholds::default());
        assert_eq!(selected, vec!["all-high".to_string(), "exact".to_string()]);
    }

    #[test]
    fn apply_selection_deselects_the_rest() {
        let mut previously = challenge("old", Some((1, 1, 1)));
        previously.selected = true;
        let challenges = vec![previously, challenge("new", Some((5, 5, 5)))];

        let applied = apply_selection(challenges, &["new".to_string()]);
        assert!(!applied[0].selected);
        assert!(applied[1].selected);
    }

    #[test]
    fn promote_maps_legacy_impact() {
        let mut source = challenge("c1", None);
        source.impact = Some(LegacyLevel::High);
        source.category = Some(ChallengeCategory::CustomerInsights);

        let draft = promote(&source, &default_parameters());
        let scores = draft.scores.expect("promoted draft carries scores");
        assert_eq!(scores.get("impact"), Some(&level(5)));
        assert_eq!(scores.get("businessValue"), Some(&level(3)));
        assert_eq!(draft.title, "challenge c1");
        assert!(draft.description.contains("Customer Insights"));
    }
}
