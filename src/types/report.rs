use super::scoring::{Highlight, PreferredDirection, Score, ScoreLevel, ScoreParameter};
use super::use_case::{Status, UseCase};
use crate::scoring::highlights;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ParameterColumn {
    pub id: String,
    pub name: String,
    pub weight: f64,
    pub preferred_direction: PreferredDirection,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreCell {
    pub parameter: String,
    pub value: ScoreLevel,
    pub highlight: Option<Highlight>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RankedEntry {
    pub rank: usize,
    pub id: String,
    pub title: String,
    pub status: Status,
    pub score: Score,
    pub in_roadmap: bool,
    pub scores: Vec<ScoreCell>,
}

/// Ranked use cases with one score column per registered parameter.
#[derive(Debug, Clone, Serialize)]
pub struct RankingReport {
    pub parameters: Vec<ParameterColumn>,
    pub entries: Vec<RankedEntry>,
}

impl RankingReport {
    /// `ranked` is taken in display order.
    pub fn new(parameters: &[ScoreParameter], ranked: &[&UseCase]) -> Self {
        let columns = parameters
            .iter()
            .map(|parameter| ParameterColumn {
                id: parameter.id.clone(),
                name: parameter.name.clone(),
                weight: parameter.weight,
                preferred_direction: parameter.preferred_direction,
            })
            .collect();

        let entries = ranked
            .iter()
            .enumerate()
            .map(|(index, use_case)| {
                let marks = highlights(&use_case.scores, parameters);
                let scores = parameters
                    .iter()
                    .map(|parameter| ScoreCell {
                        parameter: parameter.id.clone(),
                        value: use_case
                            .scores
                            .get(&parameter.id)
                            .copied()
                            .unwrap_or(ScoreLevel::MID),
                        highlight: marks.get(&parameter.id).copied().flatten(),
                    })
                    .collect();
                RankedEntry {
                    rank: index + 1,
                    id: use_case.id.clone(),
                    title: use_case.title.clone(),
                    status: use_case.status,
                    score: use_case.score,
                    in_roadmap: use_case.in_roadmap,
                    scores,
                }
            })
            .collect();

        Self {
            parameters: columns,
            entries,
        }
    }
}
