use crate::types::roadmap::{Placement, RoadmapPhase, ViewMode};
use crate::types::use_case::UseCase;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Priority order: composite score descending, then oldest first, then id.
pub fn compare_priority(a: &UseCase, b: &UseCase) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.created_at.cmp(&b.created_at))
        .then_with(|| a.id.cmp(&b.id))
}

pub fn rank<'a>(candidates: impl IntoIterator<Item = &'a UseCase>) -> Vec<&'a UseCase> {
    let mut ranked = candidates.into_iter().collect::<Vec<_>>();
    ranked.sort_by(|a, b| compare_priority(a, b));
    ranked
}

/// Bucket for rank `index` out of `total`, using exact integer comparisons of
/// the percentile `index / total` against the view's cut points.
pub fn bucket(index: usize, total: usize, view: ViewMode) -> RoadmapPhase {
    match view {
        ViewMode::Timeline => {
            if 3 * index < total {
                RoadmapPhase::ShortTerm
            } else if 3 * index < 2 * total {
                RoadmapPhase::MidTerm
            } else {
                RoadmapPhase::LongTerm
            }
        }
        ViewMode::Quarterly => {
            if 4 * index < total {
                RoadmapPhase::Q1
            } else if 4 * index < 2 * total {
                RoadmapPhase::Q2
            } else if 4 * index < 3 * total {
                RoadmapPhase::Q3
            } else {
                RoadmapPhase::Q4
            }
        }
    }
}

/// Phase for every candidate. Placed candidates keep their phase; unplaced
/// ones are bucketed by their rank among all candidates.
pub fn assign_phases(candidates: &[UseCase], view: ViewMode) -> BTreeMap<String, RoadmapPhase> {
    let ranked = rank(candidates);
    let total = ranked.len();
    ranked
        .into_iter()
        .enumerate()
        .map(|(index, use_case)| {
            let phase = use_case
                .placement
                .phase()
                .unwrap_or_else(|| bucket(index, total, view));
            (use_case.id.clone(), phase)
        })
        .collect()
}

/// Writes auto-assigned phases back for roadmap members that have none.
pub fn commit_auto_phases(use_cases: Vec<UseCase>, view: ViewMode) -> Vec<UseCase> {
    let members = use_cases
        .iter()
        .filter(|use_case| use_case.in_roadmap)
        .cloned()
        .collect::<Vec<_>>();
    let phases = assign_phases(&members, view);

    use_cases
        .into_iter()
        .map(|mut use_case| {
            if use_case.in_roadmap && use_case.placement == Placement::Unplaced {
                if let Some(phase) = phases.get(&use_case.id) {
                    use_case.placement = Placement::AutoAssigned(*phase);
                }
            }
            use_case
        })
        .collect()
}
