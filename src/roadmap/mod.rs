pub mod estimate;
pub mod phase;
pub mod resources;

use crate::types::config::RoadmapSettings;
use crate::types::roadmap::{Placement, RoadmapPhase, RoleAllocation, ViewMode};
use crate::types::scoring::Score;
use crate::types::use_case::UseCase;
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

pub use phase::{assign_phases, commit_auto_phases};
pub use resources::{fte_by_role, totals, ResourceTotals};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoadmapItem {
    pub id: String,
    pub title: String,
    pub score: Score,
    pub phase: RoadmapPhase,
    pub manual: bool,
    pub order: Option<u32>,
    pub weeks: f64,
    pub fte: f64,
    pub role_allocations: Vec<RoleAllocation>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Roadmap {
    pub view: ViewMode,
    pub items: Vec<RoadmapItem>,
    pub totals: ResourceTotals,
    pub fte_by_role: BTreeMap<String, f64>,
}

impl Roadmap {
    /// Items of one phase in display order.
    pub fn phase_items(&self, phase: RoadmapPhase) -> impl Iterator<Item = &RoadmapItem> {
        self.items.iter().filter(move |item| item.phase == phase)
    }

    /// The view's own phases, followed by phases left over from the other view.
    pub fn phases(&self) -> Vec<RoadmapPhase> {
        let mut phases = self.view.phases().to_vec();
        for item in &self.items {
            if !phases.contains(&item.phase) {
                phases.push(item.phase);
            }
        }
        phases
    }
}

/// Marks the top `limit` use cases as roadmap members when none are yet.
pub fn select_initial(use_cases: Vec<UseCase>, limit: usize) -> Vec<UseCase> {
    if use_cases.iter().any(|use_case| use_case.in_roadmap) {
        return use_cases;
    }

    let chosen = phase::rank(&use_cases)
        .into_iter()
        .take(limit)
        .map(|use_case| use_case.id.clone())
        .collect::<HashSet<_>>();

    use_cases
        .into_iter()
        .map(|mut use_case| {
            if chosen.contains(&use_case.id) {
                use_case.in_roadmap = true;
            }
            use_case
        })
        .collect()
}

/// Read-only roadmap for `view`. Unplaced members get their would-be phase
/// without it being written back.
pub fn build(use_cases: &[UseCase], view: ViewMode, settings: &RoadmapSettings) -> Roadmap {
    let members = use_cases
        .iter()
        .filter(|use_case| use_case.in_roadmap)
        .cloned()
        .collect::<Vec<_>>();
    let phases = assign_phases(&members, view);

    let mut items = phase::rank(&members)
        .into_iter()
        .filter_map(|use_case| {
            let phase = *phases.get(&use_case.id)?;
            Some(RoadmapItem {
                id: use_case.id.clone(),
                title: use_case.title.clone(),
                score: use_case.score,
                phase,
                manual: matches!(use_case.placement, Placement::ManuallyPlaced(_)),
                order: use_case.roadmap_order,
                weeks: estimate::resolve_weeks(use_case, settings),
                fte: estimate::resolve_fte(use_case, settings),
                role_allocations: use_case.role_allocations.clone(),
            })
        })
        .collect::<Vec<_>>();
    // stable: rank order survives among items with equal or missing order
    items.sort_by(|a, b| compare_order(a.order, b.order));

    let totals = totals(&items);
    let fte_by_role = fte_by_role(&items);
    Roadmap {
        view,
        items,
        totals,
        fte_by_role,
    }
}

fn compare_order(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
