use super::RoadmapItem;
use crate::error::{PrioritizerError, Result};
use crate::types::roadmap::{canonical_role, RoleAllocation};
use crate::types::use_case::UseCase;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct ResourceTotals {
    pub total_weeks: f64,
    pub total_fte: f64,
}

pub fn totals(items: &[RoadmapItem]) -> ResourceTotals {
    items
        .iter()
        .fold(ResourceTotals::default(), |acc, item| ResourceTotals {
            total_weeks: acc.total_weeks + item.weeks,
            total_fte: acc.total_fte + item.fte,
        })
}

/// FTE summed per role; items without role allocations are not represented.
pub fn fte_by_role(items: &[RoadmapItem]) -> BTreeMap<String, f64> {
    let mut by_role = BTreeMap::new();
    for allocation in items.iter().flat_map(|item| &item.role_allocations) {
        *by_role.entry(allocation.role.clone()).or_insert(0.0) += allocation.fte;
    }
    by_role
}

/// Replaces the role breakdown and keeps the flat FTE equal to its sum.
pub fn apply_role_allocations(
    mut use_case: UseCase,
    allocations: Vec<RoleAllocation>,
) -> Result<UseCase> {
    for allocation in &allocations {
        if allocation.role.trim().is_empty() {
            return Err(PrioritizerError::InvalidAllocation(
                "role name cannot be empty".to_string(),
            ));
        }
        if !allocation.fte.is_finite() || allocation.fte <= 0.0 {
            return Err(PrioritizerError::InvalidAllocation(format!(
                "{} must have an FTE greater than 0",
                allocation.role
            )));
        }
    }

    let allocations = allocations
        .into_iter()
        .map(|allocation| RoleAllocation {
            role: canonical_role(&allocation.role),
            fte: allocation.fte,
        })
        .collect::<Vec<_>>();
    if !allocations.is_empty() {
        use_case.estimated_fte = Some(allocations.iter().map(|allocation| allocation.fte).sum());
    }
    use_case.role_allocations = allocations;
    Ok(use_case)
}

/// Direct FTE edits are only allowed while no roles are assigned.
pub fn apply_fte(mut use_case: UseCase, fte: f64) -> Result<UseCase> {
    if !use_case.role_allocations.is_empty() {
        return Err(PrioritizerError::FteLockedByRoles(use_case.id));
    }
    if !fte.is_finite() || fte < 0.0 {
        return Err(PrioritizerError::InvalidAllocation(format!(
            "estimated FTE must be non-negative, got {fte}"
        )));
    }
    use_case.estimated_fte = Some(fte);
    Ok(use_case)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::roadmap::RoadmapPhase;
    use crate::types::scoring::ScoreMap;
    use crate::types::use_case::UseCaseDraft;

    fn item(id: &str, weeks: f64, fte: f64, roles: Vec<RoleAllocation>) -> RoadmapItem {
        RoadmapItem {
            id: id.to_string(),
            title: id.to_string(),
            score: 3.0,
            phase: RoadmapPhase::ShortTerm,
            manual: false,
            order: None,
            weeks,
            fte,
            role_allocations: roles,
        }
    }

    fn use_case() -> UseCase {
        let draft = UseCaseDraft {
            title: "t".to_string(),
            ..UseCaseDraft::default()
        };
        UseCase::from_draft("u".to_string(), draft, ScoreMap::new(), 0.0)
    }

    #[test]
    fn totals_are_plain_sums() {
        let items = vec![
            item("a", 4.0, 1.0, vec![]),
            item("b", 8.0, 0.5, vec![]),
            item("c", 2.0, 2.0, vec![]),
        ];
        let result = totals(&items);
        assert_eq!(result.total_weeks, 14.0);
        assert_eq!(result.total_fte, 3.5);
    }

    #[test]
    fn fte_by_role_groups_across_items() {
        let items = vec![
            item(
                "a",
                4.0,
                1.0,
                vec![
                    RoleAllocation::new("Data Scientist", 0.5),
                    RoleAllocation::new("Data Engineer", 0.5),
                ],
            ),
            item("b", 4.0, 2.0, vec![]),
            item("c", 4.0, 1.5, vec![RoleAllocation::new("Data Scientist", 1.5)]),
        ];
        let by_role = fte_by_role(&items);
        assert_eq!(by_role.len(), 2);
        assert_eq!(by_role["Data Scientist"], 2.0);
        assert_eq!(by_role["Data Engineer"], 0.5);
    }

    #[test]
    fn role_edit_keeps_flat_fte_in_sync() {
        let updated = apply_role_allocations(
            use_case(),
            vec![
                RoleAllocation::new("Data Scientist", 0.5),
                RoleAllocation::new("Data Engineer", 0.5),
            ],
        )
        .expect("allocations should apply");
        assert_eq!(updated.estimated_fte, Some(1.0));
    }

    #[test]
    fn known_role_names_are_canonicalized() {
        let updated =
            apply_role_allocations(use_case(), vec![RoleAllocation::new(" data engineer ", 1.0)])
                .expect("allocations should apply");
        assert_eq!(updated.role_allocations[0].role, "Data Engineer");
    }

    #[test]
    fn role_with_zero_fte_is_rejected() {
        let result = apply_role_allocations(use_case(), vec![RoleAllocation::new("Data Engineer", 0.0)]);
        assert!(matches!(result, Err(PrioritizerError::InvalidAllocation(_))));
    }

    #[test]
    fn flat_fte_is_locked_once_roles_exist() {
        let with_roles =
            apply_role_allocations(use_case(), vec![RoleAllocation::new("Data Strategist", 0.25)])
                .expect("allocations should apply");
        assert!(matches!(
            apply_fte(with_roles, 3.0),
            Err(PrioritizerError::FteLockedByRoles(_))
        ));
        let plain = apply_fte(use_case(), 2.0).expect("fte should apply");
        assert_eq!(plain.estimated_fte, Some(2.0));
    }
}
