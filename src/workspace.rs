use crate::challenge;
use crate::error::{PrioritizerError, Result};
use crate::query::UseCaseQuery;
use crate::registry::{Move, NewParameter, ParameterEdit, ParameterRegistry};
use crate::roadmap::{self, resources, Roadmap};
use crate::scoring::{self, aggregate, complete};
use crate::suggest::{self, Draft};
use crate::types::challenge::{Challenge, ChallengeDraft, SelectionThresholds};
use crate::types::config::RoadmapSettings;
use crate::types::roadmap::{Placement, RoadmapPhase, RoleAllocation};
use crate::types::scoring::{ScoreMap, ScoreParameter};
use crate::types::use_case::{Status, UseCase, UseCaseDraft};
use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

/// Single owner of parameters, use cases and challenges.
///
/// Every operation validates first and then swaps in a freshly computed
/// collection, so a rejected call leaves the workspace exactly as it was.
/// Parameter changes always end with a full rescore of the use cases.
#[derive(Debug, Clone)]
pub struct Workspace {
    registry: ParameterRegistry,
    use_cases: Vec<UseCase>,
    challenges: Vec<Challenge>,
    settings: RoadmapSettings,
}

impl Workspace {
    pub fn new(
        registry: ParameterRegistry,
        use_cases: Vec<UseCase>,
        challenges: Vec<Challenge>,
    ) -> Self {
        let use_cases = scoring::recompute_all(registry.as_slice(), use_cases);
        Self {
            registry,
            use_cases,
            challenges,
            settings: RoadmapSettings::default(),
        }
    }

    pub fn with_settings(mut self, settings: RoadmapSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn parameters(&self) -> &[ScoreParameter] {
        self.registry.as_slice()
    }

    pub fn use_cases(&self) -> &[UseCase] {
        &self.use_cases
    }

    pub fn challenges(&self) -> &[Challenge] {
        &self.challenges
    }

    pub fn use_case(&self, id: &str) -> Result<&UseCase> {
        let index = self.use_case_index(id)?;
        Ok(&self.use_cases[index])
    }

    // parameters

    pub fn add_parameter(&mut self, new: NewParameter) -> Result<String> {
        let mut registry = self.registry.clone();
        let id = registry.add(new)?.id.clone();
        self.commit_registry(registry);
        tracing::info!(parameter = %id, "added scoring parameter");
        Ok(id)
    }

    pub fn remove_parameter(&mut self, id: &str) -> Result<ScoreParameter> {
        let mut registry = self.registry.clone();
        let removed = registry.remove(id)?;
        self.commit_registry(registry);
        tracing::info!(parameter = %id, "removed scoring parameter");
        Ok(removed)
    }

    /// Returns false when the parameter is already at that edge.
    pub fn move_parameter(&mut self, id: &str, direction: Move) -> Result<bool> {
        let mut registry = self.registry.clone();
        if !registry.shift(id, direction)? {
            return Ok(false);
        }
        self.commit_registry(registry);
        tracing::debug!(parameter = %id, ?direction, "moved scoring parameter");
        Ok(true)
    }

    pub fn edit_parameter(&mut self, id: &str, edit: ParameterEdit) -> Result<()> {
        let mut registry = self.registry.clone();
        registry.edit(id, edit)?;
        self.commit_registry(registry);
        tracing::info!(parameter = %id, "edited scoring parameter");
        Ok(())
    }

    fn commit_registry(&mut self, registry: ParameterRegistry) {
        let use_cases = scoring::recompute_all(registry.as_slice(), self.use_cases.clone());
        self.registry = registry;
        self.use_cases = use_cases;
    }

    // use cases

    pub fn add_use_case(&mut self, draft: UseCaseDraft) -> Result<String> {
        if draft.title.trim().is_empty() {
            return Err(PrioritizerError::EmptyTitle);
        }
        if let Some(scores) = &draft.scores {
            self.check_known_parameters(scores)?;
        }
        let parameters = self.registry.as_slice();
        let scores = complete(draft.scores.as_ref(), parameters);
        let score = aggregate(&scores, parameters);
        let id = Uuid::new_v4().to_string();

        let mut use_cases = self.use_cases.clone();
        use_cases.push(UseCase::from_draft(id.clone(), draft, scores, score));
        self.use_cases = use_cases;
        tracing::info!(use_case = %id, score, "added use case");
        Ok(id)
    }

    /// Overwrites the given parameter scores and leaves the rest alone.
    pub fn set_scores(&mut self, id: &str, updates: ScoreMap) -> Result<()> {
        self.check_known_parameters(&updates)?;
        let parameters = self.registry.as_slice().to_vec();
        self.update_use_case(id, |mut use_case| {
            use_case.scores.extend(updates);
            Ok(scoring::rescore(use_case, &parameters))
        })?;
        tracing::info!(use_case = %id, "updated use case scores");
        Ok(())
    }

    pub fn set_status(&mut self, id: &str, status: Status) -> Result<()> {
        self.update_use_case(id, |mut use_case| {
            use_case.status = status;
            Ok(use_case)
        })?;
        tracing::info!(use_case = %id, status = status.as_str(), "changed use case status");
        Ok(())
    }

    pub fn remove_use_case(&mut self, id: &str) -> Result<UseCase> {
        let index = self.use_case_index(id)?;
        let mut use_cases = self.use_cases.clone();
        let removed = use_cases.remove(index);
        self.use_cases = use_cases;
        tracing::info!(use_case = %id, "removed use case");
        Ok(removed)
    }

    pub fn query(&self, query: &UseCaseQuery) -> Vec<&UseCase> {
        query.run(&self.use_cases)
    }

    pub fn similar(&self, draft: &Draft) -> Vec<(&UseCase, u32)> {
        suggest::similar(draft, &self.use_cases)
    }

    // roadmap

    /// Seeds an empty roadmap with the top candidates and pins a phase on
    /// every member that has none. Returns whether anything changed.
    pub fn ensure_roadmap(&mut self) -> bool {
        let selected =
            roadmap::select_initial(self.use_cases.clone(), self.settings.initial_selection);
        let committed = roadmap::commit_auto_phases(selected, self.settings.view);
        if committed == self.use_cases {
            return false;
        }
        self.use_cases = committed;
        tracing::info!(view = self.settings.view.as_str(), "committed roadmap phases");
        true
    }

    pub fn roadmap(&self) -> Roadmap {
        roadmap::build(&self.use_cases, self.settings.view, &self.settings)
    }

    pub fn add_to_roadmap(&mut self, id: &str) -> Result<()> {
        if self.use_case(id)?.in_roadmap {
            return Ok(());
        }
        self.update_use_case(id, |mut use_case| {
            use_case.in_roadmap = true;
            use_case.placement = Placement::Unplaced;
            use_case.roadmap_order = None;
            Ok(use_case)
        })?;
        tracing::info!(use_case = %id, "added to roadmap");
        Ok(())
    }

    pub fn remove_from_roadmap(&mut self, id: &str) -> Result<()> {
        self.update_member(id, |mut use_case| {
            use_case.in_roadmap = false;
            use_case.placement = Placement::Unplaced;
            use_case.roadmap_order = None;
            Ok(use_case)
        })?;
        tracing::info!(use_case = %id, "removed from roadmap");
        Ok(())
    }

    /// Manual placement; the phase must belong to the active view.
    pub fn move_to_phase(&mut self, id: &str, phase: RoadmapPhase) -> Result<()> {
        let view = self.settings.view;
        if phase.view() != view {
            return Err(PrioritizerError::PhaseNotInView {
                phase: phase.as_str().to_string(),
                view: view.as_str().to_string(),
            });
        }
        self.update_member(id, |mut use_case| {
            use_case.placement = Placement::ManuallyPlaced(phase);
            use_case.roadmap_order = None;
            Ok(use_case)
        })?;
        tracing::info!(use_case = %id, phase = phase.as_str(), "placed on roadmap");
        Ok(())
    }

    /// Puts `ids` first in `phase`, in the given order, followed by the
    /// phase's other items in their current order. Orders become 0..k.
    pub fn reorder_phase(&mut self, phase: RoadmapPhase, ids: &[String]) -> Result<()> {
        let current = self
            .roadmap()
            .phase_items(phase)
            .map(|item| item.id.clone())
            .collect::<Vec<_>>();
        for id in ids {
            self.use_case_index(id)?;
            if !current.contains(id) {
                return Err(PrioritizerError::NotInPhase {
                    id: id.clone(),
                    phase: phase.as_str().to_string(),
                });
            }
        }

        let mut ordered: Vec<&String> = Vec::with_capacity(current.len());
        for id in ids.iter().chain(current.iter()) {
            if !ordered.contains(&id) {
                ordered.push(id);
            }
        }
        let positions = ordered
            .into_iter()
            .enumerate()
            .map(|(position, id)| (id.as_str(), position as u32))
            .collect::<HashMap<_, _>>();

        let now = Utc::now();
        self.use_cases = self
            .use_cases
            .iter()
            .cloned()
            .map(|mut use_case| {
                if let Some(position) = positions.get(use_case.id.as_str()) {
                    if use_case.placement == Placement::Unplaced {
                        use_case.placement = Placement::AutoAssigned(phase);
                    }
                    use_case.roadmap_order = Some(*position);
                    use_case.updated_at = now;
                }
                use_case
            })
            .collect();
        tracing::info!(phase = phase.as_str(), count = positions.len(), "reordered phase");
        Ok(())
    }

    pub fn set_weeks(&mut self, id: &str, weeks: f64) -> Result<()> {
        if !weeks.is_finite() || weeks <= 0.0 {
            return Err(PrioritizerError::InvalidEstimate(format!(
                "estimated weeks must be greater than 0, got {weeks}"
            )));
        }
        self.update_use_case(id, |mut use_case| {
            use_case.estimated_time_in_weeks = Some(weeks);
            Ok(use_case)
        })?;
        tracing::info!(use_case = %id, weeks, "set estimated weeks");
        Ok(())
    }

    pub fn set_fte(&mut self, id: &str, fte: f64) -> Result<()> {
        self.update_use_case(id, |use_case| resources::apply_fte(use_case, fte))?;
        tracing::info!(use_case = %id, fte, "set estimated FTE");
        Ok(())
    }

    pub fn set_roles(&mut self, id: &str, allocations: Vec<RoleAllocation>) -> Result<()> {
        self.update_use_case(id, |use_case| {
            resources::apply_role_allocations(use_case, allocations)
        })?;
        tracing::info!(use_case = %id, "set role allocations");
        Ok(())
    }

    // challenges

    pub fn add_challenge(&mut self, draft: ChallengeDraft) -> Result<String> {
        if draft.title.trim().is_empty() {
            return Err(PrioritizerError::EmptyTitle);
        }
        let id = Uuid::new_v4().to_string();
        let mut challenges = self.challenges.clone();
        challenges.push(Challenge::from_draft(id.clone(), draft));
        self.challenges = challenges;
        tracing::info!(challenge = %id, "added challenge");
        Ok(id)
    }

    /// Replaces the current selection with every qualifying challenge.
    pub fn auto_select_challenges(&mut self, thresholds: &SelectionThresholds) -> Vec<String> {
        let selected = challenge::auto_select(&self.challenges, thresholds);
        self.challenges = challenge::apply_selection(self.challenges.clone(), &selected);
        tracing::info!(selected = selected.len(), "auto-selected challenges");
        selected
    }

    /// Creates a backlog use case from the challenge and returns its id.
    pub fn promote_challenge(&mut self, id: &str) -> Result<String> {
        let source = self
            .challenges
            .iter()
            .find(|challenge| challenge.id == id)
            .ok_or_else(|| PrioritizerError::ChallengeNotFound(id.to_string()))?;
        let draft = challenge::promote(source, self.registry.as_slice());
        let use_case_id = self.add_use_case(draft)?;
        tracing::info!(challenge = %id, use_case = %use_case_id, "promoted challenge");
        Ok(use_case_id)
    }

    fn use_case_index(&self, id: &str) -> Result<usize> {
        self.use_cases
            .iter()
            .position(|use_case| use_case.id == id)
            .ok_or_else(|| PrioritizerError::UseCaseNotFound(id.to_string()))
    }

    fn check_known_parameters(&self, scores: &ScoreMap) -> Result<()> {
        match scores.keys().find(|parameter| self.registry.get(parameter).is_none()) {
            Some(unknown) => Err(PrioritizerError::ParameterNotFound(unknown.clone())),
            None => Ok(()),
        }
    }

    fn update_use_case<F>(&mut self, id: &str, update: F) -> Result<()>
    where
        F: FnOnce(UseCase) -> Result<UseCase>,
    {
        let index = self.use_case_index(id)?;
        let mut updated = update(self.use_cases[index].clone())?;
        updated.updated_at = Utc::now();

        let mut use_cases = self.use_cases.clone();
        use_cases[index] = updated;
        self.use_cases = use_cases;
        Ok(())
    }

    fn update_member<F>(&mut self, id: &str, update: F) -> Result<()>
    where
        F: FnOnce(UseCase) -> Result<UseCase>,
    {
        if !self.use_case(id)?.in_roadmap {
            return Err(PrioritizerError::NotInRoadmap(id.to_string()));
        }
        self.update_use_case(id, update)
    }
}

impl Default for Workspace {
    fn default() -> Self {
        Self::new(ParameterRegistry::default(), Vec::new(), Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::challenge::ChallengeScores;
    use crate::types::roadmap::ViewMode;
    use crate::types::scoring::{PreferredDirection, ScoreLevel};
    use crate::types::use_case::LegacyLevel;

    fn level(value: u8) -> ScoreLevel {
        ScoreLevel::new(value).expect("test level should be in range")
    }

    fn scores(pairs: &[(&str, u8)]) -> ScoreMap {
        pairs
            .iter()
            .map(|(id, value)| ((*id).to_string(), level(*value)))
            .collect()
    }

    fn add(workspace: &mut Workspace, title: &str, pairs: &[(&str, u8)]) -> String {
        workspace
            .add_use_case(UseCaseDraft {
                title: title.to_string(),
                scores: Some(scores(pairs)),
                ..UseCaseDraft::default()
            })
            .expect("use case should be added")
    }

    fn seeded(count: u8) -> (Workspace, Vec<String>) {
        let mut workspace = Workspace::default();
        let ids = (0..count)
            .map(|i| add(&mut workspace, &format!("case {i}"), &[("impact", (i % 5) + 1)]))
            .collect();
        (workspace, ids)
    }

    #[test]
    fn new_use_case_is_completed_and_scored() {
        let mut workspace = Workspace::default();
        let id = add(&mut workspace, "Churn", &[("impact", 5)]);
        let use_case = workspace.use_case(&id).expect("use case should exist");
        assert_eq!(use_case.scores.len(), workspace.parameters().len());
        assert_eq!(
            use_case.score,
            aggregate(&use_case.scores, workspace.parameters())
        );
    }

    #[test]
    fn unknown_score_key_on_create_is_rejected() {
        let mut workspace = Workspace::default();
        let result = workspace.add_use_case(UseCaseDraft {
            title: "Typo".to_string(),
            scores: Some(scores(&[("impcat", 5)])),
            ..UseCaseDraft::default()
        });
        assert!(matches!(
            result,
            Err(PrioritizerError::ParameterNotFound(ref id)) if id == "impcat"
        ));
        assert!(workspace.use_cases().is_empty());
    }

    #[test]
    fn blank_title_is_rejected() {
        let mut workspace = Workspace::default();
        let result = workspace.add_use_case(UseCaseDraft::default());
        assert!(matches!(result, Err(PrioritizerError::EmptyTitle)));
        assert!(workspace.use_cases().is_empty());
    }

    #[test]
    fn adding_parameter_extends_every_score_map() {
        let (mut workspace, ids) = seeded(3);
        let new_id = workspace
            .add_parameter(NewParameter {
                name: "Reach".to_string(),
                default_value: level(4),
                ..NewParameter::default()
            })
            .expect("parameter should be added");
        for id in &ids {
            let use_case = workspace.use_case(id).expect("use case should exist");
            assert_eq!(use_case.scores.get(&new_id), Some(&level(4)));
            assert_eq!(
                use_case.score,
                aggregate(&use_case.scores, workspace.parameters())
            );
        }
    }

    #[test]
    fn flipping_direction_rescores_everything() {
        let mut workspace = Workspace::default();
        let id = add(&mut workspace, "Risky", &[("ethicalConsiderations", 1)]);
        let before = workspace.use_case(&id).expect("use case should exist").score;

        workspace
            .edit_parameter(
                "ethicalConsiderations",
                ParameterEdit {
                    preferred_direction: Some(PreferredDirection::High),
                    ..ParameterEdit::default()
                },
            )
            .expect("edit should succeed");
        let after = workspace.use_case(&id).expect("use case should exist").score;
        assert!(after < before);
    }

    #[test]
    fn removing_parameter_keeps_orphaned_scores() {
        let (mut workspace, ids) = seeded(1);
        workspace
            .remove_parameter("impact")
            .expect("removal should succeed");
        let use_case = workspace.use_case(&ids[0]).expect("use case should exist");
        assert!(use_case.scores.contains_key("impact"));
        assert_eq!(
            use_case.score,
            aggregate(&use_case.scores, workspace.parameters())
        );
    }

    #[test]
    fn set_scores_rejects_unknown_parameter_without_change() {
        let (mut workspace, ids) = seeded(1);
        let before = workspace.use_cases().to_vec();
        let result = workspace.set_scores(&ids[0], scores(&[("nope", 5)]));
        assert!(matches!(result, Err(PrioritizerError::ParameterNotFound(_))));
        assert_eq!(workspace.use_cases(), before.as_slice());
    }

    #[test]
    fn ensure_roadmap_selects_top_five_and_pins_phases() {
        let (mut workspace, _) = seeded(7);
        assert!(workspace.ensure_roadmap());
        let members = workspace
            .use_cases()
            .iter()
            .filter(|use_case| use_case.in_roadmap)
            .collect::<Vec<_>>();
        assert_eq!(members.len(), 5);
        assert!(members
            .iter()
            .all(|use_case| matches!(use_case.placement, Placement::AutoAssigned(_))));
        assert!(!workspace.ensure_roadmap());
    }

    #[test]
    fn move_to_phase_requires_active_view() {
        let (mut workspace, ids) = seeded(2);
        workspace.ensure_roadmap();
        let result = workspace.move_to_phase(&ids[0], RoadmapPhase::Q2);
        assert!(matches!(result, Err(PrioritizerError::PhaseNotInView { .. })));

        workspace
            .move_to_phase(&ids[0], RoadmapPhase::LongTerm)
            .expect("move should succeed");
        assert_eq!(
            workspace.use_case(&ids[0]).expect("use case should exist").placement,
            Placement::ManuallyPlaced(RoadmapPhase::LongTerm)
        );
    }

    #[test]
    fn quarterly_view_accepts_quarters() {
        let (workspace, ids) = seeded(2);
        let mut workspace = workspace.with_settings(RoadmapSettings {
            view: ViewMode::Quarterly,
            ..RoadmapSettings::default()
        });
        workspace.ensure_roadmap();
        workspace
            .move_to_phase(&ids[1], RoadmapPhase::Q4)
            .expect("move should succeed");
        let roadmap = workspace.roadmap();
        assert_eq!(roadmap.phase_items(RoadmapPhase::Q4).count(), 1);
    }

    #[test]
    fn removing_from_roadmap_resets_placement() {
        let (mut workspace, ids) = seeded(1);
        workspace.ensure_roadmap();
        workspace
            .remove_from_roadmap(&ids[0])
            .expect("removal should succeed");
        let use_case = workspace.use_case(&ids[0]).expect("use case should exist");
        assert!(!use_case.in_roadmap);
        assert_eq!(use_case.placement, Placement::Unplaced);
        assert_eq!(use_case.roadmap_order, None);

        assert!(matches!(
            workspace.remove_from_roadmap(&ids[0]),
            Err(PrioritizerError::NotInRoadmap(_))
        ));
    }

    #[test]
    fn reorder_rewrites_orders_within_phase() {
        let (mut workspace, ids) = seeded(3);
        workspace.ensure_roadmap();
        for id in &ids {
            workspace
                .move_to_phase(id, RoadmapPhase::MidTerm)
                .expect("move should succeed");
        }

        workspace
            .reorder_phase(RoadmapPhase::MidTerm, &[ids[2].clone(), ids[0].clone()])
            .expect("reorder should succeed");
        let ordered = workspace
            .roadmap()
            .phase_items(RoadmapPhase::MidTerm)
            .map(|item| (item.id.clone(), item.order))
            .collect::<Vec<_>>();
        assert_eq!(
            ordered,
            vec![
                (ids[2].clone(), Some(0)),
                (ids[0].clone(), Some(1)),
                (ids[1].clone(), Some(2)),
            ]
        );
    }

    #[test]
    fn reorder_rejects_items_from_other_phase() {
        let (mut workspace, ids) = seeded(2);
        workspace.ensure_roadmap();
        workspace
            .move_to_phase(&ids[0], RoadmapPhase::ShortTerm)
            .expect("move should succeed");
        workspace
            .move_to_phase(&ids[1], RoadmapPhase::LongTerm)
            .expect("move should succeed");
        let result = workspace.reorder_phase(RoadmapPhase::ShortTerm, &[ids[1].clone()]);
        assert!(matches!(result, Err(PrioritizerError::NotInPhase { .. })));
    }

    #[test]
    fn estimates_flow_into_roadmap_totals() {
        let (mut workspace, ids) = seeded(2);
        workspace.ensure_roadmap();
        workspace.set_weeks(&ids[0], 10.0).expect("weeks should set");
        workspace
            .set_roles(
                &ids[1],
                vec![
                    RoleAllocation::new("Data Scientist", 0.5),
                    RoleAllocation::new("Data Engineer", 1.0),
                ],
            )
            .expect("roles should set");

        let roadmap = workspace.roadmap();
        assert_eq!(roadmap.totals.total_weeks, 14.0);
        assert_eq!(roadmap.totals.total_fte, 2.5);
        assert_eq!(roadmap.fte_by_role["Data Engineer"], 1.0);

        assert!(matches!(
            workspace.set_fte(&ids[1], 3.0),
            Err(PrioritizerError::FteLockedByRoles(_))
        ));
        assert!(matches!(
            workspace.set_weeks(&ids[0], 0.0),
            Err(PrioritizerError::InvalidEstimate(_))
        ));
    }

    #[test]
    fn challenges_select_and_promote() {
        let mut workspace = Workspace::default();
        let strong = workspace
            .add_challenge(ChallengeDraft {
                title: "Manual invoice matching".to_string(),
                impact: Some(LegacyLevel::High),
                scores: Some(ChallengeScores {
                    impact: level(4),
                    feasibility: level(3),
                    priority: level(5),
                }),
                ..ChallengeDraft::default()
            })
            .expect("challenge should be added");
        workspace
            .add_challenge(ChallengeDraft {
                title: "Unscored".to_string(),
                ..ChallengeDraft::default()
            })
            .expect("challenge should be added");

        let selected = workspace.auto_select_challenges(&SelectionThresholds::default());
        assert_eq!(selected, vec![strong.clone()]);
        assert!(workspace.challenges()[0].selected);
        assert!(!workspace.challenges()[1].selected);

        let promoted = workspace
            .promote_challenge(&strong)
            .expect("promotion should succeed");
        let use_case = workspace.use_case(&promoted).expect("use case should exist");
        assert_eq!(use_case.title, "Manual invoice matching");
        assert_eq!(use_case.status, Status::Backlog);
        assert_eq!(use_case.scores.get("impact"), Some(&level(5)));
    }
}
