use crate::roadmap::phase::compare_priority;
use crate::types::use_case::{Status, UseCase};
use std::cmp::Ordering;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Score,
    Title,
    Created,
    Parameter(String),
}

impl SortKey {
    /// Parses `score`, `title`, `created` or `param:<id>`.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "score" => Some(Self::Score),
            "title" => Some(Self::Title),
            "created" => Some(Self::Created),
            other => other
                .strip_prefix("param:")
                .filter(|id| !id.is_empty())
                .map(|id| Self::Parameter(id.to_string())),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct UseCaseQuery {
    pub status: Option<Status>,
    pub project_id: Option<String>,
    pub team_id: Option<String>,
    pub search: Option<String>,
    pub sort: SortKey,
    pub ascending: bool,
}

impl UseCaseQuery {
    pub fn matches(&self, use_case: &UseCase) -> bool {
        if self.status.is_some_and(|status| use_case.status != status) {
            return false;
        }
        if let Some(project) = &self.project_id {
            if use_case.project_id.as_ref() != Some(project) {
                return false;
            }
        }
        if let Some(team) = &self.team_id {
            if use_case.team_id.as_ref() != Some(team) {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => matches_search(use_case, &needle.to_lowercase()),
            _ => true,
        }
    }

    pub fn run<'a>(&self, use_cases: &'a [UseCase]) -> Vec<&'a UseCase> {
        let mut found = use_cases
            .iter()
            .filter(|use_case| self.matches(use_case))
            .collect::<Vec<_>>();
        found.sort_by(|a, b| self.compare(a, b));
        found
    }

    fn compare(&self, a: &UseCase, b: &UseCase) -> Ordering {
        let ascending = match &self.sort {
            SortKey::Score => compare_priority(b, a),
            SortKey::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
            SortKey::Created => a.created_at.cmp(&b.created_at),
            SortKey::Parameter(id) => {
                let left = a.scores.get(id).map_or(0, |level| level.get());
                let right = b.scores.get(id).map_or(0, |level| level.get());
                left.cmp(&right)
            }
        };
        if self.ascending {
            ascending
        } else {
            ascending.reverse()
        }
    }
}

fn matches_search(use_case: &UseCase, needle: &str) -> bool {
    let contains = |text: &str| text.to_lowercase().contains(needle);
    contains(&use_case.title)
        || contains(&use_case.description)
        || contains(&use_case.business_objective)
        || contains(use_case.status.as_str())
        || use_case.team.iter().any(|team| contains(team))
        || use_case.technologies.iter().any(|tech| contains(tech))
}
