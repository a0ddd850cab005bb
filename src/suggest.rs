use crate::types::use_case::UseCase;

const TEAM_MATCH: u32 = 10;
const TECH_MATCH: u32 = 8;
const KEYWORD_MATCH: u32 = 5;
const MAX_SUGGESTIONS: usize = 3;
const MIN_KEYWORD_LEN: usize = 4;
const STOP_WORDS: [&str; 7] = ["with", "that", "this", "from", "have", "based", "using"];

#[derive(Debug, Clone, Default)]
pub struct Draft {
    pub title: String,
    pub description: String,
    pub team: Vec<String>,
    pub technologies: Vec<String>,
}

impl Draft {
    fn is_empty(&self) -> bool {
        self.title.trim().is_empty()
            && self.description.trim().is_empty()
            && self.team.is_empty()
            && self.technologies.is_empty()
    }

    fn keywords(&self) -> Vec<String> {
        self.title
            .split_whitespace()
            .chain(self.description.split_whitespace())
            .map(str::to_lowercase)
            .filter(|word| word.chars().count() >= MIN_KEYWORD_LEN)
            .filter(|word| !STOP_WORDS.contains(&word.as_str()))
            .collect()
    }
}

pub fn similarity(draft: &Draft, keywords: &[String], use_case: &UseCase) -> u32 {
    let team_overlap = draft
        .team
        .iter()
        .filter(|team| use_case.team.contains(team))
        .count() as u32;
    let tech_overlap = draft
        .technologies
        .iter()
        .filter(|tech| use_case.technologies.contains(tech))
        .count() as u32;
    let text = format!("{} {}", use_case.title, use_case.description).to_lowercase();
    let keyword_hits = keywords
        .iter()
        .filter(|keyword| text.contains(keyword.as_str()))
        .count() as u32;

    team_overlap * TEAM_MATCH + tech_overlap * TECH_MATCH + keyword_hits * KEYWORD_MATCH
}

/// Up to three existing use cases that resemble `draft`, most similar first.
pub fn similar<'a>(draft: &Draft, use_cases: &'a [UseCase]) -> Vec<(&'a UseCase, u32)> {
    if draft.is_empty() {
        return Vec::new();
    }

    let keywords = draft.keywords();
    let mut scored = use_cases
        .iter()
        .map(|use_case| (use_case, similarity(draft, &keywords, use_case)))
        .filter(|(_, score)| *score > 0)
        .collect::<Vec<_>>();
    scored.sort_by(|a, b| b.1.cmp(&a.1));
    scored.truncate(MAX_SUGGESTIONS);
    scored
}
