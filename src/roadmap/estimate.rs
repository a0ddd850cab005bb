use crate::types::config::RoadmapSettings;
use crate::types::use_case::UseCase;
use regex::Regex;
use std::sync::OnceLock;

fn integer_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"[0-9]+").expect("integer pattern is valid"))
}

/// First run of ASCII digits in free text, e.g. "3-6 months" -> 3.
/// Runs too long for a `u64` saturate.
pub fn first_integer(text: &str) -> Option<u64> {
    integer_pattern()
        .find(text)
        .map(|found| found.as_str().parse::<u64>().unwrap_or(u64::MAX))
}

/// Explicit weeks, else months parsed from the free-text estimate.
pub fn resolve_weeks(use_case: &UseCase, settings: &RoadmapSettings) -> f64 {
    use_case.estimated_time_in_weeks.unwrap_or_else(|| {
        first_integer(&use_case.estimated_time)
            .map(|months| months as f64 * settings.weeks_per_month)
            .unwrap_or(settings.fallback_weeks)
    })
}

/// Explicit FTE, else a head count parsed from the free-text resources.
pub fn resolve_fte(use_case: &UseCase, settings: &RoadmapSettings) -> f64 {
    use_case.estimated_fte.unwrap_or_else(|| {
        first_integer(&use_case.estimated_resources)
            .map(|count| count as f64)
            .unwrap_or(settings.fallback_fte)
    })
}
