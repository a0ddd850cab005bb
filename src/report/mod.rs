pub mod json;
pub mod md;

use crate::error::PrioritizerError;
use crate::roadmap::Roadmap;
use crate::types::report::RankingReport;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Json,
    Md,
}

pub fn render_ranking(
    report: &RankingReport,
    format: OutputFormat,
) -> Result<String, PrioritizerError> {
    match format {
        OutputFormat::Json => json::to_json(report).map_err(PrioritizerError::Json),
        OutputFormat::Md => Ok(md::ranking_markdown(report)),
    }
}

pub fn render_roadmap(roadmap: &Roadmap, format: OutputFormat) -> Result<String, PrioritizerError> {
    match format {
        OutputFormat::Json => json::to_json(roadmap).map_err(PrioritizerError::Json),
        OutputFormat::Md => Ok(md::roadmap_markdown(roadmap)),
    }
}
