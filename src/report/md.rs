use crate::roadmap::Roadmap;
use crate::types::report::RankingReport;
use crate::types::scoring::{Highlight, PreferredDirection};

/// Escapes pipes so free text stays inside one table cell.
fn table_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

pub fn ranking_markdown(report: &RankingReport) -> String {
    let mut output = String::new();
    output.push_str("# Use-Case Ranking\n\n");

    output.push_str("## Parameters\n\n");
    for parameter in &report.parameters {
        let direction = match parameter.preferred_direction {
            PreferredDirection::High => "higher is better",
            PreferredDirection::Low => "lower is better",
            PreferredDirection::Neutral => "neutral",
        };
        output.push_str(&format!(
            "- {} (`{}`): weight {:.2}, {}\n",
            parameter.name, parameter.id, parameter.weight, direction
        ));
    }
    output.push('\n');

    output.push_str("## Ranking\n\n");
    if report.entries.is_empty() {
        output.push_str("- none\n");
        return output;
    }

    output.push_str("| # | Use case | Status | Score |");
    for parameter in &report.parameters {
        output.push_str(&format!(" {} |", table_cell(&parameter.name)));
    }
    output.push_str("\n|---|---|---|---|");
    for _ in &report.parameters {
        output.push_str("---|");
    }
    output.push('\n');

    for entry in &report.entries {
        let title = table_cell(&entry.title);
        let title = if entry.in_roadmap {
            format!("{title} *")
        } else {
            title
        };
        output.push_str(&format!(
            "| {} | {} | {} | {:.1} |",
            entry.rank,
            title,
            entry.status.as_str(),
            entry.score
        ));
        for cell in &entry.scores {
            let marker = match cell.highlight {
                Some(Highlight::High) => " +",
                Some(Highlight::Low) => " -",
                None => "",
            };
            output.push_str(&format!(" {}{} |", cell.value, marker));
        }
        output.push('\n');
    }
    output.push_str("\n`+` favorable, `-` unfavorable, `*` on the roadmap\n");

    output
}

pub fn roadmap_markdown(roadmap: &Roadmap) -> String {
    let mut output = String::new();
    output.push_str(&format!("# Roadmap ({} view)\n\n", roadmap.view.as_str()));

    for phase in roadmap.phases() {
        output.push_str(&format!("## {}\n\n", phase.label()));
        let mut empty = true;
        for item in roadmap.phase_items(phase) {
            empty = false;
            output.push_str(&format!(
                "- {} (`{}`): score {:.1}, {} weeks, {} FTE{}\n",
                item.title,
                item.id,
                item.score,
                item.weeks,
                item.fte,
                if item.manual { ", placed manually" } else { "" }
            ));
            for allocation in &item.role_allocations {
                output.push_str(&format!("  - {}: {} FTE\n", allocation.role, allocation.fte));
            }
        }
        if empty {
            output.push_str("- none\n");
        }
        output.push('\n');
    }

    output.push_str("## Resources\n\n");
    output.push_str(&format!(
        "- total weeks: {}\n- total FTE: {}\n",
        roadmap.totals.total_weeks, roadmap.totals.total_fte
    ));
    if !roadmap.fte_by_role.is_empty() {
        output.push_str("\n### FTE by role\n\n");
        for (role, fte) in &roadmap.fte_by_role {
            output.push_str(&format!("- {role}: {fte}\n"));
        }
    }

    output
}
