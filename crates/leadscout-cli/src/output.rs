use std::fmt::Write as _;

use leadscout_core::ScoredCandidate;

const COMPANY_WIDTH: usize = 30;
const CONTACT_WIDTH: usize = 28;

pub(crate) fn render_json(candidates: &[ScoredCandidate]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(candidates)
}

/// Fixed-width table, one candidate per line, in the order given.
pub(crate) fn render_table(candidates: &[ScoredCandidate]) -> String {
    let mut out = format!(
        "{:<7}{:<32}{:<30}{:<10}{:<10}LINK\n",
        "SCORE", "COMPANY", "CONTACT", "SOURCE", "EMPLOYEES"
    );
    for c in candidates {
        let employees = c
            .employee_count
            .map_or_else(|| "\u{2014}".to_string(), |n| n.to_string());
        // Writing to a String cannot fail.
        let _ = writeln!(
            out,
            "{:<7.2}{:<32}{:<30}{:<10}{:<10}{}",
            c.confidence_score,
            truncate(&c.company_name, COMPANY_WIDTH),
            truncate(c.contact_info.as_deref().unwrap_or("\u{2014}"), CONTACT_WIDTH),
            c.source,
            employees,
            c.source_link,
        );
    }
    out
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        format!("{}...", text.chars().take(max - 3).collect::<String>())
    } else {
        text.to_string()
    }
}
