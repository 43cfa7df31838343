use crate::domain::{BudgetSummary, Cents, Entry, format_cents_grouped};

/// Percentage cell; undefined shares are shown as dashes.
pub fn percent_cell(share: Option<u8>) -> String {
    match share {
        Some(percent) => format!("{}%", percent),
        None => "---".to_string(),
    }
}

fn signed_budget(budget: Cents) -> String {
    if budget > 0 {
        format!("+{}", format_cents_grouped(budget))
    } else {
        format_cents_grouped(budget)
    }
}

pub fn summary_line(summary: &BudgetSummary) -> String {
    format!(
        "Budget {} | Income {} | Expenses {} ({}%)",
        signed_budget(summary.budget),
        format_cents_grouped(summary.total_income),
        format_cents_grouped(summary.total_expense),
        summary.ratio
    )
}

pub fn entry_line(entry: &Entry, share: Option<u8>) -> String {
    format!(
        "{:<8} {:<28} {} {:>12} {:>5}",
        entry.key(),
        entry.description,
        entry.category.sign(),
        format_cents_grouped(entry.amount_cents),
        percent_cell(share)
    )
}

/// Lines for a category listing, pairing entries with their shares.
pub fn entry_lines(entries: &[Entry], shares: &[Option<u8>]) -> Vec<String> {
    entries
        .iter()
        .zip(shares)
        .map(|(entry, share)| entry_line(entry, *share))
        .collect()
}
