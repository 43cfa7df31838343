// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use budgety::application::{BudgetService, ItemAdded, NewItem};
use budgety::cli::{OutputFormat, Session};
use budgety::domain::{Category, Entry, EntryId};

/// Helper to add an entry from raw input, the way a presentation would
pub fn add(
    service: &mut BudgetService,
    category: &str,
    description: &str,
    amount: &str,
) -> Result<ItemAdded> {
    let item = NewItem::parse(category, description, amount)?;
    Ok(service.add_item(item))
}

/// Ids of a category, in entry order
pub fn ids(entries: &[Entry]) -> Vec<EntryId> {
    entries.iter().map(|e| e.id).collect()
}

/// Test fixture: a typical month of entries
pub struct StandardMonth;

impl StandardMonth {
    /// Salary 3,000 + freelance 1,000 against rent 1,200, groceries 400, utilities 200
    pub fn create(service: &mut BudgetService) -> Result<()> {
        add(service, "inc", "Salary", "3000")?;
        add(service, "inc", "Freelance", "1000")?;
        add(service, "exp", "Rent", "1200")?;
        add(service, "exp", "Groceries", "400")?;
        add(service, "exp", "Utilities", "200")?;
        Ok(())
    }

    pub fn expense_ids() -> Vec<EntryId> {
        vec![0, 1, 2]
    }

    pub fn category_len(service: &BudgetService, category: Category) -> usize {
        service.items(category).len()
    }
}

/// Run a session script in table format and return everything it printed
pub fn run_script(script: &str) -> Result<String> {
    run_script_as(script, OutputFormat::Table)
}

pub fn run_script_as(script: &str, format: OutputFormat) -> Result<String> {
    let mut session = Session::new(Vec::new(), format);
    session.run(script.as_bytes(), false)?;
    Ok(String::from_utf8(session.into_output())?)
}
