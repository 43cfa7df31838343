use serde::Serialize;

use crate::domain::{
    BudgetSummary, Category, Cents, Entry, EntryId, Ledger, format_cents_grouped, parse_cents,
};

use super::{AppError, BudgetReport, CategoryReport};

/// Application service owning the session ledger.
/// This is the primary interface for any presentation (CLI session, tests, etc.).
#[derive(Debug, Default)]
pub struct BudgetService {
    ledger: Ledger,
}

/// Largest amount a single entry may carry: 100 billion in cents.
/// Keeps category totals and the net budget far from `Cents` overflow.
pub const MAX_AMOUNT_CENTS: Cents = 10_000_000_000_000;

/// A validated request to add an entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    pub category: Category,
    pub description: String,
    pub amount_cents: Cents,
}

/// Result of adding an entry
#[derive(Debug, Clone, Serialize)]
pub struct ItemAdded {
    pub entry: Entry,
    pub summary: BudgetSummary,
    /// Recomputed shares of the entry's category, in entry order
    pub percentages: Vec<Option<u8>>,
}

/// Result of deleting an entry
#[derive(Debug, Clone, Serialize)]
pub struct ItemDeleted {
    pub category: Category,
    pub id: EntryId,
    /// `None` when no entry had the requested id
    pub removed: Option<Entry>,
    pub summary: BudgetSummary,
    pub percentages: Vec<Option<u8>>,
}

impl NewItem {
    /// Validate an already-typed request.
    pub fn new(
        category: Category,
        description: impl Into<String>,
        amount_cents: Cents,
    ) -> Result<Self, AppError> {
        let description = description.into().trim().to_string();
        if description.is_empty() {
            return Err(AppError::EmptyDescription);
        }
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }
        if amount_cents > MAX_AMOUNT_CENTS {
            return Err(AppError::InvalidAmount(format!(
                "Amount must not exceed {}",
                format_cents_grouped(MAX_AMOUNT_CENTS)
            )));
        }

        Ok(Self {
            category,
            description,
            amount_cents,
        })
    }

    /// Validate raw user input: category tag, description and decimal amount.
    pub fn parse(category: &str, description: &str, amount: &str) -> Result<Self, AppError> {
        let category: Category = category
            .parse()
            .map_err(|_| AppError::UnknownCategory(category.to_string()))?;
        let amount_cents = parse_cents(amount)
            .map_err(|e| AppError::InvalidAmount(format!("'{}': {}", amount, e)))?;

        Self::new(category, description, amount_cents)
    }
}

impl BudgetService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing ledger.
    pub fn with_ledger(ledger: Ledger) -> Self {
        Self { ledger }
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    // ========================
    // Mutations
    // ========================

    /// Add an entry, then refresh the budget and the category's percentages.
    pub fn add_item(&mut self, item: NewItem) -> ItemAdded {
        let category = item.category;
        let entry = self
            .ledger
            .add_item(category, item.description, item.amount_cents);
        tracing::debug!(
            key = %entry.key(),
            amount_cents = entry.amount_cents,
            "added entry"
        );

        let (summary, percentages) = self.refresh(category);
        // The returned entry carries its freshly computed share.
        let entry = self
            .ledger
            .find_item(category, entry.id)
            .cloned()
            .unwrap_or(entry);

        ItemAdded {
            entry,
            summary,
            percentages,
        }
    }

    /// Delete an entry, then refresh the budget and the category's percentages.
    /// Deleting an unknown id is not an error.
    pub fn delete_item(&mut self, category: Category, id: EntryId) -> ItemDeleted {
        let removed = self.ledger.find_item(category, id).cloned();
        self.ledger.delete_item(category, id);
        match &removed {
            Some(entry) => tracing::debug!(key = %entry.key(), "deleted entry"),
            None => tracing::debug!(category = %category, id, "no entry to delete"),
        }

        let (summary, percentages) = self.refresh(category);
        ItemDeleted {
            category,
            id,
            removed,
            summary,
            percentages,
        }
    }

    fn refresh(&mut self, category: Category) -> (BudgetSummary, Vec<Option<u8>>) {
        self.ledger.calculate_budget(category);
        let summary = self.ledger.get_budget();
        let percentages = self.ledger.calculate_percentages(category);
        tracing::debug!(
            budget = summary.budget,
            total_income = summary.total_income,
            total_expense = summary.total_expense,
            ratio = summary.ratio,
            "recomputed budget"
        );
        (summary, percentages)
    }

    // ========================
    // Queries
    // ========================

    pub fn items(&self, category: Category) -> &[Entry] {
        self.ledger.get_items(category)
    }

    pub fn summary(&self) -> BudgetSummary {
        self.ledger.get_budget()
    }

    pub fn report(&self) -> BudgetReport {
        let category_report = |category| {
            CategoryReport::new(
                category,
                self.ledger.total(category),
                self.ledger.get_items(category),
            )
        };

        BudgetReport {
            summary: self.summary(),
            income: category_report(Category::Income),
            expense: category_report(Category::Expense),
        }
    }
}
