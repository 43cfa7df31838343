use serde::{Deserialize, Serialize};

use crate::domain::{BudgetSummary, Category, Cents, Entry};

/// Full view of the session: summary plus both categories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BudgetReport {
    pub summary: BudgetSummary,
    pub income: CategoryReport,
    pub expense: CategoryReport,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryReport {
    pub category: Category,
    pub total: Cents,
    pub count: usize,
    pub entries: Vec<Entry>,
}

impl CategoryReport {
    pub fn new(category: Category, total: Cents, entries: &[Entry]) -> Self {
        Self {
            category,
            total,
            count: entries.len(),
            entries: entries.to_vec(),
        }
    }
}

impl BudgetReport {
    pub fn category(&self, category: Category) -> &CategoryReport {
        match category {
            Category::Income => &self.income,
            Category::Expense => &self.expense,
        }
    }

    pub fn entry_count(&self) -> usize {
        self.income.count + self.expense.count
    }
}
