use serde::{Deserialize, Serialize};

use super::{Category, Cents, Entry, EntryId, percent_of};

/// Aggregate view of the ledger: net budget, per-category totals and the
/// share of income spent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetSummary {
    /// total_income - total_expense, may be negative
    pub budget: Cents,
    pub total_income: Cents,
    pub total_expense: Cents,
    /// Rounded percentage of expense over income
    pub ratio: u8,
}

/// Entries of a single category, with their stored total.
#[derive(Debug, Clone, Default)]
struct CategoryBook {
    entries: Vec<Entry>,
    total: Cents,
}

/// In-memory budget ledger holding incomes and expenses.
///
/// Totals, the net budget and percentages are derived values: they are only
/// refreshed by `calculate_totals`, `calculate_budget` and
/// `calculate_percentages`, which callers run after every mutation.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    income: CategoryBook,
    expense: CategoryBook,
    budget: Cents,
    ratio: u8,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    fn book(&self, category: Category) -> &CategoryBook {
        match category {
            Category::Income => &self.income,
            Category::Expense => &self.expense,
        }
    }

    fn book_mut(&mut self, category: Category) -> &mut CategoryBook {
        match category {
            Category::Income => &mut self.income,
            Category::Expense => &mut self.expense,
        }
    }

    /// Append a new entry to `category` and return it.
    ///
    /// The id is the last entry's id + 1, or 0 for an empty category. Ids grow
    /// in insertion order, so the last entry always holds the highest id.
    ///
    /// No validation happens here: callers are expected to pass a non-empty
    /// description and a positive amount already rounded to cents.
    pub fn add_item(
        &mut self,
        category: Category,
        description: impl Into<String>,
        amount_cents: Cents,
    ) -> Entry {
        let book = self.book_mut(category);
        let id = book.entries.last().map_or(0, |e| e.id + 1);

        let entry = Entry::new(id, category, description, amount_cents);
        book.entries.push(entry.clone());
        entry
    }

    /// Recompute the stored total of `category` from its entries.
    pub fn calculate_totals(&mut self, category: Category) -> Cents {
        let book = self.book_mut(category);
        book.total = book.entries.iter().map(|e| e.amount_cents).sum();
        book.total
    }

    /// Refresh the total of `category`, then the net budget and the ratio.
    ///
    /// The ratio is only updated while income exceeds expense; otherwise the
    /// previous value is kept.
    pub fn calculate_budget(&mut self, category: Category) {
        self.calculate_totals(category);

        let total_income = self.income.total;
        let total_expense = self.expense.total;
        self.budget = total_income - total_expense;

        if total_income > total_expense {
            self.ratio = percent_of(total_expense, total_income).unwrap_or(self.ratio);
        }
    }

    /// Recompute every entry's share of the stored `category` total.
    ///
    /// Returns the shares in entry order. A share is `None` when the total is
    /// zero; the entry then stores 0.
    pub fn calculate_percentages(&mut self, category: Category) -> Vec<Option<u8>> {
        let book = self.book_mut(category);
        let total = book.total;

        book.entries
            .iter_mut()
            .map(|entry| {
                let share = percent_of(entry.amount_cents, total);
                entry.share_percent = share.unwrap_or(0);
                share
            })
            .collect()
    }

    /// Remove the entry with `id` from `category`, returning what remains.
    /// Unknown ids leave the category untouched.
    pub fn delete_item(&mut self, category: Category, id: EntryId) -> &[Entry] {
        let entries = &mut self.book_mut(category).entries;
        if let Some(index) = entries.iter().position(|e| e.id == id) {
            entries.remove(index);
        }
        entries
    }

    pub fn get_items(&self, category: Category) -> &[Entry] {
        &self.book(category).entries
    }

    pub fn find_item(&self, category: Category, id: EntryId) -> Option<&Entry> {
        self.book(category).entries.iter().find(|e| e.id == id)
    }

    pub fn get_budget(&self) -> BudgetSummary {
        BudgetSummary {
            budget: self.budget,
            total_income: self.income.total,
            total_expense: self.expense.total,
            ratio: self.ratio,
        }
    }

    /// Stored total for a single category, as of the last recomputation.
    pub fn total(&self, category: Category) -> Cents {
        self.book(category).total
    }
}
