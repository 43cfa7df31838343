use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Category, Cents};

pub type EntryId = u64;

/// One income or expense line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    /// Unique within its category, never reused
    pub id: EntryId,
    pub description: String,
    /// Amount in cents, already rounded to 2 decimals
    pub amount_cents: Cents,
    pub category: Category,
    /// Rounded share of the category total, 0 until percentages are computed
    pub share_percent: u8,
    /// When the entry was added to the ledger
    pub recorded_at: DateTime<Utc>,
}

impl Entry {
    /// Create a new entry. The id must be assigned by the ledger.
    pub fn new(
        id: EntryId,
        category: Category,
        description: impl Into<String>,
        amount_cents: Cents,
    ) -> Self {
        Self {
            id,
            description: description.into(),
            amount_cents,
            category,
            share_percent: 0,
            recorded_at: Utc::now(),
        }
    }

    pub fn with_recorded_at(mut self, recorded_at: DateTime<Utc>) -> Self {
        self.recorded_at = recorded_at;
        self
    }

    /// Stable identifier across both categories, e.g. "exp-3".
    pub fn key(&self) -> String {
        format!("{}-{}", self.category.as_str(), self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_entry_has_zero_share() {
        let entry = Entry::new(0, Category::Expense, "Rent", 90000);
        assert_eq!(entry.share_percent, 0);
        assert_eq!(entry.description, "Rent");
    }

    #[test]
    fn test_key() {
        let entry = Entry::new(7, Category::Income, "Gift", 1000);
        assert_eq!(entry.key(), "inc-7");
    }
}
