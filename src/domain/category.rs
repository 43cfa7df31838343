use serde::{Deserialize, Serialize};

/// Which side of the budget an entry belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// Money coming in (salary, gifts, refunds)
    Income,
    /// Money going out (rent, groceries, bills)
    Expense,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Income, Category::Expense];

    /// Short tag used on the command line and in element ids.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Income => "inc",
            Category::Expense => "exp",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Income => "income",
            Category::Expense => "expense",
        }
    }

    /// Sign shown in front of amounts of this category.
    pub fn sign(&self) -> char {
        match self {
            Category::Income => '+',
            Category::Expense => '-',
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for Category {
    type Err = ParseCategoryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "inc" | "income" => Ok(Category::Income),
            "exp" | "expense" => Ok(Category::Expense),
            _ => Err(ParseCategoryError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCategoryError(pub String);

impl std::fmt::Display for ParseCategoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "unknown category '{}' (expected inc, income, exp or expense)",
            self.0
        )
    }
}

impl std::error::Error for ParseCategoryError {}
