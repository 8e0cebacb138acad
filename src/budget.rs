//! The per-category budget table used when summarising spending.

use std::collections::HashMap;

use crate::{Error, category::Category};

/// The budget ceilings used when no overrides are given.
pub const DEFAULT_CATEGORY_BUDGETS: [(Category, f64); 5] = [
    (Category::Food, 5000.0),
    (Category::Rent, 15000.0),
    (Category::Entertainment, 3000.0),
    (Category::Transport, 2000.0),
    (Category::Utilities, 2500.0),
];

/// A mapping from category to its monthly budget ceiling.
///
/// A budget of zero, or a category missing from the table, means that no
/// ceiling has been configured for that category.
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetTable {
    budgets: HashMap<Category, f64>,
}

impl BudgetTable {
    /// Create a budget table from `(category, budget)` pairs.
    ///
    /// Later pairs replace earlier ones for the same category.
    pub fn new(budgets: impl IntoIterator<Item = (Category, f64)>) -> Self {
        Self {
            budgets: budgets.into_iter().collect(),
        }
    }

    /// The budget for `category`, or zero if none is configured.
    pub fn budget_for(&self, category: Category) -> f64 {
        self.budgets.get(&category).copied().unwrap_or(0.0)
    }

    /// Replace the budgets in this table with `overrides`.
    ///
    /// Each override has the form `CATEGORY=AMOUNT`, e.g. `Food=6000`.
    ///
    /// # Errors
    /// Returns [Error::InvalidBudget] if an override is malformed or the amount
    /// is negative or not finite, or [Error::InvalidCategory] if the category
    /// name is not recognised.
    pub fn with_overrides(mut self, overrides: &[String]) -> Result<Self, Error> {
        for raw_override in overrides {
            let (category, budget) = parse_budget_override(raw_override)?;
            self.budgets.insert(category, budget);
        }

        Ok(self)
    }
}

impl Default for BudgetTable {
    fn default() -> Self {
        Self::new(DEFAULT_CATEGORY_BUDGETS)
    }
}

fn parse_budget_override(text: &str) -> Result<(Category, f64), Error> {
    let Some((raw_category, raw_amount)) = text.split_once('=') else {
        return Err(Error::InvalidBudget(text.to_owned()));
    };

    let category = raw_category.trim().parse()?;
    let amount: f64 = raw_amount
        .trim()
        .parse()
        .map_err(|_| Error::InvalidBudget(text.to_owned()))?;

    if !amount.is_finite() || amount < 0.0 {
        return Err(Error::InvalidBudget(text.to_owned()));
    }

    Ok((category, amount))
}

#[cfg(test)]
mod budget_table_tests {
    use crate::{
        Error,
        budget::{BudgetTable, DEFAULT_CATEGORY_BUDGETS},
        category::Category,
    };

    #[test]
    fn default_table_has_every_category() {
        let table = BudgetTable::default();

        for (category, budget) in DEFAULT_CATEGORY_BUDGETS {
            assert_eq!(table.budget_for(category), budget);
        }
    }

    #[test]
    fn missing_category_has_zero_budget() {
        let table = BudgetTable::new([(Category::Food, 5000.0)]);

        assert_eq!(table.budget_for(Category::Rent), 0.0);
    }

    #[test]
    fn overrides_replace_defaults() {
        let table = BudgetTable::default()
            .with_overrides(&["Food=6000".to_owned(), " Rent = 0 ".to_owned()])
            .unwrap();

        assert_eq!(table.budget_for(Category::Food), 6000.0);
        assert_eq!(table.budget_for(Category::Rent), 0.0);
        assert_eq!(table.budget_for(Category::Transport), 2000.0);
    }

    #[test]
    fn override_without_separator_fails() {
        let result = BudgetTable::default().with_overrides(&["Food6000".to_owned()]);

        assert_eq!(result, Err(Error::InvalidBudget("Food6000".to_owned())));
    }

    #[test]
    fn override_with_negative_amount_fails() {
        let result = BudgetTable::default().with_overrides(&["Food=-1".to_owned()]);

        assert_eq!(result, Err(Error::InvalidBudget("Food=-1".to_owned())));
    }

    #[test]
    fn override_with_unknown_category_fails() {
        let result = BudgetTable::default().with_overrides(&["Pets=100".to_owned()]);

        assert_eq!(result, Err(Error::InvalidCategory("Pets".to_owned())));
    }
}
