//! The fixed set of spending categories a transaction can belong to.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::Error;

/// A classification of spending.
///
/// Categories are stored and serialized by their display name, e.g. "Food".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// Groceries, eating out and other food.
    Food,
    /// Rent or mortgage payments.
    Rent,
    /// Movies, games, concerts and similar.
    Entertainment,
    /// Public transport, fuel, taxis.
    Transport,
    /// Power, water, internet and phone bills.
    Utilities,
}

impl Category {
    /// Every category, in the order they are shown in forms.
    pub const ALL: [Category; 5] = [
        Category::Food,
        Category::Rent,
        Category::Entertainment,
        Category::Transport,
        Category::Utilities,
    ];

    /// The display name of the category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Food => "Food",
            Category::Rent => "Rent",
            Category::Entertainment => "Entertainment",
            Category::Transport => "Transport",
            Category::Utilities => "Utilities",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = Error;

    /// Parse a category from its display name.
    ///
    /// # Errors
    /// Returns [Error::InvalidCategory] if `s` is not exactly one of the category names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| Error::InvalidCategory(s.to_owned()))
    }
}

impl ToSql for Category {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(ToSqlOutput::from(self.as_str()))
    }
}

impl FromSql for Category {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        let text = value.as_str()?;

        text.parse()
            .map_err(|error: Error| FromSqlError::Other(Box::new(error)))
    }
}

#[cfg(test)]
mod category_tests {
    use std::str::FromStr;

    use crate::{Error, category::Category};

    #[test]
    fn parses_every_display_name() {
        for category in Category::ALL {
            assert_eq!(Category::from_str(&category.to_string()), Ok(category));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        assert_eq!(
            Category::from_str("Groceries"),
            Err(Error::InvalidCategory("Groceries".to_owned()))
        );
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert_eq!(
            Category::from_str("food"),
            Err(Error::InvalidCategory("food".to_owned()))
        );
    }

    #[test]
    fn serializes_as_display_name() {
        let json = serde_json::to_string(&Category::Entertainment).unwrap();

        assert_eq!(json, "\"Entertainment\"");
    }
}
