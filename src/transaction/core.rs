//! Defines the core data models and database queries for transactions.

use rusqlite::{Connection, Row};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

use crate::{
    Error, aggregation::parse_transaction_date, category::Category, database_id::TransactionId,
};

// ============================================================================
// MODELS
// ============================================================================

/// An expense or income, i.e. an event where money was either spent or earned.
///
/// Transactions are immutable: they can only be created and deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// The ID of the transaction.
    #[serde(rename = "_id")]
    pub id: TransactionId,
    /// The amount of money spent or earned in this transaction.
    pub amount: f64,
    /// A text description of what the transaction was for.
    pub description: String,
    /// When the transaction happened as an ISO-8601 date, e.g. "2025-01-15".
    pub date: String,
    /// The spending category of the transaction.
    pub category: Category,
    /// When the transaction was recorded.
    #[serde(rename = "createdAt", with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// The unvalidated fields for a new transaction, as submitted by a client.
///
/// Used for both JSON request bodies and HTML forms.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TransactionFields {
    /// The value of the transaction.
    #[serde(default)]
    pub amount: Option<f64>,
    /// Text detailing the transaction.
    #[serde(default)]
    pub description: Option<String>,
    /// The date when the transaction occurred.
    #[serde(default)]
    pub date: Option<String>,
    /// The name of the category.
    #[serde(default)]
    pub category: Option<String>,
}

impl TransactionFields {
    /// Check the fields and convert them into a [NewTransaction].
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingFields] if any field is missing or empty, or the amount is zero,
    /// - [Error::InvalidAmount] if the amount is negative or not finite,
    /// - [Error::InvalidDate] if the date is not an ISO-8601 date,
    /// - or [Error::InvalidCategory] if the category is not a known category.
    pub fn validate(self) -> Result<NewTransaction, Error> {
        let amount = self.amount.filter(|amount| *amount != 0.0);
        let description = self
            .description
            .map(|description| description.trim().to_owned())
            .filter(|description| !description.is_empty());
        let date = self.date.filter(|date| !date.trim().is_empty());
        let category = self.category.filter(|category| !category.is_empty());

        let (Some(amount), Some(description), Some(date), Some(category)) =
            (amount, description, date, category)
        else {
            return Err(Error::MissingFields);
        };

        if !amount.is_finite() || amount < 0.0 {
            return Err(Error::InvalidAmount(amount.to_string()));
        }

        let date = parse_transaction_date(date.trim())
            .map_err(|_| Error::InvalidDate(date.to_owned()))?;
        let category = category.parse()?;

        Ok(NewTransaction {
            amount,
            description,
            date,
            category,
        })
    }
}

/// A validated transaction that is ready to be inserted into the database.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The value of the transaction, always positive.
    pub amount: f64,
    /// Text detailing the transaction, never empty.
    pub description: String,
    /// When the transaction happened.
    pub date: Date,
    /// The spending category.
    pub category: Category,
}

// ============================================================================
// DATABASE FUNCTIONS
// ============================================================================

/// Create a new transaction in the database, recorded at `created_at`.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn create_transaction(
    transaction: NewTransaction,
    created_at: OffsetDateTime,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "INSERT INTO \"transaction\" (amount, description, date, category, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5)
             RETURNING id, amount, description, date, category, created_at",
        )?
        .query_row(
            (
                transaction.amount,
                transaction.description,
                transaction.date.to_string(),
                transaction.category,
                created_at,
            ),
            map_transaction_row,
        )?;

    Ok(transaction)
}

/// Retrieve a transaction from the database by its `id`.
///
/// # Errors
/// This function will return a:
/// - [Error::NotFound] if `id` does not refer to a valid transaction,
/// - or [Error::SqlError] there is some other SQL error.
#[cfg(test)]
pub(crate) fn get_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<Transaction, Error> {
    let transaction = connection
        .prepare(
            "SELECT id, amount, description, date, category, created_at
             FROM \"transaction\" WHERE id = :id",
        )?
        .query_one(&[(":id", &id)], map_transaction_row)?;

    Ok(transaction)
}

/// Retrieve every transaction, most recently recorded first.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn get_all_transactions(connection: &Connection) -> Result<Vec<Transaction>, Error> {
    connection
        .prepare(
            "SELECT id, amount, description, date, category, created_at
             FROM \"transaction\"
             ORDER BY created_at DESC, id DESC",
        )?
        .query_map([], map_transaction_row)?
        .collect::<Result<Vec<Transaction>, rusqlite::Error>>()
        .map_err(|error| error.into())
}

type RowsAffected = usize;

/// Delete the transaction with `id`, returning the number of rows deleted.
///
/// # Errors
/// This function will return a [Error::SqlError] if there is an SQL error.
pub fn delete_transaction(
    id: TransactionId,
    connection: &Connection,
) -> Result<RowsAffected, Error> {
    connection
        .execute(
            "DELETE FROM \"transaction\" WHERE id = :id",
            &[(":id", &id)],
        )
        .map_err(|err| err.into())
}

/// Get the total number of transactions in the database.
///
/// # Errors
/// This function will return a [Error::SqlError] there is some SQL error.
#[cfg(test)]
pub(crate) fn count_transactions(connection: &Connection) -> Result<u32, Error> {
    connection
        .query_row("SELECT COUNT(id) FROM \"transaction\";", [], |row| {
            row.get(0)
        })
        .map_err(|error| error.into())
}

/// Create the transaction table in the database.
///
/// # Errors
/// Returns an error if the table cannot be created or if there is an SQL error.
pub fn create_transaction_table(connection: &Connection) -> Result<(), rusqlite::Error> {
    connection.execute(
        "CREATE TABLE IF NOT EXISTS \"transaction\" (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                amount REAL NOT NULL,
                description TEXT NOT NULL,
                date TEXT NOT NULL,
                category TEXT NOT NULL,
                created_at TEXT NOT NULL
                )",
        (),
    )?;

    connection.execute(
        "CREATE INDEX IF NOT EXISTS idx_transaction_created_at ON \"transaction\"(created_at);",
        (),
    )?;

    Ok(())
}

/// Map a database row to a Transaction.
pub fn map_transaction_row(row: &Row) -> Result<Transaction, rusqlite::Error> {
    Ok(Transaction {
        id: row.get(0)?,
        amount: row.get(1)?,
        description: row.get(2)?,
        date: row.get(3)?,
        category: row.get(4)?,
        created_at: row.get(5)?,
    })
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod validation_tests {
    use time::macros::date;

    use crate::{
        Error,
        category::Category,
        transaction::{NewTransaction, TransactionFields},
    };

    fn valid_fields() -> TransactionFields {
        TransactionFields {
            amount: Some(250.0),
            description: Some("  Groceries  ".to_owned()),
            date: Some("2025-01-15".to_owned()),
            category: Some("Food".to_owned()),
        }
    }

    #[test]
    fn valid_fields_are_accepted() {
        let transaction = valid_fields().validate();

        assert_eq!(
            transaction,
            Ok(NewTransaction {
                amount: 250.0,
                description: "Groceries".to_owned(),
                date: date!(2025 - 01 - 15),
                category: Category::Food,
            })
        );
    }

    #[test]
    fn missing_field_is_rejected() {
        let fields = TransactionFields {
            category: None,
            ..valid_fields()
        };

        assert_eq!(fields.validate(), Err(Error::MissingFields));
    }

    #[test]
    fn blank_description_is_rejected() {
        let fields = TransactionFields {
            description: Some("   ".to_owned()),
            ..valid_fields()
        };

        assert_eq!(fields.validate(), Err(Error::MissingFields));
    }

    #[test]
    fn zero_amount_is_treated_as_missing() {
        let fields = TransactionFields {
            amount: Some(0.0),
            ..valid_fields()
        };

        assert_eq!(fields.validate(), Err(Error::MissingFields));
    }

    #[test]
    fn negative_amount_is_rejected() {
        let fields = TransactionFields {
            amount: Some(-5.0),
            ..valid_fields()
        };

        assert_eq!(fields.validate(), Err(Error::InvalidAmount("-5".to_owned())));
    }

    #[test]
    fn invalid_date_is_rejected() {
        let fields = TransactionFields {
            date: Some("not-a-date".to_owned()),
            ..valid_fields()
        };

        assert_eq!(
            fields.validate(),
            Err(Error::InvalidDate("not-a-date".to_owned()))
        );
    }

    #[test]
    fn unknown_category_is_rejected() {
        let fields = TransactionFields {
            category: Some("Pets".to_owned()),
            ..valid_fields()
        };

        assert_eq!(
            fields.validate(),
            Err(Error::InvalidCategory("Pets".to_owned()))
        );
    }
}
