//! Turns a list of transactions into monthly totals and per-category budget summaries.
//!
//! Every function in this module is pure: it reads a snapshot of transactions
//! and returns new values without touching the database or any shared state,
//! so the summaries can be recomputed whenever the transaction list changes.
//!
//! Groups are always emitted in the order in which they are first seen in the
//! input, not in chronological or alphabetical order. Charts render the
//! summaries in exactly this order.

use std::collections::HashMap;

use serde::Serialize;
use time::{
    Date, Month, OffsetDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

use crate::{budget::BudgetTable, category::Category, transaction::Transaction};

const ISO_DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// The errors that can occur while aggregating transactions.
#[derive(Debug, Clone, thiserror::Error, PartialEq)]
pub enum AggregationError {
    /// A transaction date could not be parsed as a calendar date.
    #[error("\"{0}\" is not a valid ISO-8601 date")]
    InvalidDate(String),

    /// A transaction amount was NaN or infinite.
    #[error("{0} is not a finite amount")]
    InvalidAmount(String),
}

/// The total amount for a single calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotal {
    /// The month label, e.g. "Jan 2025".
    pub month: String,
    /// The sum of the amounts of all transactions dated in this month.
    pub total: f64,
}

/// Spending in a category compared against the category's budget.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategorySummary {
    /// The category being summarised.
    pub category: Category,
    /// The sum of the amounts of all transactions in this category.
    pub total: f64,
    /// The budget ceiling for the category, zero if none is configured.
    pub budget: f64,
    /// `budget - total`, negative when the budget has been exceeded.
    pub remaining: f64,
}

impl CategorySummary {
    /// Whether spending has exceeded a configured budget.
    ///
    /// A budget of zero means no ceiling has been set, so a category with a zero
    /// budget is never overspent no matter how much has been spent.
    pub fn is_overspent(&self) -> bool {
        self.budget != 0.0 && self.total > self.budget
    }
}

/// All the derived data shown on the dashboard and returned by the summary API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionSummary {
    /// Monthly totals in order of first occurrence.
    pub monthly: Vec<MonthlyTotal>,
    /// Category summaries in order of first occurrence.
    pub categories: Vec<CategorySummary>,
    /// The categories from `categories` that are over budget.
    pub overspent: Vec<CategorySummary>,
}

/// Parse a transaction date.
///
/// Accepts a plain ISO-8601 calendar date ("2024-03-01") or an RFC 3339
/// date-time ("2024-03-01T10:30:00Z"), in which case only the date part is used.
///
/// # Errors
/// Returns [AggregationError::InvalidDate] if `text` is neither.
pub fn parse_transaction_date(text: &str) -> Result<Date, AggregationError> {
    Date::parse(text, ISO_DATE_FORMAT)
        .or_else(|_| OffsetDateTime::parse(text, &Rfc3339).map(|date_time| date_time.date()))
        .map_err(|_| AggregationError::InvalidDate(text.to_owned()))
}

/// Format the month of `date` as a three-letter English abbreviation followed by the year.
///
/// The label does not depend on the locale of the machine, e.g. "Mar 2024".
pub fn format_month_label(date: Date) -> String {
    let month = match date.month() {
        Month::January => "Jan",
        Month::February => "Feb",
        Month::March => "Mar",
        Month::April => "Apr",
        Month::May => "May",
        Month::June => "Jun",
        Month::July => "Jul",
        Month::August => "Aug",
        Month::September => "Sep",
        Month::October => "Oct",
        Month::November => "Nov",
        Month::December => "Dec",
    };

    format!("{month} {}", date.year())
}

/// Sums transaction amounts by calendar month.
///
/// # Returns
/// One [MonthlyTotal] per distinct month, ordered by where each month first
/// appears in `transactions`.
///
/// # Errors
/// Returns an [AggregationError::InvalidDate] if any transaction date cannot be
/// parsed, or an [AggregationError::InvalidAmount] if any amount is not finite.
pub fn compute_monthly_summary(
    transactions: &[Transaction],
) -> Result<Vec<MonthlyTotal>, AggregationError> {
    let mut summary: Vec<MonthlyTotal> = Vec::new();
    let mut positions: HashMap<(i32, Month), usize> = HashMap::new();

    for transaction in transactions {
        let amount = checked_amount(transaction)?;
        let date = parse_transaction_date(&transaction.date)?;

        let position = *positions
            .entry((date.year(), date.month()))
            .or_insert_with(|| {
                summary.push(MonthlyTotal {
                    month: format_month_label(date),
                    total: 0.0,
                });
                summary.len() - 1
            });

        summary[position].total += amount;
    }

    Ok(summary)
}

/// Sums transaction amounts by category and compares each total against `budgets`.
///
/// Categories without a budget in `budgets` get a budget of zero.
///
/// # Returns
/// One [CategorySummary] per distinct category, ordered by where each category
/// first appears in `transactions`.
///
/// # Errors
/// Returns an [AggregationError::InvalidAmount] if any amount is not finite.
pub fn compute_category_summary(
    transactions: &[Transaction],
    budgets: &BudgetTable,
) -> Result<Vec<CategorySummary>, AggregationError> {
    let mut totals: Vec<(Category, f64)> = Vec::new();
    let mut positions: HashMap<Category, usize> = HashMap::new();

    for transaction in transactions {
        let amount = checked_amount(transaction)?;

        let position = *positions.entry(transaction.category).or_insert_with(|| {
            totals.push((transaction.category, 0.0));
            totals.len() - 1
        });

        totals[position].1 += amount;
    }

    let summary = totals
        .into_iter()
        .map(|(category, total)| {
            let budget = budgets.budget_for(category);

            CategorySummary {
                category,
                total,
                budget,
                remaining: budget - total,
            }
        })
        .collect();

    Ok(summary)
}

/// Selects the over-budget categories, keeping their relative order.
pub fn detect_overspent_categories(summaries: &[CategorySummary]) -> Vec<&CategorySummary> {
    summaries
        .iter()
        .filter(|summary| summary.is_overspent())
        .collect()
}

/// Computes the monthly and category summaries and the overspent categories in one go.
///
/// # Errors
/// Returns an error if either summary cannot be computed, see
/// [compute_monthly_summary] and [compute_category_summary].
pub fn summarise(
    transactions: &[Transaction],
    budgets: &BudgetTable,
) -> Result<TransactionSummary, AggregationError> {
    let monthly = compute_monthly_summary(transactions)?;
    let categories = compute_category_summary(transactions, budgets)?;
    let overspent = detect_overspent_categories(&categories)
        .into_iter()
        .cloned()
        .collect();

    Ok(TransactionSummary {
        monthly,
        categories,
        overspent,
    })
}

fn checked_amount(transaction: &Transaction) -> Result<f64, AggregationError> {
    if transaction.amount.is_finite() {
        Ok(transaction.amount)
    } else {
        Err(AggregationError::InvalidAmount(
            transaction.amount.to_string(),
        ))
    }
}
