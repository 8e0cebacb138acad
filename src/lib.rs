//! Finance Tracker is a web app for recording income and expenses and keeping
//! spending within per-category budgets.
//!
//! This library provides a JSON API for the `transactions` resource and a set
//! of HTML pages, served directly by the REST server, that list transactions,
//! add new ones and visualise monthly totals and spending against budgets.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use serde_json::json;
use tokio::signal;

pub mod aggregation;
mod alert;
mod app_state;
pub mod budget;
pub mod category;
mod dashboard;
mod database_id;
mod db;
mod endpoints;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
#[cfg(test)]
mod test_utils;
mod timezone;
pub mod transaction;

pub use app_state::AppState;
pub use database_id::TransactionId;
pub use db::initialize as initialize_db;
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use timezone::is_valid_timezone;

use crate::{
    aggregation::AggregationError,
    alert::Alert,
    internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate_signal) => {
                terminate_signal.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// One of the required transaction fields (amount, description, date,
    /// category) was missing or empty.
    #[error("missing fields")]
    MissingFields,

    /// The amount of a new transaction was negative or not a finite number.
    #[error("invalid amount {0}, amounts must be positive numbers")]
    InvalidAmount(String),

    /// The date of a new transaction could not be parsed as an ISO-8601 date.
    #[error("invalid date \"{0}\", dates must be in the format YYYY-MM-DD")]
    InvalidDate(String),

    /// The category name did not match any known category.
    #[error("unknown category \"{0}\"")]
    InvalidCategory(String),

    /// A budget override was not of the form `CATEGORY=AMOUNT` with a
    /// non-negative amount.
    #[error("invalid budget \"{0}\", expected CATEGORY=AMOUNT with a non-negative amount")]
    InvalidBudget(String),

    /// Stored transactions could not be summarised.
    #[error("could not summarise transactions: {0}")]
    Aggregation(AggregationError),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// Tried to delete a transaction that does not exist
    #[error("tried to delete a transaction that is not in the database")]
    DeleteMissingTransaction,

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),

    /// Could not acquire the database lock
    #[error("could not acquire the database lock")]
    DatabaseLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl From<AggregationError> for Error {
    fn from(value: AggregationError) -> Self {
        Error::Aggregation(value)
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::Aggregation(error) => {
                tracing::error!("Could not summarise transactions: {error}");
                InternalServerError {
                    description: "Could not summarise transactions",
                    fix: "A stored transaction has an invalid date or amount. \
                        Delete the transaction and add it again.",
                }
                .into_response()
            }
            Error::DatabaseLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Render the error as an alert for HTMX requests.
    fn into_alert_response(self) -> Response {
        match self {
            Error::MissingFields => Alert::error(
                "Missing fields",
                "Fill in the amount, description, date and category.",
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidAmount(amount) => Alert::error(
                "Invalid amount",
                &format!("{amount} is not a valid amount. Enter a number greater than zero."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidDate(date) => Alert::error(
                "Invalid transaction date",
                &format!("\"{date}\" is not a valid date. Use the format YYYY-MM-DD."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidCategory(category) => Alert::error(
                "Invalid category",
                &format!("\"{category}\" is not a category. Choose a category from the list."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::NotFound | Error::DeleteMissingTransaction => Alert::error(
                "Could not delete transaction",
                "The transaction could not be found. \
                Try refreshing the page to see if the transaction has already been deleted.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }

    /// Render the error as a JSON object with a `message` field.
    ///
    /// `server_error_message` is used for errors that are not the client's fault.
    fn into_json_response(self, server_error_message: &str) -> Response {
        let (status_code, message) = match self {
            Error::MissingFields => (StatusCode::BAD_REQUEST, "Missing fields".to_owned()),
            error @ (Error::InvalidAmount(_)
            | Error::InvalidDate(_)
            | Error::InvalidCategory(_)) => (StatusCode::BAD_REQUEST, error.to_string()),
            Error::NotFound | Error::DeleteMissingTransaction => {
                (StatusCode::NOT_FOUND, "Not found".to_owned())
            }
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    server_error_message.to_owned(),
                )
            }
        };

        (status_code, Json(json!({ "message": message }))).into_response()
    }
}
