//! The JSON endpoints for the transactions resource and the spending summary.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::Deserialize;
use time::OffsetDateTime;

use crate::{
    AppState, Error,
    aggregation::summarise,
    budget::BudgetTable,
    database_id::TransactionId,
    transaction::{
        TransactionFields,
        core::{create_transaction, delete_transaction, get_all_transactions},
    },
};

const SERVER_ERROR_MESSAGE: &str = "Server error";
const SAVE_ERROR_MESSAGE: &str = "Error saving transaction";

/// The state needed by the JSON API.
#[derive(Debug, Clone)]
pub struct TransactionApiState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The budget for each category.
    pub budgets: BudgetTable,
}

impl FromRef<AppState> for TransactionApiState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            budgets: state.budgets.clone(),
        }
    }
}

/// The request body for deleting a transaction.
#[derive(Debug, Deserialize)]
pub struct DeleteTransactionRequest {
    /// The ID of the transaction to delete.
    pub id: TransactionId,
}

fn lock_connection(connection: &Mutex<Connection>) -> Result<MutexGuard<'_, Connection>, Error> {
    connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)
}

/// Responds with every transaction, most recently recorded first.
pub async fn get_transactions_endpoint(State(state): State<TransactionApiState>) -> Response {
    let transactions = lock_connection(&state.db_connection)
        .and_then(|connection| get_all_transactions(&connection));

    match transactions {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("could not get transactions: {error}");
            error.into_json_response(SERVER_ERROR_MESSAGE)
        }
    }
}

/// Creates a transaction and responds with the updated list of transactions.
pub async fn create_transaction_api_endpoint(
    State(state): State<TransactionApiState>,
    payload: Result<Json<TransactionFields>, JsonRejection>,
) -> Response {
    let fields = match payload {
        Ok(Json(fields)) => fields,
        Err(rejection) => {
            tracing::warn!("could not decode new transaction: {rejection}");
            return Error::MissingFields.into_json_response(SAVE_ERROR_MESSAGE);
        }
    };

    let new_transaction = match fields.validate() {
        Ok(new_transaction) => new_transaction,
        Err(error) => {
            tracing::warn!("rejected new transaction: {error}");
            return error.into_json_response(SAVE_ERROR_MESSAGE);
        }
    };

    let transactions = lock_connection(&state.db_connection).and_then(|connection| {
        let transaction =
            create_transaction(new_transaction, OffsetDateTime::now_utc(), &connection)?;
        tracing::info!("Created transaction {}", transaction.id);

        get_all_transactions(&connection)
    });

    match transactions {
        Ok(transactions) => (StatusCode::CREATED, Json(transactions)).into_response(),
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            error.into_json_response(SAVE_ERROR_MESSAGE)
        }
    }
}

/// Deletes a transaction and responds with the updated list of transactions.
pub async fn delete_transaction_api_endpoint(
    State(state): State<TransactionApiState>,
    payload: Result<Json<DeleteTransactionRequest>, JsonRejection>,
) -> Response {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!("could not decode delete request: {rejection}");
            return Error::MissingFields.into_json_response(SERVER_ERROR_MESSAGE);
        }
    };

    let transactions = lock_connection(&state.db_connection).and_then(|connection| {
        if delete_transaction(request.id, &connection)? == 0 {
            return Err(Error::DeleteMissingTransaction);
        }
        tracing::info!("Deleted transaction {}", request.id);

        get_all_transactions(&connection)
    });

    match transactions {
        Ok(transactions) => Json(transactions).into_response(),
        Err(error) => {
            tracing::error!("could not delete transaction {}: {error}", request.id);
            error.into_json_response(SERVER_ERROR_MESSAGE)
        }
    }
}

/// Responds with the monthly totals, category summaries and overspent categories.
pub async fn get_summary_endpoint(State(state): State<TransactionApiState>) -> Response {
    let summary = lock_connection(&state.db_connection)
        .and_then(|connection| get_all_transactions(&connection))
        .and_then(|transactions| Ok(summarise(&transactions, &state.budgets)?));

    match summary {
        Ok(summary) => {
            if !summary.overspent.is_empty() {
                tracing::warn!(
                    "Budget exceeded in {} categories",
                    summary.overspent.len()
                );
            }

            Json(summary).into_response()
        }
        Err(error) => {
            tracing::error!("could not summarise transactions: {error}");
            error.into_json_response(SERVER_ERROR_MESSAGE)
        }
    }
}
