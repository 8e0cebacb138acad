//! Transaction management for the finance tracker.
//!
//! This module contains everything related to transactions:
//! - The `Transaction` model and the validation of new transactions
//! - Database functions for storing, querying, and deleting transactions
//! - The JSON API and the HTML pages and endpoints for transactions

mod api;
mod core;
mod create_endpoint;
mod create_page;
mod delete_endpoint;
mod transactions_page;

pub(crate) use api::{
    create_transaction_api_endpoint, delete_transaction_api_endpoint, get_summary_endpoint,
    get_transactions_endpoint,
};
pub use core::{
    NewTransaction, Transaction, TransactionFields, create_transaction, create_transaction_table,
    delete_transaction, get_all_transactions, map_transaction_row,
};
#[cfg(test)]
pub(crate) use core::{count_transactions, get_transaction};
pub(crate) use create_endpoint::create_transaction_endpoint;
pub(crate) use create_page::get_create_transaction_page;
pub(crate) use delete_endpoint::delete_transaction_endpoint;
pub(crate) use transactions_page::get_transactions_page;
