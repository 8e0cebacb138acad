//! Defines the route handler for the page that displays transactions as a table.
use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error, endpoints,
    html::{
        BUTTON_DELETE_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    transaction::{Transaction, core::get_all_transactions},
};

/// The state needed for the transactions page.
#[derive(Debug, Clone)]
pub struct TransactionsViewState {
    /// The database connection for managing transactions.
    db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for TransactionsViewState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// Render every transaction, most recently recorded first.
pub async fn get_transactions_page(
    State(state): State<TransactionsViewState>,
) -> Result<Response, Error> {
    let connection = state
        .db_connection
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
        .map_err(|_| Error::DatabaseLockError)?;

    let transactions = get_all_transactions(&connection)
        .inspect_err(|error| tracing::error!("Failed to retrieve transactions: {error}"))?;

    Ok(transactions_view(&transactions).into_response())
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let delete_url = endpoints::format_endpoint(endpoints::DELETE_TRANSACTION, transaction.id);

    html!(
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class=(TABLE_CELL_STYLE) { (transaction.date) }

            td class=(TABLE_CELL_STYLE) { (transaction.description) }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(CATEGORY_BADGE_STYLE) { (transaction.category) }
            }

            td class={ (TABLE_CELL_STYLE) " text-right" }
            {
                (format_currency(transaction.amount))
            }

            td class=(TABLE_CELL_STYLE)
            {
                button
                    hx-delete=(delete_url)
                    hx-confirm={
                        "Are you sure you want to delete '" (transaction.description) "'?"
                    }
                    hx-target="closest tr"
                    hx-target-error="#alert-container"
                    hx-swap="delete"
                    class=(BUTTON_DELETE_STYLE)
                {
                   "Delete"
                }
            }
        }
    )
}

fn transactions_view(transactions: &[Transaction]) -> Markup {
    let new_transaction_route = endpoints::NEW_TRANSACTION_VIEW;
    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW).into_html();

    let content = html!(
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="relative w-full max-w-screen-lg"
            {
                div class="flex justify-between flex-wrap items-end mb-4"
                {
                    h1 class="text-xl font-bold" { "Transactions" }

                    a href=(new_transaction_route) class=(LINK_STYLE)
                    {
                        "Add Transaction"
                    }
                }

                div class="dark:bg-gray-800 overflow-x-auto"
                {
                    table class="w-full text-sm text-left rtl:text-right
                        text-gray-500 dark:text-gray-400"
                    {
                        thead class=(TABLE_HEADER_STYLE)
                        {
                            tr
                            {
                                th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Description" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                                th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Amount" }
                                th scope="col" class=(TABLE_CELL_STYLE) { "Actions" }
                            }
                        }

                        tbody
                        {
                            @for transaction in transactions {
                                (transaction_row(transaction))
                            }

                            @if transactions.is_empty() {
                                tr
                                {
                                    td
                                        colspan="5"
                                        class="px-6 py-4 text-center
                                            text-gray-500 dark:text-gray-400"
                                    {
                                        "No transactions found. "
                                        a href=(new_transaction_route) class=(LINK_STYLE)
                                        {
                                            "Add your first transaction"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    );

    base("Transactions", &[], &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::extract::State;
    use scraper::Selector;
    use time::{OffsetDateTime, macros::date};

    use crate::{
        category::Category,
        test_utils::{
            assert_hx_endpoint, assert_status_ok, assert_valid_html, get_test_connection,
            parse_html_document,
        },
        transaction::{
            NewTransaction,
            core::create_transaction,
            transactions_page::{TransactionsViewState, get_transactions_page},
        },
    };

    #[tokio::test]
    async fn shows_message_when_there_are_no_transactions() {
        let state = TransactionsViewState {
            db_connection: Arc::new(Mutex::new(get_test_connection())),
        };

        let response = get_transactions_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let text = document.root_element().text().collect::<String>();
        assert!(text.contains("No transactions found."), "got {text:?}");
    }

    #[tokio::test]
    async fn lists_transactions_newest_first_with_delete_buttons() {
        let connection = get_test_connection();
        for (description, category) in [("Rent", Category::Rent), ("Cinema", Category::Entertainment)]
        {
            create_transaction(
                NewTransaction {
                    amount: 100.0,
                    description: description.to_owned(),
                    date: date!(2025 - 02 - 01),
                    category,
                },
                OffsetDateTime::now_utc(),
                &connection,
            )
            .unwrap();
        }
        let state = TransactionsViewState {
            db_connection: Arc::new(Mutex::new(connection)),
        };

        let response = get_transactions_page(State(state)).await.unwrap();

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        let rows = document
            .select(&Selector::parse("tbody tr").unwrap())
            .collect::<Vec<_>>();
        assert_eq!(rows.len(), 2);

        let want = [("2", "Cinema"), ("1", "Rent")];
        for (row, (want_id, want_description)) in rows.iter().zip(want) {
            assert_eq!(row.value().attr("data-transaction-id"), Some(want_id));
            let text = row.text().collect::<String>();
            assert!(text.contains(want_description), "got row text {text:?}");
            assert!(text.contains("₹100.00"), "got row text {text:?}");

            let button = row
                .select(&Selector::parse("button").unwrap())
                .next()
                .expect("No delete button found");
            assert_hx_endpoint(
                &button,
                &format!("/transactions/{want_id}"),
                "hx-delete",
            );
        }
    }
}
