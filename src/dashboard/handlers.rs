//! Dashboard HTTP handlers and view rendering.
//!
//! This module contains:
//! - The route handler for displaying the dashboard
//! - HTML view functions for rendering the dashboard UI
//! - The overspend banner shown when categories exceed their budgets

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use rusqlite::Connection;

use crate::{
    AppState, Error,
    aggregation::{CategorySummary, TransactionSummary, summarise},
    alert::Alert,
    budget::BudgetTable,
    dashboard::{
        cards::{category_breakdown_table, recent_transactions_list, total_expenses_card},
        charts::{
            DashboardChart, category_chart, charts_script, charts_view, monthly_expenses_chart,
        },
    },
    endpoints,
    html::{HeadElement, base, link},
    navigation::NavBar,
    transaction::{Transaction, get_all_transactions},
};

/// The state needed for displaying the dashboard page.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The database connection for reading transactions.
    pub db_connection: Arc<Mutex<Connection>>,
    /// The budget for each category.
    pub budgets: BudgetTable,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
            budgets: state.budgets.clone(),
        }
    }
}

/// Display a page with an overview of spending.
pub async fn get_dashboard_page(State(state): State<DashboardState>) -> Result<Response, Error> {
    let transactions = {
        let connection = state
            .db_connection
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire database lock: {error}"))
            .map_err(|_| Error::DatabaseLockError)?;

        get_all_transactions(&connection)
            .inspect_err(|error| tracing::error!("Could not get transactions: {error}"))?
    };

    let nav_bar = NavBar::new(endpoints::DASHBOARD_VIEW);

    if transactions.is_empty() {
        return Ok(dashboard_no_data_view(nav_bar).into_response());
    }

    let summary = summarise(&transactions, &state.budgets)
        .inspect_err(|error| tracing::error!("Could not summarise transactions: {error}"))?;

    Ok(dashboard_view(nav_bar, &transactions, &summary).into_response())
}

/// The warning shown when any category is over budget, or `None` if every
/// category is within budget.
fn overspend_alert(overspent: &[CategorySummary]) -> Option<Alert> {
    if overspent.is_empty() {
        return None;
    }

    let category_names = overspent
        .iter()
        .map(|summary| summary.category.as_str())
        .collect::<Vec<_>>()
        .join(", ");

    tracing::warn!("Budget exceeded in: {category_names}");

    Some(Alert::warning(
        &format!("Budget exceeded in: {category_names}"),
        "Spending in these categories is more than their budget.",
    ))
}

fn build_dashboard_charts(summary: &TransactionSummary) -> [DashboardChart; 2] {
    [
        DashboardChart {
            id: "monthly-expenses-chart",
            options: monthly_expenses_chart(&summary.monthly).to_string(),
        },
        DashboardChart {
            id: "category-chart",
            options: category_chart(&summary.categories).to_string(),
        },
    ]
}

/// Renders the dashboard page when no transaction data exists.
fn dashboard_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let new_transaction_link = link(endpoints::NEW_TRANSACTION_VIEW, "add a transaction");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you " (new_transaction_link) "."
            }
        }
    );

    base("Dashboard", &[], &content)
}

fn dashboard_view(
    nav_bar: NavBar<'_>,
    transactions: &[Transaction],
    summary: &TransactionSummary,
) -> Markup {
    let nav_bar = nav_bar.into_html();
    let total_expenses = transactions
        .iter()
        .map(|transaction| transaction.amount)
        .sum::<f64>();
    let charts = build_dashboard_charts(summary);

    let content = html!(
        (nav_bar)

        div
            id="dashboard-content"
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            @if let Some(alert) = overspend_alert(&summary.overspent) {
                div id="overspend-alert" class="w-full" { (alert.into_html()) }
            }

            div class="grid grid-cols-1 xl:grid-cols-3 gap-4 w-full mb-4"
            {
                (total_expenses_card(total_expenses))
                (category_breakdown_table(&summary.categories))
                (recent_transactions_list(transactions))
            }

            (charts_view(&charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink("/static/echarts.6.0.0.min.js".to_owned()),
        charts_script(&charts),
    ];

    base("Dashboard", &scripts, &content)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{extract::State, http::StatusCode, response::IntoResponse};
    use rusqlite::Connection;
    use scraper::{Html, Selector};
    use time::{Date, OffsetDateTime, macros::date};

    use crate::{
        budget::BudgetTable,
        category::Category,
        dashboard::handlers::{DashboardState, get_dashboard_page},
        test_utils::{assert_status_ok, assert_valid_html, get_test_connection, parse_html_document},
        transaction::{NewTransaction, create_transaction},
    };

    fn insert(connection: &Connection, amount: f64, date: Date, category: Category) {
        create_transaction(
            NewTransaction {
                amount,
                description: format!("{category} on {date}"),
                date,
                category,
            },
            OffsetDateTime::now_utc(),
            connection,
        )
        .unwrap();
    }

    fn get_state(connection: Connection) -> DashboardState {
        DashboardState {
            db_connection: Arc::new(Mutex::new(connection)),
            budgets: BudgetTable::default(),
        }
    }

    async fn render_dashboard(state: DashboardState) -> Html {
        let response = get_dashboard_page(State(state)).await.into_response();
        assert_status_ok(&response);

        let document = parse_html_document(response).await;
        assert_valid_html(&document);
        document
    }

    fn select_text(document: &Html, selector: &str) -> Option<String> {
        document
            .select(&Selector::parse(selector).unwrap())
            .next()
            .map(|element| element.text().collect::<String>())
    }

    #[tokio::test]
    async fn shows_prompt_when_there_are_no_transactions() {
        let document = render_dashboard(get_state(get_test_connection())).await;

        let heading = select_text(&document, "h2").expect("No heading found");
        assert_eq!(heading.trim(), "Nothing here yet...");
        assert!(select_text(&document, "#charts").is_none());
    }

    #[tokio::test]
    async fn shows_banner_for_overspent_categories() {
        let connection = get_test_connection();
        insert(&connection, 3000.0, date!(2024 - 03 - 01), Category::Food);
        insert(&connection, 2500.0, date!(2024 - 03 - 15), Category::Food);
        insert(&connection, 16000.0, date!(2024 - 03 - 02), Category::Rent);
        insert(&connection, 100.0, date!(2024 - 01 - 10), Category::Transport);

        let document = render_dashboard(get_state(connection)).await;

        let banner = select_text(&document, "#overspend-alert").expect("No overspend banner");
        assert!(
            banner.contains("Budget exceeded in:"),
            "got banner text {banner:?}"
        );
        assert!(banner.contains("Food"), "got banner text {banner:?}");
        assert!(banner.contains("Rent"), "got banner text {banner:?}");
        assert!(!banner.contains("Transport"), "got banner text {banner:?}");
    }

    #[tokio::test]
    async fn no_banner_when_within_budget() {
        let connection = get_test_connection();
        insert(&connection, 100.0, date!(2024 - 03 - 01), Category::Food);

        let document = render_dashboard(get_state(connection)).await;

        assert!(select_text(&document, "#overspend-alert").is_none());
    }

    #[tokio::test]
    async fn shows_total_breakdown_and_recent_transactions() {
        let connection = get_test_connection();
        for day in 1..=6 {
            let date = Date::from_calendar_date(2024, time::Month::March, day).unwrap();
            insert(&connection, 10.0, date, Category::Entertainment);
        }

        let document = render_dashboard(get_state(connection)).await;

        let total = select_text(&document, "#total-expenses").expect("No total card");
        assert!(total.contains("₹60.00"), "got total card text {total:?}");

        let breakdown_rows = document
            .select(&Selector::parse("#category-breakdown tbody tr").unwrap())
            .count();
        assert_eq!(breakdown_rows, 1);

        let recent = document
            .select(&Selector::parse("#recent-transactions li").unwrap())
            .count();
        assert_eq!(recent, 5);

        assert!(select_text(&document, "#monthly-expenses-chart").is_some());
        assert!(select_text(&document, "#category-chart").is_some());
    }

    #[tokio::test]
    async fn corrupt_transaction_date_is_internal_server_error() {
        let connection = get_test_connection();
        insert(&connection, 100.0, date!(2024 - 03 - 01), Category::Food);
        connection
            .execute(
                "INSERT INTO \"transaction\" (amount, description, date, category, created_at)
                 VALUES (50.0, 'Corrupt', 'not-a-date', 'Food', ?1)",
                (OffsetDateTime::now_utc(),),
            )
            .unwrap();

        let response = get_dashboard_page(State(get_state(connection)))
            .await
            .into_response();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let text = parse_html_document(response)
            .await
            .root_element()
            .text()
            .collect::<String>();
        assert!(
            text.contains("Could not summarise transactions"),
            "got {text:?}"
        );
    }
}
