//! Defines the route handler for the page for creating a new transaction.

use axum::{
    extract::{FromRef, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use time::Date;

use crate::{
    AppState, Error,
    category::Category,
    endpoints,
    html::{
        BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, base,
        currency_input_styles, loading_spinner,
    },
    navigation::NavBar,
    timezone::local_today,
};

fn create_transaction_view(max_date: Date) -> Markup {
    let create_transaction_route = endpoints::TRANSACTIONS_VIEW;
    let nav_bar = NavBar::new(endpoints::NEW_TRANSACTION_VIEW).into_html();
    let spinner = loading_spinner();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            form
                hx-post=(create_transaction_route)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                h2 class="text-xl font-bold" { "Add Transaction" }

                div
                {
                    label
                        for="amount"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Amount"
                    }

                    // w-full needed to ensure input takes the full width when prefilled with a value
                    div class="input-wrapper w-full"
                    {
                        input
                            name="amount"
                            id="amount"
                            type="number"
                            step="0.01"
                            min="0.01"
                            placeholder="0.00"
                            required
                            autofocus
                            class=(FORM_TEXT_INPUT_STYLE);
                    }
                }

                div
                {
                    label
                        for="description"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Description"
                    }

                    input
                        name="description"
                        id="description"
                        type="text"
                        placeholder="Description"
                        required
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="date"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Date"
                    }

                    input
                        name="date"
                        id="date"
                        type="date"
                        max=(max_date)
                        required
                        value=(max_date)
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label
                        for="category"
                        class=(FORM_LABEL_STYLE)
                    {
                        "Category"
                    }

                    select
                        name="category"
                        id="category"
                        required
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" { "Select a category" }

                        @for category in Category::ALL {
                            option value=(category) { (category) }
                        }
                    }
                }

                button type="submit" id="submit-button" tabindex="0" class=(BUTTON_PRIMARY_STYLE)
                {
                    span
                        id="indicator"
                        class="inline htmx-indicator"
                    {
                        (spinner)
                    }
                    " Add Transaction"
                }
            }
        }
    };

    base("Add Transaction", &[currency_input_styles()], &content)
}

/// The state needed for the new transaction page.
#[derive(Debug, Clone)]
pub struct CreateTransactionPageState {
    /// The local timezone as a canonical timezone name, e.g. "Asia/Kolkata".
    pub local_timezone: String,
}

impl FromRef<AppState> for CreateTransactionPageState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Renders the page for creating a transaction.
pub async fn get_create_transaction_page(
    State(state): State<CreateTransactionPageState>,
) -> Result<Response, Error> {
    let max_date = local_today(&state.local_timezone)?;

    Ok(create_transaction_view(max_date).into_response())
}

#[cfg(test)]
mod view_tests {
    use axum::{extract::State, response::IntoResponse};
    use time::OffsetDateTime;

    use crate::{
        Error, endpoints,
        test_utils::{
            assert_content_type, assert_form_input, assert_form_input_with_value,
            assert_form_select, assert_form_submit_button_with_text, assert_hx_endpoint,
            assert_status_ok, assert_valid_html, must_get_form, parse_html_document,
        },
        transaction::create_page::{CreateTransactionPageState, get_create_transaction_page},
    };

    #[tokio::test]
    async fn new_transaction_returns_form() {
        let state = CreateTransactionPageState {
            local_timezone: "Etc/UTC".to_owned(),
        };

        let response = get_create_transaction_page(State(state)).await.unwrap();

        assert_status_ok(&response);
        assert_content_type(&response, "text/html; charset=utf-8");
        let document = parse_html_document(response).await;
        assert_valid_html(&document);

        let form = must_get_form(&document);
        assert_hx_endpoint(&form, endpoints::TRANSACTIONS_VIEW, "hx-post");
        assert_form_input(&form, "amount", "number");
        assert_form_input(&form, "description", "text");
        let today = OffsetDateTime::now_utc().date().to_string();
        assert_form_input_with_value(&form, "date", "date", &today);
        assert_form_select(
            &form,
            "category",
            &["Food", "Rent", "Entertainment", "Transport", "Utilities"],
        );
        assert_form_submit_button_with_text(&form, "Add Transaction");
    }

    #[tokio::test]
    async fn invalid_timezone_renders_error_page() {
        let state = CreateTransactionPageState {
            local_timezone: "Not/AZone".to_owned(),
        };

        let result = get_create_transaction_page(State(state)).await;

        let error = result.err().expect("want an error for an unknown timezone");
        assert_eq!(error, Error::InvalidTimezoneError("Not/AZone".to_owned()));
        assert_eq!(error.into_response().status(), 500);
    }
}
