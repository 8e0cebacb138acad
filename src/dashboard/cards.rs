//! Summary components shown above the dashboard charts:
//! - The total amount spent
//! - Spending against the budget for each category
//! - The most recently recorded transactions

use maud::{Markup, html};

use crate::{
    aggregation::CategorySummary,
    endpoints,
    html::{
        CARD_STYLE, CATEGORY_BADGE_STYLE, LINK_STYLE, TABLE_CELL_STYLE, TABLE_HEADER_STYLE,
        TABLE_ROW_STYLE, format_currency,
    },
    transaction::Transaction,
};

/// How many of the latest transactions are listed on the dashboard.
pub(super) const RECENT_TRANSACTION_COUNT: usize = 5;

pub(super) fn total_expenses_card(total: f64) -> Markup {
    html!(
        div id="total-expenses" class=(CARD_STYLE)
        {
            h3 class="text-sm font-medium text-gray-500 dark:text-gray-400"
            {
                "Total Expenses"
            }

            p class="mt-1 text-3xl font-semibold" { (format_currency(total)) }
        }
    )
}

/// A table comparing the amount spent in each category against its budget.
///
/// Rows for overspent categories are highlighted.
pub(super) fn category_breakdown_table(categories: &[CategorySummary]) -> Markup {
    html!(
        div id="category-breakdown" class=(CARD_STYLE)
        {
            h3 class="text-xl font-semibold mb-4" { "Spending by Category" }

            table class="w-full text-sm text-left rtl:text-right
                text-gray-500 dark:text-gray-400"
            {
                thead class=(TABLE_HEADER_STYLE)
                {
                    tr
                    {
                        th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Spent" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Budget" }
                        th scope="col" class={ (TABLE_CELL_STYLE) " text-right" } { "Remaining" }
                    }
                }

                tbody
                {
                    @for summary in categories {
                        @let remaining_style = if summary.is_overspent() {
                            "text-red-600 dark:text-red-400 font-semibold"
                        } else {
                            "text-green-700 dark:text-green-400"
                        };

                        tr class=(TABLE_ROW_STYLE) data-overspent=(summary.is_overspent())
                        {
                            td class=(TABLE_CELL_STYLE)
                            {
                                span class=(CATEGORY_BADGE_STYLE) { (summary.category) }
                            }
                            td class={ (TABLE_CELL_STYLE) " text-right" }
                            {
                                (format_currency(summary.total))
                            }
                            td class={ (TABLE_CELL_STYLE) " text-right" }
                            {
                                @if summary.budget == 0.0 {
                                    "No budget"
                                } @else {
                                    (format_currency(summary.budget))
                                }
                            }
                            td class={ (TABLE_CELL_STYLE) " text-right " (remaining_style) }
                            {
                                (format_currency(summary.remaining))
                            }
                        }
                    }
                }
            }
        }
    )
}

/// The latest `transactions`, which must already be sorted newest first.
pub(super) fn recent_transactions_list(transactions: &[Transaction]) -> Markup {
    html!(
        div id="recent-transactions" class=(CARD_STYLE)
        {
            div class="flex justify-between items-baseline mb-4"
            {
                h3 class="text-xl font-semibold" { "Recent Transactions" }

                a href=(endpoints::TRANSACTIONS_VIEW) class=(LINK_STYLE) { "View all" }
            }

            ul class="divide-y divide-gray-200 dark:divide-gray-700"
            {
                @for transaction in transactions.iter().take(RECENT_TRANSACTION_COUNT) {
                    li class="flex justify-between py-2"
                    {
                        div
                        {
                            p class="font-medium" { (transaction.description) }
                            p class="text-sm text-gray-500 dark:text-gray-400"
                            {
                                (transaction.date) " · " (transaction.category)
                            }
                        }

                        span class="font-semibold" { (format_currency(transaction.amount)) }
                    }
                }
            }
        }
    )
}
