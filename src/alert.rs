//! Alert system for displaying warnings and error messages to users.
//!
//! Alerts are rendered as HTML fragments that HTMX swaps into the page's alert
//! container (see [crate::html::base]).

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use maud::{Markup, html};

/// An alert message with a short summary and longer details.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An alert for something that needs attention but is not an error.
    Warning {
        /// The headline of the alert.
        message: String,
        /// Extra information about the alert.
        details: String,
    },
    /// An alert for an action that failed.
    Error {
        /// The headline of the alert.
        message: String,
        /// Extra information, e.g., how to fix the problem.
        details: String,
    },
}

impl Alert {
    /// Create a new warning alert
    pub fn warning(message: &str, details: &str) -> Self {
        Self::Warning {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create a new error alert
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as HTML.
    pub fn into_html(self) -> Markup {
        let (container_style, message, details) = match self {
            Alert::Warning { message, details } => (
                "text-yellow-800 border-yellow-300 bg-yellow-50 \
                dark:text-yellow-300 dark:border-yellow-800 dark:bg-gray-800",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "text-red-800 border-red-300 bg-red-50 \
                dark:text-red-400 dark:border-red-800 dark:bg-gray-800",
                message,
                details,
            ),
        };

        html!(
            div
                role="alert"
                class={ "flex items-start gap-3 p-4 mb-4 text-sm border rounded-lg " (container_style) }
            {
                div class="flex-1"
                {
                    span class="font-semibold" { (message) }

                    @if !details.is_empty() {
                        p class="mt-1" { (details) }
                    }
                }

                button
                    type="button"
                    aria-label="Close"
                    class="font-bold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        )
    }

    /// Render the alert as an HTML fragment with `status_code`.
    pub fn into_response_with_status(self, status_code: StatusCode) -> Response {
        (status_code, Html(self.into_html().into_string())).into_response()
    }
}
