//! Dashboard module
//!
//! Provides an overview page showing spending summaries and charts, and warns
//! when categories are over budget.

mod cards;
mod charts;
mod handlers;

pub use handlers::get_dashboard_page;
