//! Dashboard module
//!
//! Provides the transaction list view, the summary and footer totals, and the
//! chart options, along with the handlers for changing the filter and page.

mod aggregation;
mod charts;
mod controls;
mod handlers;

pub use aggregation::{
    FooterStats, MonthlyTotal, MonthlyTotals, Summary, expense_by_category, filtered_total,
    footer_stats, monthly_totals, summary,
};
pub use charts::ChartOptions;
pub use controls::{
    clear_filter_endpoint, next_page_endpoint, prev_page_endpoint, set_filter_endpoint,
    set_page_endpoint,
};
pub use handlers::{get_charts_endpoint, get_view_endpoint};
