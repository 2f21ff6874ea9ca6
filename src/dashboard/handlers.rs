//! Dashboard HTTP handlers.
//!
//! This module contains:
//! - The route handler for the transaction list and dashboard totals
//! - The route handler for the chart options
//! - The state used by the dashboard and list control handlers

use std::sync::{Arc, Mutex};

use axum::extract::{FromRef, State};

use crate::{
    AppState, Error,
    dashboard::ChartOptions,
    extract::Json,
    timezone::local_today,
    tracker::{ExpenseTracker, View, lock_tracker},
};

/// The state needed for the transaction list and dashboard.
///
/// Contains the tracker and the timezone that date range filters are anchored in.
#[derive(Debug, Clone)]
pub struct DashboardState {
    /// The tracker that stores the transactions and the list state.
    pub tracker: Arc<Mutex<ExpenseTracker>>,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for DashboardState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            tracker: state.tracker.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

impl DashboardState {
    /// Compute the view for today's date in the local timezone.
    pub(super) fn current_view(&self, tracker: &ExpenseTracker) -> Result<Json<View>, Error> {
        let today = local_today(&self.local_timezone)?;

        Ok(Json(tracker.view(today)))
    }
}

/// Display the current page of filtered transactions along with the summary
/// cards and the totals for the charts and footer.
pub async fn get_view_endpoint(State(state): State<DashboardState>) -> Result<Json<View>, Error> {
    let tracker = lock_tracker(&state.tracker)?;

    state.current_view(&tracker)
}

/// Get the ECharts options for the expense distribution and monthly overview charts.
pub async fn get_charts_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<ChartOptions>, Error> {
    lock_tracker(&state.tracker)?.charts().map(Json)
}

#[cfg(test)]
mod tests {
    use axum::{Router, http::StatusCode, routing::get};
    use axum_test::TestServer;
    use time::OffsetDateTime;

    use crate::{
        dashboard::handlers::{DashboardState, get_charts_endpoint, get_view_endpoint},
        endpoints,
        test_utils::{assert_content_type, expense_form, new_test_tracker},
    };

    fn get_test_server(state: DashboardState) -> TestServer {
        let app = Router::new()
            .route(endpoints::VIEW, get(get_view_endpoint))
            .route(endpoints::CHARTS, get(get_charts_endpoint))
            .with_state(state);

        TestServer::new(app)
    }

    fn get_test_state() -> DashboardState {
        DashboardState {
            tracker: new_test_tracker(),
            local_timezone: "Etc/UTC".to_owned(),
        }
    }

    #[tokio::test]
    async fn empty_view_has_one_page_and_zero_totals() {
        let server = get_test_server(get_test_state());

        let response = server.get(endpoints::VIEW).await;

        response.assert_status_ok();
        assert_content_type(&response, "application/json");
        let view: serde_json::Value = response.json();
        assert_eq!(view["pagedRecords"], serde_json::json!([]));
        assert_eq!(view["totalPages"], 1);
        assert_eq!(view["currentPage"], 1);
        assert_eq!(view["summary"]["net"], 0.0);
        assert_eq!(view["footerStats"]["totalTransactions"], 0);
        assert_eq!(view["monthlyTotals"].as_array().map(Vec::len), Some(12));
        assert_eq!(
            view["filter"],
            serde_json::json!({"category": "all", "type": "all", "dateRange": "all"})
        );
    }

    #[tokio::test]
    async fn view_lists_transactions_for_today() {
        let state = get_test_state();
        let today = OffsetDateTime::now_utc().date().to_string();
        state
            .tracker
            .lock()
            .unwrap()
            .add_transaction(&expense_form(20.0, "Groceries", &today))
            .unwrap();
        let server = get_test_server(state);

        let view: serde_json::Value = server.get(endpoints::VIEW).await.json();

        assert_eq!(view["filteredCount"], 1);
        assert_eq!(view["filteredTotal"], -20.0);
        assert_eq!(view["pagedRecords"][0]["description"], "Groceries");
        assert_eq!(view["expenseByCategory"]["food"], 20.0);
    }

    #[tokio::test]
    async fn invalid_timezone_is_a_server_error() {
        let state = DashboardState {
            local_timezone: "Not/A_Timezone".to_owned(),
            ..get_test_state()
        };
        let server = get_test_server(state);

        server
            .get(endpoints::VIEW)
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[tokio::test]
    async fn charts_are_json_objects() {
        let state = get_test_state();
        state
            .tracker
            .lock()
            .unwrap()
            .add_transaction(&expense_form(20.0, "Groceries", "2024-01-20"))
            .unwrap();
        let server = get_test_server(state);

        let response = server.get(endpoints::CHARTS).await;

        response.assert_status_ok();
        let charts: serde_json::Value = response.json();
        assert!(charts["expenseChart"].is_object());
        assert!(charts["monthlyChart"].is_object());
    }
}
