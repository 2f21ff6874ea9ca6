//! Route handlers for changing the filter and the page of the transaction list.
//!
//! Each handler responds with the updated [View].

use axum::extract::State;
use serde::Deserialize;

use crate::{
    Error,
    dashboard::handlers::DashboardState,
    extract::Json,
    filter::FilterSpec,
    timezone::local_today,
    tracker::{View, lock_tracker},
};

/// The request body for jumping to a page.
#[derive(Debug, Deserialize)]
pub struct PageForm {
    /// The page to show, counting from 1.
    pub page: usize,
}

/// Replace the filter and go back to the first page.
pub async fn set_filter_endpoint(
    State(state): State<DashboardState>,
    Json(filter): Json<FilterSpec>,
) -> Result<Json<View>, Error> {
    let mut tracker = lock_tracker(&state.tracker)?;
    tracker.set_filter(filter);

    state.current_view(&tracker)
}

/// Show every transaction and go back to the first page.
pub async fn clear_filter_endpoint(
    State(state): State<DashboardState>,
) -> Result<Json<View>, Error> {
    let mut tracker = lock_tracker(&state.tracker)?;
    tracker.clear_filter();

    state.current_view(&tracker)
}

/// Jump to a page. Pages below 1 go to the first page.
pub async fn set_page_endpoint(
    State(state): State<DashboardState>,
    Json(form): Json<PageForm>,
) -> Result<Json<View>, Error> {
    let mut tracker = lock_tracker(&state.tracker)?;
    tracker.set_page(form.page);

    state.current_view(&tracker)
}

/// Go to the next page, unless already on the last page.
pub async fn next_page_endpoint(State(state): State<DashboardState>) -> Result<Json<View>, Error> {
    let today = local_today(&state.local_timezone)?;
    let mut tracker = lock_tracker(&state.tracker)?;
    tracker.next_page(today);

    Ok(Json(tracker.view(today)))
}

/// Go to the previous page, unless already on the first page.
pub async fn prev_page_endpoint(State(state): State<DashboardState>) -> Result<Json<View>, Error> {
    let mut tracker = lock_tracker(&state.tracker)?;
    tracker.prev_page();

    state.current_view(&tracker)
}
