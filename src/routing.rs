//! Application router configuration.

use axum::{
    Json, Router,
    http::StatusCode,
    routing::{get, post, put},
};

use crate::{
    AppState,
    dashboard::{
        clear_filter_endpoint, get_charts_endpoint, get_view_endpoint, next_page_endpoint,
        prev_page_endpoint, set_filter_endpoint, set_page_endpoint,
    },
    endpoints,
    error::ErrorBody,
    export::export_endpoint,
    transaction::{
        create_transaction_endpoint, delete_all_transactions_endpoint,
        delete_transaction_endpoint, edit_transaction_endpoint,
    },
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::VIEW, get(get_view_endpoint))
        .route(
            endpoints::TRANSACTIONS,
            post(create_transaction_endpoint).delete(delete_all_transactions_endpoint),
        )
        .route(
            endpoints::TRANSACTION,
            put(edit_transaction_endpoint).delete(delete_transaction_endpoint),
        )
        .route(
            endpoints::FILTER,
            put(set_filter_endpoint).delete(clear_filter_endpoint),
        )
        .route(endpoints::PAGE, put(set_page_endpoint))
        .route(endpoints::NEXT_PAGE, post(next_page_endpoint))
        .route(endpoints::PREV_PAGE, post(prev_page_endpoint))
        .route(endpoints::CHARTS, get(get_charts_endpoint))
        .route(endpoints::EXPORT, get(export_endpoint))
        .fallback(get_404_not_found)
        .with_state(state)
}

async fn get_404_not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            error: "Not found".to_owned(),
            details: "There is no endpoint at this path.".to_owned(),
        }),
    )
}
