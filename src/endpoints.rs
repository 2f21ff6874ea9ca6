//! The API endpoints URIs.
//!
//! For endpoints that take a parameter, e.g., '/api/transactions/{transaction_id}',
//! use [format_endpoint].

use crate::transaction::TransactionId;

/// The route for the transaction list and dashboard for the current filter and page.
pub const VIEW: &str = "/api/view";
/// The route to create a transaction or delete every transaction.
pub const TRANSACTIONS: &str = "/api/transactions";
/// The route to edit or delete a single transaction.
pub const TRANSACTION: &str = "/api/transactions/{transaction_id}";
/// The route to set or clear the transaction filter.
pub const FILTER: &str = "/api/filter";
/// The route to jump to a page of the transaction list.
pub const PAGE: &str = "/api/page";
/// The route to go to the next page of the transaction list.
pub const NEXT_PAGE: &str = "/api/page/next";
/// The route to go to the previous page of the transaction list.
pub const PREV_PAGE: &str = "/api/page/prev";
/// The route for the dashboard chart options.
pub const CHARTS: &str = "/api/charts";
/// The route to download every transaction as JSON.
pub const EXPORT: &str = "/api/export";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter is the first text wrapped in braces, e.g. '{transaction_id}' in
/// '/api/transactions/{transaction_id}'. If there is no parameter, the
/// original `endpoint_path` is returned.
pub fn format_endpoint(endpoint_path: &str, id: TransactionId) -> String {
    let Some(param_start) = endpoint_path.find('{') else {
        return endpoint_path.to_owned();
    };

    let param_end = endpoint_path[param_start..]
        .find('}')
        .map_or(endpoint_path.len(), |end| param_start + end + 1);

    format!(
        "{}{id}{}",
        &endpoint_path[..param_start],
        &endpoint_path[param_end..]
    )
}

#[cfg(test)]
mod endpoints_tests {
    use axum::http::Uri;

    use crate::endpoints;

    use super::format_endpoint;

    fn assert_endpoint_is_valid_uri(uri: &str) {
        assert!(uri.parse::<Uri>().is_ok(), "{uri} is not a valid URI");
    }

    #[test]
    fn endpoints_are_valid_uris() {
        assert_endpoint_is_valid_uri(endpoints::VIEW);
        assert_endpoint_is_valid_uri(endpoints::TRANSACTIONS);
        assert_endpoint_is_valid_uri(&format_endpoint(endpoints::TRANSACTION, 1_705_312_800_000));
        assert_endpoint_is_valid_uri(endpoints::FILTER);
        assert_endpoint_is_valid_uri(endpoints::PAGE);
        assert_endpoint_is_valid_uri(endpoints::NEXT_PAGE);
        assert_endpoint_is_valid_uri(endpoints::PREV_PAGE);
        assert_endpoint_is_valid_uri(endpoints::CHARTS);
        assert_endpoint_is_valid_uri(endpoints::EXPORT);
    }

    #[test]
    fn replaces_transaction_id() {
        assert_eq!(
            format_endpoint(endpoints::TRANSACTION, 42),
            "/api/transactions/42"
        );
    }

    #[test]
    fn replaces_parameter_in_middle() {
        assert_eq!(format_endpoint("/api/{id}/edit", 7), "/api/7/edit");
    }

    #[test]
    fn returns_original_path_with_no_parameter() {
        assert_eq!(
            format_endpoint(endpoints::TRANSACTIONS, 1),
            endpoints::TRANSACTIONS
        );
    }
}
