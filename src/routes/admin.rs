use crate::{AppState, handlers};
use axum::{
    Router,
    routing::{get, put},
};

/// Admin Router Module
///
/// Routes exclusively for staff roles ('admin' or 'owner'). The router is
/// wrapped in the authentication middleware; the staff-role check itself is
/// performed inside each handler after authentication succeeds.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        // GET /admin/catalog/stats
        // Counters for the catalog oversight dashboard.
        .route("/catalog/stats", get(handlers::get_catalog_stats))
        // PUT /admin/categories/{slug}/status
        // Publish or hide a category in public listings.
        .route(
            "/categories/{slug}/status",
            put(handlers::set_category_status),
        )
        // PUT /admin/test-series/{slug}/status
        // Publish or hide a test series.
        .route(
            "/test-series/{slug}/status",
            put(handlers::set_series_status),
        )
}
