use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Public Router Module
///
/// Unauthenticated endpoints, accessible to any client. Catalog listings
/// exclude inactive entries at the repository level; the CTA and promo
/// endpoints resolve an optional credential to the guest session when absent.
pub fn public_routes() -> Router<AppState> {
    Router::new()
        // GET /health
        // Unauthenticated endpoint for monitoring and load balancer checks.
        .route("/health", get(|| async { "ok" }))
        // GET /api/pyq/categories
        // Top level of the PYQ hierarchy, in the fixed popularity ordering.
        .route("/api/pyq/categories", get(handlers::list_pyq_categories))
        // GET /api/pyq/{category}/exam-names
        // Second level: exam names beneath a category slug.
        .route(
            "/api/pyq/{category}/exam-names",
            get(handlers::list_exam_names),
        )
        // GET /api/pyq/{category}/{examName}/years
        // Leaf level: years beneath an exam name, newest first.
        .route(
            "/api/pyq/{category}/{exam_name}/years",
            get(handlers::list_exam_years),
        )
        // GET /api/live-tests/categories
        .route(
            "/api/live-tests/categories",
            get(handlers::list_live_test_categories),
        )
        // GET /api/test-series/categories
        .route(
            "/api/test-series/categories",
            get(handlers::list_test_series),
        )
        // GET /api/navigation
        // The shared menu table for desktop and mobile navigation.
        .route("/api/navigation", get(handlers::get_navigation))
        // GET /api/cta
        // The session-derived call-to-action descriptor.
        .route("/api/cta", get(handlers::get_cta))
        // GET /api/promo?dismissed=
        // Promo popup eligibility given the device-local dismissal flag.
        .route("/api/promo", get(handlers::get_promo))
}
