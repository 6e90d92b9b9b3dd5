use crate::{AppState, handlers};
use axum::{Router, routing::get};

/// Authenticated Router Module
///
/// Routes for any user who passed the authentication layer. Every handler
/// here relies on the `AuthUser` extractor middleware on the router layer
/// above this module, so each receives a validated identity with the current
/// role and premium flag.
pub fn authenticated_routes() -> Router<AppState> {
    Router::<AppState>::new()
        // GET /api/user/premium-status
        // Polled by the frontend; reads the entitlement flag fresh each time.
        .route(
            "/api/user/premium-status",
            get(handlers::get_premium_status),
        )
        // GET/PUT /api/user/profile
        // Profile read and partial update. The PUT validates every provided
        // field before anything is written.
        .route(
            "/api/user/profile",
            get(handlers::get_profile).put(handlers::update_profile),
        )
        // GET /api/user/subscription
        // The subscription page polls this on a 30-second cadence and on
        // tab-visibility regained.
        .route("/api/user/subscription", get(handlers::get_subscription))
}
