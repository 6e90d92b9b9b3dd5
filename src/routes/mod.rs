/// Router Module Index
///
/// Organizes the routing logic into security-segregated modules so access
/// control is applied explicitly at the module level via Axum layers.

/// Routes accessible to all visitors: the catalog hierarchy, the navigation
/// menu, and the session-derived CTA/promo endpoints (which accept an
/// optional credential).
pub mod public;

/// Routes protected by the `AuthUser` extractor middleware.
/// Requires a validated user session.
pub mod authenticated;

/// Routes restricted to users with a staff role ('admin' or 'owner').
pub mod admin;
