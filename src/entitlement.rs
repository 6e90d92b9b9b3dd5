use crate::{
    auth::AuthUser,
    models::{CallToAction, PromoDecision},
};

/// Destination sentinel instructing the frontend to open the in-page
/// premium-purchase modal instead of navigating.
pub const OPEN_MODAL: &str = "open-modal";

/// Delay before the promotional popup appears, and how long it stays up
/// without interaction.
pub const PROMO_DELAY_MS: u64 = 3000;
pub const PROMO_AUTO_DISMISS_MS: u64 = 5000;

/// Session
///
/// Typed session state replacing the frontend's duck-typed
/// `session?.user?.isPremium` chains. Every page derives its UI state from
/// exactly one of these four variants. The session is owned by the external
/// auth collaborator; this layer only reads it.
///
/// The 'owner' role collapses into `Admin`: both are fully entitled staff
/// roles and gate identically everywhere this layer looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    /// No credential presented, or the credential failed to resolve.
    Guest,
    /// Signed in, no active premium entitlement.
    AuthenticatedFree,
    /// Signed in with an active premium entitlement.
    AuthenticatedPremium,
    /// Staff ('admin' or 'owner' role).
    Admin,
}

impl Session {
    /// Derive the session variant from an optionally resolved identity.
    pub fn of(user: Option<&AuthUser>) -> Self {
        match user {
            None => Session::Guest,
            Some(u) if u.role == "admin" || u.role == "owner" => Session::Admin,
            Some(u) if u.is_premium => Session::AuthenticatedPremium,
            Some(_) => Session::AuthenticatedFree,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        !matches!(self, Session::Guest)
    }

    /// Premium content access. Staff accounts are always entitled.
    pub fn is_entitled(&self) -> bool {
        matches!(self, Session::AuthenticatedPremium | Session::Admin)
    }
}

/// Derive the single call-to-action descriptor for the current session.
///
/// Pure: recomputed on every request, never cached, because the session is
/// refreshed on its own cadence by the auth collaborator. Rules are evaluated
/// in order, first match wins:
///
/// 1. Guest             -> "Get Started" / signup route
/// 2. Entitled          -> "Explore Now" / dashboard route
/// 3. Authenticated free -> "Start Free Trial" / open the premium modal
///
/// The free-trial branch always opens the modal. The original site mixed a
/// dead `href="#"` link with the modal depending on the page; the modal
/// behavior is applied uniformly here.
pub fn resolve_call_to_action(session: &Session) -> CallToAction {
    if !session.is_authenticated() {
        return CallToAction {
            label: "Get Started".to_string(),
            destination: "/auth/signup".to_string(),
        };
    }

    if session.is_entitled() {
        return CallToAction {
            label: "Explore Now".to_string(),
            destination: "/dashboard".to_string(),
        };
    }

    CallToAction {
        label: "Start Free Trial".to_string(),
        destination: OPEN_MODAL.to_string(),
    }
}

/// Decide whether the premium promotional popup should be shown.
///
/// Independent of the CTA rule: the popup targets guests and
/// authenticated-non-premium users only, never staff, and at most once per
/// device. The `dismissed` flag is the device-local persisted dismissal state
/// supplied by the caller; the server never stores it.
pub fn resolve_promo(session: &Session, dismissed: bool) -> PromoDecision {
    let show = !dismissed && !session.is_entitled();

    PromoDecision {
        show,
        delay_ms: PROMO_DELAY_MS,
        auto_dismiss_ms: PROMO_AUTO_DISMISS_MS,
    }
}
