use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use ts_rs::TS;
use utoipa::ToSchema;
use uuid::Uuid;

// --- Core Application Schemas (Mapped to Database) ---

/// User
///
/// The user's canonical identity record stored in the `public.profiles` table.
/// Resolved on every authenticated request to pick up the current role and
/// premium flag (both can change server-side after the token was issued).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[ts(export)]
pub struct User {
    // Primary Key, also the Foreign Key to the external auth provider's user table.
    pub id: Uuid,
    pub email: String,
    // The RBAC field: 'user', 'admin' or 'owner'.
    pub role: String,
    // Entitlement flag maintained by the payment/subscription collaborator.
    pub is_premium: bool,
}

/// ExamCategory
///
/// Top level of the catalog hierarchy (SSC, Banking, Railways, ...).
/// The `slug` is the sole routing key; numeric IDs never appear in URLs.
/// `child_count` is denormalized by the backend query and never recomputed
/// by consumers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExamCategory {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub child_count: i64,
}

/// ExamName
///
/// Second level of the PYQ hierarchy: a concrete exam within a category
/// (e.g. "CGL" under "ssc"). `year_count` counts the years beneath it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExamName {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub category_slug: String,
    pub year_count: i64,
}

/// ExamYear
///
/// Leaf of the PYQ hierarchy: one year of papers for a given exam name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExamYear {
    pub id: Uuid,
    pub year: i32,
    pub is_active: bool,
    pub exam_count: i64,
    pub exam_name_slug: String,
    pub category_slug: String,
}

/// TestSeries
///
/// A purchasable (or free) bundle of mock tests attached to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TestSeries {
    pub id: Uuid,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_free: bool,
    pub is_active: bool,
    pub category_slug: String,
    pub exam_count: i64,
}

// --- Response Envelopes (Wire Compatibility) ---
// The React frontend consumes these exact envelope keys.

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CategoryListResponse {
    pub categories: Vec<ExamCategory>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExamNameListResponse {
    pub exam_names: Vec<ExamName>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ExamYearListResponse {
    pub exam_years: Vec<ExamYear>,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TestSeriesListResponse {
    pub test_series: Vec<TestSeries>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PremiumStatusResponse {
    pub is_premium: bool,
}

// --- Profile & Subscription Schemas ---

/// UserProfile
///
/// Output schema for the authenticated user's profile (GET /api/user/profile).
/// Contact fields are optional until the user first saves them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub id: Uuid,
    pub email: String,
    pub role: String,
    pub is_premium: bool,
    pub name: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub phone: Option<String>,
}

/// UpdateProfileRequest
///
/// Partial update payload for PUT /api/user/profile. `Option<T>` fields plus
/// `skip_serializing_if` keep the JSON payload to only the fields being
/// changed; the repository applies them with COALESCE.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct UpdateProfileRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// SubscriptionStatus
///
/// Output schema for GET /api/user/subscription. This is the payload the
/// frontend polls every 30 seconds on the subscription page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS, ToSchema, FromRow, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct SubscriptionStatus {
    pub is_premium: bool,
    pub plan: Option<String>,
    #[ts(type = "string | null")]
    pub activated_at: Option<DateTime<Utc>>,
    #[ts(type = "string | null")]
    pub expires_at: Option<DateTime<Utc>>,
}

// --- Derived Schemas (Never Persisted) ---

/// CallToAction
///
/// The single primary button descriptor derived from the session. The
/// destination is either a client route or the sentinel `"open-modal"`,
/// which instructs the frontend to open the premium-purchase modal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct CallToAction {
    pub label: String,
    pub destination: String,
}

/// PromoDecision
///
/// Whether the premium promotional popup should be shown, together with the
/// timing the frontend applies (delayed appearance, auto-dismiss).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct PromoDecision {
    pub show: bool,
    pub delay_ms: u64,
    pub auto_dismiss_ms: u64,
}

// --- Navigation Schemas ---

/// NavLink
///
/// One entry in a navigation dropdown: a display label and a client route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NavLink {
    pub label: String,
    pub route: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NavSection {
    pub label: String,
    pub items: Vec<NavLink>,
}

/// NavigationMenu
///
/// The full menu table served at GET /api/navigation. Desktop and mobile
/// navigation variants both consume this single source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct NavigationMenu {
    pub sections: Vec<NavSection>,
}

// --- Admin Schemas ---

/// CatalogStats
///
/// Output schema for the administrative catalog dashboard
/// (GET /admin/catalog/stats).
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CatalogStats {
    pub total_categories: i64,
    pub total_exam_names: i64,
    pub total_test_series: i64,
    /// Entries currently hidden from public listings (`is_active = false`).
    pub inactive_entries: i64,
}

// --- Validation Schemas ---

/// FieldError
///
/// A single per-field validation failure, surfaced inline under the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS, ToSchema)]
#[ts(export)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// ValidationErrorResponse
///
/// Body of a 422 response when a profile submit contains invalid fields.
/// The submit is rejected wholesale; nothing is written.
#[derive(Debug, Clone, Serialize, Deserialize, TS, ToSchema, Default)]
#[ts(export)]
pub struct ValidationErrorResponse {
    pub errors: Vec<FieldError>,
}
