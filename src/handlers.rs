use crate::{
    AppState,
    auth::{AuthUser, OptionalAuthUser},
    entitlement::{Session, resolve_call_to_action, resolve_promo},
    error::ApiError,
    models::{
        CallToAction, CatalogStats, CategoryListResponse, ExamCategory, ExamNameListResponse,
        ExamYearListResponse, NavigationMenu, PremiumStatusResponse, PromoDecision,
        SubscriptionStatus, TestSeries, TestSeriesListResponse, UpdateProfileRequest, UserProfile,
    },
    nav, ordering,
    validation::validate_profile,
};
use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

/// PromoQuery
///
/// Query parameters for the promo-eligibility endpoint. `dismissed` is the
/// device-local persisted dismissal flag, owned and supplied by the client.
#[derive(Deserialize, utoipa::IntoParams)]
pub struct PromoQuery {
    pub dismissed: Option<bool>,
}

fn is_staff(role: &str) -> bool {
    role == "admin" || role == "owner"
}

// --- Catalog Hierarchy Handlers ---

/// list_pyq_categories
///
/// [Public Route] Top level of the PYQ hierarchy. Categories come back in
/// the fixed popularity ordering, unranked entries alphabetical.
#[utoipa::path(
    get,
    path = "/api/pyq/categories",
    responses((status = 200, description = "PYQ categories", body = CategoryListResponse))
)]
pub async fn list_pyq_categories(State(state): State<AppState>) -> Json<CategoryListResponse> {
    let mut categories = state.repo.list_categories().await;
    ordering::sort_categories(&mut categories);
    Json(CategoryListResponse { categories })
}

/// list_exam_names
///
/// [Public Route] Exam names beneath a category, resolved by slug from the
/// route. An unknown slug yields an empty list, same as a category with no
/// exams yet.
#[utoipa::path(
    get,
    path = "/api/pyq/{category}/exam-names",
    params(("category" = String, Path, description = "Category slug")),
    responses((status = 200, description = "Exam names", body = ExamNameListResponse))
)]
pub async fn list_exam_names(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> Json<ExamNameListResponse> {
    let exam_names = state.repo.list_exam_names(&category).await;
    Json(ExamNameListResponse { exam_names })
}

/// list_exam_years
///
/// [Public Route] Years beneath an exam name, newest first, each carrying
/// its paper count.
#[utoipa::path(
    get,
    path = "/api/pyq/{category}/{examName}/years",
    params(
        ("category" = String, Path, description = "Category slug"),
        ("examName" = String, Path, description = "Exam name slug")
    ),
    responses((status = 200, description = "Exam years", body = ExamYearListResponse))
)]
pub async fn list_exam_years(
    State(state): State<AppState>,
    Path((category, exam_name)): Path<(String, String)>,
) -> Json<ExamYearListResponse> {
    let exam_years = state.repo.list_exam_years(&category, &exam_name).await;
    Json(ExamYearListResponse { exam_years })
}

/// list_live_test_categories
///
/// [Public Route] Live-test category listing, same shape and ordering rule
/// as the PYQ categories.
#[utoipa::path(
    get,
    path = "/api/live-tests/categories",
    responses((status = 200, description = "Live test categories", body = CategoryListResponse))
)]
pub async fn list_live_test_categories(
    State(state): State<AppState>,
) -> Json<CategoryListResponse> {
    let mut categories = state.repo.list_live_test_categories().await;
    ordering::sort_categories(&mut categories);
    Json(CategoryListResponse { categories })
}

/// list_test_series
///
/// [Public Route] Active test series grouped under the popularity ordering
/// of their owning categories.
#[utoipa::path(
    get,
    path = "/api/test-series/categories",
    responses((status = 200, description = "Test series", body = TestSeriesListResponse))
)]
pub async fn list_test_series(State(state): State<AppState>) -> Json<TestSeriesListResponse> {
    let mut test_series = state.repo.list_test_series().await;
    ordering::sort_test_series(&mut test_series);
    Json(TestSeriesListResponse { test_series })
}

// --- Entitlement & Navigation Handlers ---

/// get_cta
///
/// [Public Route, optional auth] The single call-to-action descriptor for
/// the current session. Every page consumes this instead of re-deriving the
/// branch logic locally.
#[utoipa::path(
    get,
    path = "/api/cta",
    responses((status = 200, description = "Call to action", body = CallToAction))
)]
pub async fn get_cta(OptionalAuthUser(user): OptionalAuthUser) -> Json<CallToAction> {
    let session = Session::of(user.as_ref());
    Json(resolve_call_to_action(&session))
}

/// get_promo
///
/// [Public Route, optional auth] Whether the premium promotional popup
/// should be shown, given the session and the device-local dismissal flag.
#[utoipa::path(
    get,
    path = "/api/promo",
    params(PromoQuery),
    responses((status = 200, description = "Promo decision", body = PromoDecision))
)]
pub async fn get_promo(
    OptionalAuthUser(user): OptionalAuthUser,
    Query(query): Query<PromoQuery>,
) -> Json<PromoDecision> {
    let session = Session::of(user.as_ref());
    Json(resolve_promo(&session, query.dismissed.unwrap_or(false)))
}

/// get_navigation
///
/// [Public Route] The static menu table consumed by both navigation
/// variants. Unmapped categories fall back to the catalog index route.
#[utoipa::path(
    get,
    path = "/api/navigation",
    responses((status = 200, description = "Navigation menu", body = NavigationMenu))
)]
pub async fn get_navigation() -> Json<NavigationMenu> {
    Json(nav::navigation_menu())
}

// --- Account Handlers ---

/// get_premium_status
///
/// [Authenticated Route] Current premium entitlement, read fresh so an
/// upgrade completing server-side is visible on the next poll.
#[utoipa::path(
    get,
    path = "/api/user/premium-status",
    responses((status = 200, description = "Premium status", body = PremiumStatusResponse))
)]
pub async fn get_premium_status(
    AuthUser { is_premium, .. }: AuthUser,
) -> Json<PremiumStatusResponse> {
    Json(PremiumStatusResponse { is_premium })
}

/// get_profile
///
/// [Authenticated Route] The authenticated user's profile record.
#[utoipa::path(
    get,
    path = "/api/user/profile",
    responses((status = 200, description = "Profile", body = UserProfile))
)]
pub async fn get_profile(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<UserProfile>, ApiError> {
    match state.repo.get_profile(id).await {
        Some(profile) => Ok(Json(profile)),
        None => Err(ApiError::NotFound),
    }
}

/// update_profile
///
/// [Authenticated Route] Partial profile update. Every provided field must
/// pass validation or the whole submit is rejected with per-field errors and
/// nothing is written.
#[utoipa::path(
    put,
    path = "/api/user/profile",
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Updated", body = UserProfile),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn update_profile(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    validate_profile(&payload).map_err(ApiError::Validation)?;

    match state.repo.update_profile(id, payload).await {
        Some(profile) => Ok(Json(profile)),
        None => Err(ApiError::NotFound),
    }
}

/// get_subscription
///
/// [Authenticated Route] Latest subscription record. A user who never
/// subscribed gets the free-tier default rather than a 404, so the polling
/// page renders uniformly.
#[utoipa::path(
    get,
    path = "/api/user/subscription",
    responses((status = 200, description = "Subscription status", body = SubscriptionStatus))
)]
pub async fn get_subscription(
    AuthUser { id, .. }: AuthUser,
    State(state): State<AppState>,
) -> Json<SubscriptionStatus> {
    let status = state
        .repo
        .get_subscription(id)
        .await
        .unwrap_or_default();
    Json(status)
}

// --- Admin Handlers ---

/// get_catalog_stats
///
/// [Admin Route] Counters for the catalog oversight dashboard.
#[utoipa::path(
    get,
    path = "/admin/catalog/stats",
    responses(
        (status = 200, description = "Catalog stats", body = CatalogStats),
        (status = 403, description = "Staff role required")
    )
)]
pub async fn get_catalog_stats(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
) -> Result<Json<CatalogStats>, ApiError> {
    if !is_staff(&role) {
        return Err(ApiError::Forbidden);
    }
    Ok(Json(state.repo.get_catalog_stats().await))
}

/// set_category_status
///
/// [Admin Route] Publish or hide a category. Hidden categories disappear
/// from public listings but keep their children intact.
#[utoipa::path(
    put,
    path = "/admin/categories/{slug}/status",
    params(("slug" = String, Path, description = "Category slug")),
    request_body = bool,
    responses(
        (status = 200, description = "Updated", body = ExamCategory),
        (status = 403, description = "Staff role required"),
        (status = 404, description = "Unknown slug")
    )
)]
pub async fn set_category_status(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(is_active): Json<bool>,
) -> Result<Json<ExamCategory>, ApiError> {
    if !is_staff(&role) {
        return Err(ApiError::Forbidden);
    }
    match state.repo.set_category_status(&slug, is_active).await {
        Some(category) => Ok(Json(category)),
        None => Err(ApiError::NotFound),
    }
}

/// set_series_status
///
/// [Admin Route] Publish or hide a test series.
#[utoipa::path(
    put,
    path = "/admin/test-series/{slug}/status",
    params(("slug" = String, Path, description = "Series slug")),
    request_body = bool,
    responses(
        (status = 200, description = "Updated", body = TestSeries),
        (status = 403, description = "Staff role required"),
        (status = 404, description = "Unknown slug")
    )
)]
pub async fn set_series_status(
    AuthUser { role, .. }: AuthUser,
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(is_active): Json<bool>,
) -> Result<Json<TestSeries>, ApiError> {
    if !is_staff(&role) {
        return Err(ApiError::Forbidden);
    }
    match state.repo.set_series_status(&slug, is_active).await {
        Some(series) => Ok(Json(series)),
        None => Err(ApiError::NotFound),
    }
}
