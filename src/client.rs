use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{
    CallToAction, CategoryListResponse, ExamCategory, ExamName, ExamNameListResponse, ExamYear,
    ExamYearListResponse, NavigationMenu, PremiumStatusResponse, PromoDecision,
    SubscriptionStatus, TestSeries, TestSeriesListResponse, UpdateProfileRequest, UserProfile,
};
use crate::nav::HOME_ROUTE;

/// Per-request timeout. A hung backend surfaces as a fetch error instead of
/// a spinner that never resolves.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// ClientError
///
/// A failed fetch. Deliberately distinct from an empty result set: an empty
/// level renders as an empty state, a `ClientError` renders as an error state
/// with a retry affordance.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The backend answered with a non-2xx status.
    #[error("request failed with status {0}")]
    Status(u16),

    /// Network failure, timeout, or undecodable body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// PortalApi
///
/// Abstract contract for everything the frontend fetches from the backend.
/// One request/response round trip per call, no caching layer, no retries.
/// Repeated calls with no intervening mutation return identical arrays in
/// identical order.
#[async_trait]
pub trait PortalApi: Send + Sync {
    // --- Catalog Hierarchy (one call per level) ---
    async fn list_categories(&self) -> Result<Vec<ExamCategory>, ClientError>;
    async fn list_exam_names(&self, category_slug: &str) -> Result<Vec<ExamName>, ClientError>;
    async fn list_exam_years(
        &self,
        category_slug: &str,
        exam_name_slug: &str,
    ) -> Result<Vec<ExamYear>, ClientError>;
    async fn list_live_test_categories(&self) -> Result<Vec<ExamCategory>, ClientError>;
    async fn list_test_series(&self) -> Result<Vec<TestSeries>, ClientError>;

    // --- Entitlement & Navigation ---
    async fn call_to_action(&self) -> Result<CallToAction, ClientError>;
    async fn promo_decision(&self, dismissed: bool) -> Result<PromoDecision, ClientError>;
    async fn navigation(&self) -> Result<NavigationMenu, ClientError>;

    // --- Account ---
    async fn premium_status(&self) -> Result<bool, ClientError>;
    async fn get_profile(&self) -> Result<UserProfile, ClientError>;
    async fn update_profile(&self, req: UpdateProfileRequest)
    -> Result<UserProfile, ClientError>;
    async fn subscription(&self) -> Result<SubscriptionStatus, ClientError>;
}

/// ApiState
///
/// The concrete type used to share the portal API across consumers
/// (view models, the subscription watcher, tests).
pub type ApiState = Arc<dyn PortalApi>;

/// HttpPortalClient
///
/// The concrete implementation over HTTP. Carries an optional bearer token
/// for the authenticated endpoints; guests simply omit it.
#[derive(Clone)]
pub struct HttpPortalClient {
    http: reqwest::Client,
    base_url: String,
    bearer: Option<String>,
}

impl HttpPortalClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            bearer: None,
        })
    }

    /// Attach the session token issued by the auth collaborator.
    pub fn with_bearer(mut self, token: impl Into<String>) -> Self {
        self.bearer = Some(token.into());
        self
    }

    /// Sign out: drop the session credential and resolve the home route.
    /// Token revocation itself belongs to the auth collaborator.
    pub fn sign_out(&mut self) -> &'static str {
        self.bearer = None;
        HOME_ROUTE
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, format!("{}{path}", self.base_url));
        if let Some(token) = &self.bearer {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        let response = self
            .request(reqwest::Method::GET, path)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(path, error = %e, "fetch failed"))?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(path, status = status.as_u16(), "fetch returned error status");
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.json::<T>().await?)
    }
}

#[async_trait]
impl PortalApi for HttpPortalClient {
    async fn list_categories(&self) -> Result<Vec<ExamCategory>, ClientError> {
        let body: CategoryListResponse = self.get_json("/api/pyq/categories").await?;
        Ok(body.categories)
    }

    async fn list_exam_names(&self, category_slug: &str) -> Result<Vec<ExamName>, ClientError> {
        let body: ExamNameListResponse = self
            .get_json(&format!("/api/pyq/{category_slug}/exam-names"))
            .await?;
        Ok(body.exam_names)
    }

    async fn list_exam_years(
        &self,
        category_slug: &str,
        exam_name_slug: &str,
    ) -> Result<Vec<ExamYear>, ClientError> {
        let body: ExamYearListResponse = self
            .get_json(&format!("/api/pyq/{category_slug}/{exam_name_slug}/years"))
            .await?;
        Ok(body.exam_years)
    }

    async fn list_live_test_categories(&self) -> Result<Vec<ExamCategory>, ClientError> {
        let body: CategoryListResponse = self.get_json("/api/live-tests/categories").await?;
        Ok(body.categories)
    }

    async fn list_test_series(&self) -> Result<Vec<TestSeries>, ClientError> {
        let body: TestSeriesListResponse = self.get_json("/api/test-series/categories").await?;
        Ok(body.test_series)
    }

    async fn call_to_action(&self) -> Result<CallToAction, ClientError> {
        self.get_json("/api/cta").await
    }

    async fn promo_decision(&self, dismissed: bool) -> Result<PromoDecision, ClientError> {
        self.get_json(&format!("/api/promo?dismissed={dismissed}")).await
    }

    async fn navigation(&self) -> Result<NavigationMenu, ClientError> {
        self.get_json("/api/navigation").await
    }

    async fn premium_status(&self) -> Result<bool, ClientError> {
        let body: PremiumStatusResponse = self.get_json("/api/user/premium-status").await?;
        Ok(body.is_premium)
    }

    async fn get_profile(&self) -> Result<UserProfile, ClientError> {
        self.get_json("/api/user/profile").await
    }

    async fn update_profile(
        &self,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile, ClientError> {
        let response = self
            .request(reqwest::Method::PUT, "/api/user/profile")
            .json(&req)
            .send()
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "profile update failed"))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Status(status.as_u16()));
        }

        Ok(response.json::<UserProfile>().await?)
    }

    async fn subscription(&self) -> Result<SubscriptionStatus, ClientError> {
        self.get_json("/api/user/subscription").await
    }
}

/// MockPortalApi
///
/// In-memory implementation of `PortalApi` used for unit tests and view-model
/// development without a network. Canned data in, profile updates applied to
/// a shared profile record so round trips observe their own writes.
pub struct MockPortalApi {
    /// When true, every operation returns a simulated transport failure.
    pub should_fail: bool,
    pub categories: Vec<ExamCategory>,
    pub exam_names: Vec<ExamName>,
    pub exam_years: Vec<ExamYear>,
    pub test_series: Vec<TestSeries>,
    pub subscription: SubscriptionStatus,
    pub profile: Mutex<UserProfile>,
}

impl Default for MockPortalApi {
    fn default() -> Self {
        Self {
            should_fail: false,
            categories: vec![],
            exam_names: vec![],
            exam_years: vec![],
            test_series: vec![],
            subscription: SubscriptionStatus::default(),
            profile: Mutex::new(UserProfile::default()),
        }
    }
}

impl MockPortalApi {
    pub fn new_failing() -> Self {
        Self {
            should_fail: true,
            ..Self::default()
        }
    }

    fn check(&self) -> Result<(), ClientError> {
        if self.should_fail {
            // A fixed status stands in for any transport/server failure.
            return Err(ClientError::Status(500));
        }
        Ok(())
    }
}

#[async_trait]
impl PortalApi for MockPortalApi {
    async fn list_categories(&self) -> Result<Vec<ExamCategory>, ClientError> {
        self.check()?;
        Ok(self.categories.clone())
    }

    async fn list_exam_names(&self, _category_slug: &str) -> Result<Vec<ExamName>, ClientError> {
        self.check()?;
        Ok(self.exam_names.clone())
    }

    async fn list_exam_years(
        &self,
        _category_slug: &str,
        _exam_name_slug: &str,
    ) -> Result<Vec<ExamYear>, ClientError> {
        self.check()?;
        Ok(self.exam_years.clone())
    }

    async fn list_live_test_categories(&self) -> Result<Vec<ExamCategory>, ClientError> {
        self.check()?;
        Ok(self.categories.clone())
    }

    async fn list_test_series(&self) -> Result<Vec<TestSeries>, ClientError> {
        self.check()?;
        Ok(self.test_series.clone())
    }

    async fn call_to_action(&self) -> Result<CallToAction, ClientError> {
        self.check()?;
        Ok(CallToAction::default())
    }

    async fn promo_decision(&self, _dismissed: bool) -> Result<PromoDecision, ClientError> {
        self.check()?;
        Ok(PromoDecision::default())
    }

    async fn navigation(&self) -> Result<NavigationMenu, ClientError> {
        self.check()?;
        Ok(crate::nav::navigation_menu())
    }

    async fn premium_status(&self) -> Result<bool, ClientError> {
        self.check()?;
        Ok(self.subscription.is_premium)
    }

    async fn get_profile(&self) -> Result<UserProfile, ClientError> {
        self.check()?;
        Ok(self.profile.lock().expect("profile lock").clone())
    }

    async fn update_profile(
        &self,
        req: UpdateProfileRequest,
    ) -> Result<UserProfile, ClientError> {
        self.check()?;
        let mut profile = self.profile.lock().expect("profile lock");
        if req.name.is_some() {
            profile.name = req.name;
        }
        if req.city.is_some() {
            profile.city = req.city;
        }
        if req.state.is_some() {
            profile.state = req.state;
        }
        if req.phone.is_some() {
            profile.phone = req.phone;
        }
        Ok(profile.clone())
    }

    async fn subscription(&self) -> Result<SubscriptionStatus, ClientError> {
        self.check()?;
        Ok(self.subscription.clone())
    }
}
