//! Shared fixtures for the integration test binaries: an in-memory
//! `Repository` implementation, seeded catalog data, and helpers to stand up
//! the router on an ephemeral port and mint test JWTs.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use jsonwebtoken::{EncodingKey, Header, encode};
use prep_portal::auth::Claims;
use prep_portal::models::{
    CatalogStats, ExamCategory, ExamName, ExamYear, SubscriptionStatus, TestSeries,
    UpdateProfileRequest, User, UserProfile,
};
use prep_portal::repository::Repository;
use prep_portal::{AppConfig, AppState, create_router};
use uuid::Uuid;

// Fixed identities used across the integration suites.
pub const FREE_USER_ID: Uuid = Uuid::from_u128(0x11);
pub const PREMIUM_USER_ID: Uuid = Uuid::from_u128(0x22);
pub const ADMIN_USER_ID: Uuid = Uuid::from_u128(0x33);

/// MockRepo
///
/// In-memory stand-in for the Postgres repository. Catalog data is canned;
/// profiles live in a mutex so updates are observable by later reads.
#[derive(Default)]
pub struct MockRepo {
    pub users: Vec<User>,
    pub categories: Vec<ExamCategory>,
    pub live_categories: Vec<ExamCategory>,
    pub exam_names: Vec<ExamName>,
    pub exam_years: Vec<ExamYear>,
    pub test_series: Vec<TestSeries>,
    pub subscription: Option<SubscriptionStatus>,
    pub profiles: Mutex<HashMap<Uuid, UserProfile>>,
    pub stats: CatalogStats,
}

#[async_trait]
impl Repository for MockRepo {
    async fn list_categories(&self) -> Vec<ExamCategory> {
        self.categories
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect()
    }

    async fn list_exam_names(&self, category_slug: &str) -> Vec<ExamName> {
        self.exam_names
            .iter()
            .filter(|e| e.category_slug == category_slug)
            .cloned()
            .collect()
    }

    async fn list_exam_years(&self, category_slug: &str, exam_name_slug: &str) -> Vec<ExamYear> {
        self.exam_years
            .iter()
            .filter(|y| {
                y.category_slug == category_slug
                    && y.exam_name_slug == exam_name_slug
                    && y.is_active
            })
            .cloned()
            .collect()
    }

    async fn list_live_test_categories(&self) -> Vec<ExamCategory> {
        self.live_categories
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect()
    }

    async fn list_test_series(&self) -> Vec<TestSeries> {
        self.test_series
            .iter()
            .filter(|s| s.is_active)
            .cloned()
            .collect()
    }

    async fn get_user(&self, id: Uuid) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    async fn get_profile(&self, user_id: Uuid) -> Option<UserProfile> {
        self.profiles
            .lock()
            .expect("profiles lock")
            .get(&user_id)
            .cloned()
    }

    async fn update_profile(
        &self,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Option<UserProfile> {
        let mut profiles = self.profiles.lock().expect("profiles lock");
        let profile = profiles.get_mut(&user_id)?;
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
        Some(profile.clone())
    }

    async fn get_subscription(&self, _user_id: Uuid) -> Option<SubscriptionStatus> {
        self.subscription.clone()
    }

    async fn get_catalog_stats(&self) -> CatalogStats {
        self.stats.clone()
    }

    async fn set_category_status(&self, slug: &str, is_active: bool) -> Option<ExamCategory> {
        self.categories
            .iter()
            .chain(self.live_categories.iter())
            .find(|c| c.slug == slug)
            .cloned()
            .map(|mut c| {
                c.is_active = is_active;
                c
            })
    }

    async fn set_series_status(&self, slug: &str, is_active: bool) -> Option<TestSeries> {
        self.test_series
            .iter()
            .find(|s| s.slug == slug)
            .cloned()
            .map(|mut s| {
                s.is_active = is_active;
                s
            })
    }
}

// --- Fixture Builders ---

pub fn category(name: &str, slug: &str) -> ExamCategory {
    ExamCategory {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        is_active: true,
        child_count: 2,
    }
}

pub fn exam_name(name: &str, slug: &str, category_slug: &str) -> ExamName {
    ExamName {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        category_slug: category_slug.to_string(),
        year_count: 3,
    }
}

pub fn exam_year(year: i32, exam_name_slug: &str, category_slug: &str) -> ExamYear {
    ExamYear {
        id: Uuid::new_v4(),
        year,
        is_active: true,
        exam_count: 4,
        exam_name_slug: exam_name_slug.to_string(),
        category_slug: category_slug.to_string(),
    }
}

pub fn test_series(name: &str, slug: &str, category_slug: &str) -> TestSeries {
    TestSeries {
        id: Uuid::new_v4(),
        name: name.to_string(),
        slug: slug.to_string(),
        description: None,
        is_free: false,
        is_active: true,
        category_slug: category_slug.to_string(),
        exam_count: 10,
    }
}

fn seed_user(id: Uuid, email: &str, role: &str, is_premium: bool) -> User {
    User {
        id,
        email: email.to_string(),
        role: role.to_string(),
        is_premium,
    }
}

fn profile_for(user: &User) -> UserProfile {
    UserProfile {
        id: user.id,
        email: user.email.clone(),
        role: user.role.clone(),
        is_premium: user.is_premium,
        name: None,
        city: None,
        state: None,
        phone: None,
    }
}

/// A repository seeded with the three standard users and a small catalog.
pub fn seeded_repo() -> MockRepo {
    let users = vec![
        seed_user(FREE_USER_ID, "free@example.com", "user", false),
        seed_user(PREMIUM_USER_ID, "premium@example.com", "user", true),
        seed_user(ADMIN_USER_ID, "admin@example.com", "admin", false),
    ];

    let profiles = users.iter().map(|u| (u.id, profile_for(u))).collect();

    MockRepo {
        users,
        categories: vec![
            category("Aviation", "aviation"),
            category("Banking", "banking"),
            category("SSC Exams", "ssc"),
        ],
        live_categories: vec![category("Banking", "banking"), category("UPSC", "upsc")],
        exam_names: vec![
            exam_name("CGL", "cgl", "ssc"),
            exam_name("CHSL", "chsl", "ssc"),
        ],
        exam_years: vec![exam_year(2024, "cgl", "ssc"), exam_year(2023, "cgl", "ssc")],
        test_series: vec![
            test_series("IBPS PO Prelims", "ibps-po-prelims", "banking"),
            test_series("SSC CGL Tier 1", "ssc-cgl-tier-1", "ssc"),
        ],
        subscription: None,
        profiles: Mutex::new(profiles),
        stats: CatalogStats {
            total_categories: 5,
            total_exam_names: 2,
            total_test_series: 2,
            inactive_entries: 1,
        },
    }
}

// --- App Harness ---

pub fn test_state(repo: MockRepo) -> AppState {
    AppState {
        repo: Arc::new(repo),
        config: AppConfig::default(),
    }
}

pub fn test_state_with_config(repo: MockRepo, config: AppConfig) -> AppState {
    AppState {
        repo: Arc::new(repo),
        config,
    }
}

/// Serve the router on an ephemeral port; returns the base URL.
pub async fn spawn_app(state: AppState) -> String {
    let app = create_router(state);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server error");
    });

    format!("http://{addr}")
}

/// Mint a JWT the way the auth collaborator would.
pub fn make_token(user_id: Uuid, secret: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id,
        iat: now,
        exp: now + 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encoding")
}

/// Mint a token that expired well outside the validation leeway.
pub fn make_expired_token(user_id: Uuid, secret: &str) -> String {
    let now = chrono::Utc::now().timestamp() as usize;
    let claims = Claims {
        sub: user_id,
        iat: now - 7200,
        exp: now - 3600,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("token encoding")
}
