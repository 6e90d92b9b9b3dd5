use crate::models::{
    CatalogStats, ExamCategory, ExamName, ExamYear, SubscriptionStatus, TestSeries,
    UpdateProfileRequest, User, UserProfile,
};
use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

/// Repository Trait
///
/// Abstract contract for all persistence operations, letting the handlers
/// interact with the data layer without knowing the concrete implementation
/// (Postgres in production, mocks in tests).
///
/// **Send + Sync + async_trait** make the trait object (`Arc<dyn Repository>`)
/// safely shareable across Axum's asynchronous task boundaries.
#[async_trait]
pub trait Repository: Send + Sync {
    // --- Catalog Hierarchy ---
    // Public listings must exclude inactive entries. Counts are denormalized
    // here and never recomputed by consumers.
    async fn list_categories(&self) -> Vec<ExamCategory>;
    async fn list_exam_names(&self, category_slug: &str) -> Vec<ExamName>;
    async fn list_exam_years(&self, category_slug: &str, exam_name_slug: &str) -> Vec<ExamYear>;
    async fn list_live_test_categories(&self) -> Vec<ExamCategory>;
    async fn list_test_series(&self) -> Vec<TestSeries>;

    // --- User / Auth ---
    async fn get_user(&self, id: Uuid) -> Option<User>;

    // --- Profile & Subscription ---
    async fn get_profile(&self, user_id: Uuid) -> Option<UserProfile>;
    // Partial update via COALESCE; only provided fields change.
    async fn update_profile(
        &self,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Option<UserProfile>;
    // Latest subscription record, if the user ever had one.
    async fn get_subscription(&self, user_id: Uuid) -> Option<SubscriptionStatus>;

    // --- Admin Oversight ---
    async fn get_catalog_stats(&self) -> CatalogStats;
    // Moderation lever: hides/shows a node in public listings.
    async fn set_category_status(&self, slug: &str, is_active: bool) -> Option<ExamCategory>;
    async fn set_series_status(&self, slug: &str, is_active: bool) -> Option<TestSeries>;
}

/// RepositoryState
///
/// The concrete type used to share the persistence layer across the
/// application state.
pub type RepositoryState = Arc<dyn Repository>;

/// PostgresRepository
///
/// The concrete implementation of the `Repository` trait, backed by the
/// PostgreSQL database.
pub struct PostgresRepository {
    pool: PgPool,
}

impl PostgresRepository {
    /// Creates a new repository instance using the initialized connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const CATEGORY_COLUMNS: &str = r#"
    c.id, c.name, c.slug, c.description, c.is_active,
    (SELECT COUNT(*) FROM exam_names e WHERE e.category_slug = c.slug) AS child_count
"#;

#[async_trait]
impl Repository for PostgresRepository {
    /// Lists active PYQ categories with their denormalized child counts.
    /// Alphabetical here; the popularity ordering is applied above this layer
    /// so the rule lives in exactly one place.
    async fn list_categories(&self) -> Vec<ExamCategory> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM exam_categories c \
             WHERE c.is_active = true AND c.kind = 'pyq' ORDER BY c.name"
        );

        match sqlx::query_as::<_, ExamCategory>(&query)
            .fetch_all(&self.pool)
            .await
        {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!("list_categories error: {:?}", e);
                vec![]
            }
        }
    }

    /// Lists the exam names beneath a category, each with its year count.
    async fn list_exam_names(&self, category_slug: &str) -> Vec<ExamName> {
        let query = r#"
            SELECT e.id, e.name, e.slug, e.description, e.category_slug,
                   (SELECT COUNT(*) FROM exam_years y
                     WHERE y.exam_name_slug = e.slug
                       AND y.category_slug = e.category_slug) AS year_count
            FROM exam_names e
            WHERE e.category_slug = $1
            ORDER BY e.name
        "#;

        match sqlx::query_as::<_, ExamName>(query)
            .bind(category_slug)
            .fetch_all(&self.pool)
            .await
        {
            Ok(names) => names,
            Err(e) => {
                tracing::error!("list_exam_names error: {:?}", e);
                vec![]
            }
        }
    }

    /// Lists the active years beneath an exam name, newest first.
    async fn list_exam_years(&self, category_slug: &str, exam_name_slug: &str) -> Vec<ExamYear> {
        let query = r#"
            SELECT id, year, is_active, exam_count, exam_name_slug, category_slug
            FROM exam_years
            WHERE category_slug = $1 AND exam_name_slug = $2 AND is_active = true
            ORDER BY year DESC
        "#;

        match sqlx::query_as::<_, ExamYear>(query)
            .bind(category_slug)
            .bind(exam_name_slug)
            .fetch_all(&self.pool)
            .await
        {
            Ok(years) => years,
            Err(e) => {
                tracing::error!("list_exam_years error: {:?}", e);
                vec![]
            }
        }
    }

    async fn list_live_test_categories(&self) -> Vec<ExamCategory> {
        let query = format!(
            "SELECT {CATEGORY_COLUMNS} FROM exam_categories c \
             WHERE c.is_active = true AND c.kind = 'live-test' ORDER BY c.name"
        );

        match sqlx::query_as::<_, ExamCategory>(&query)
            .fetch_all(&self.pool)
            .await
        {
            Ok(categories) => categories,
            Err(e) => {
                tracing::error!("list_live_test_categories error: {:?}", e);
                vec![]
            }
        }
    }

    async fn list_test_series(&self) -> Vec<TestSeries> {
        let query = r#"
            SELECT id, name, slug, description, is_free, is_active, category_slug, exam_count
            FROM test_series
            WHERE is_active = true
            ORDER BY name
        "#;

        match sqlx::query_as::<_, TestSeries>(query)
            .fetch_all(&self.pool)
            .await
        {
            Ok(series) => series,
            Err(e) => {
                tracing::error!("list_test_series error: {:?}", e);
                vec![]
            }
        }
    }

    /// Retrieves the identity fields needed for authentication and gating.
    async fn get_user(&self, id: Uuid) -> Option<User> {
        sqlx::query_as::<_, User>(
            "SELECT id, email, role, is_premium FROM profiles WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_user error: {:?}", e);
            None
        })
    }

    async fn get_profile(&self, user_id: Uuid) -> Option<UserProfile> {
        sqlx::query_as::<_, UserProfile>(
            r#"SELECT id, email, role, is_premium, name, city, state, phone
               FROM profiles WHERE id = $1"#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_profile error: {:?}", e);
            None
        })
    }

    /// Updates the profile's contact fields. COALESCE leaves a column alone
    /// when the corresponding request field is `None`.
    async fn update_profile(
        &self,
        user_id: Uuid,
        req: UpdateProfileRequest,
    ) -> Option<UserProfile> {
        sqlx::query_as::<_, UserProfile>(
            r#"
            UPDATE profiles
            SET name  = COALESCE($2, name),
                city  = COALESCE($3, city),
                state = COALESCE($4, state),
                phone = COALESCE($5, phone)
            WHERE id = $1
            RETURNING id, email, role, is_premium, name, city, state, phone
            "#,
        )
        .bind(user_id)
        .bind(req.name)
        .bind(req.city)
        .bind(req.state)
        .bind(req.phone)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("update_profile error: {:?}", e);
            None
        })
    }

    /// Returns the user's most recent subscription record.
    async fn get_subscription(&self, user_id: Uuid) -> Option<SubscriptionStatus> {
        sqlx::query_as::<_, SubscriptionStatus>(
            r#"
            SELECT is_premium, plan, activated_at, expires_at
            FROM subscriptions
            WHERE user_id = $1
            ORDER BY activated_at DESC
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("get_subscription error: {:?}", e);
            None
        })
    }

    /// Compiles the counters for the administrative catalog dashboard.
    async fn get_catalog_stats(&self) -> CatalogStats {
        let total_categories = count(&self.pool, "SELECT COUNT(*) FROM exam_categories").await;
        let total_exam_names = count(&self.pool, "SELECT COUNT(*) FROM exam_names").await;
        let total_test_series = count(&self.pool, "SELECT COUNT(*) FROM test_series").await;
        let inactive_entries = count(
            &self.pool,
            "SELECT (SELECT COUNT(*) FROM exam_categories WHERE is_active = false)
                  + (SELECT COUNT(*) FROM test_series WHERE is_active = false)",
        )
        .await;

        CatalogStats {
            total_categories,
            total_exam_names,
            total_test_series,
            inactive_entries,
        }
    }

    async fn set_category_status(&self, slug: &str, is_active: bool) -> Option<ExamCategory> {
        let query = format!(
            "UPDATE exam_categories c SET is_active = $2 WHERE c.slug = $1 \
             RETURNING {CATEGORY_COLUMNS}"
        );

        sqlx::query_as::<_, ExamCategory>(&query)
            .bind(slug)
            .bind(is_active)
            .fetch_optional(&self.pool)
            .await
            .unwrap_or_else(|e| {
                tracing::error!("set_category_status error: {:?}", e);
                None
            })
    }

    async fn set_series_status(&self, slug: &str, is_active: bool) -> Option<TestSeries> {
        sqlx::query_as::<_, TestSeries>(
            r#"
            UPDATE test_series SET is_active = $2 WHERE slug = $1
            RETURNING id, name, slug, description, is_free, is_active, category_slug, exam_count
            "#,
        )
        .bind(slug)
        .bind(is_active)
        .fetch_optional(&self.pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("set_series_status error: {:?}", e);
            None
        })
    }
}

async fn count(pool: &PgPool, query: &str) -> i64 {
    sqlx::query_scalar::<_, i64>(query)
        .fetch_one(pool)
        .await
        .unwrap_or_else(|e| {
            tracing::error!("count query error: {:?}", e);
            0
        })
}
