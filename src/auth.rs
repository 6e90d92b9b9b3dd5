use axum::{
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, header, request::Parts},
};
use jsonwebtoken::{DecodingKey, Validation, decode, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    config::{AppConfig, Env},
    repository::RepositoryState,
};

/// Claims
///
/// The payload structure expected inside a JSON Web Token issued by the
/// external auth collaborator. Validated on every authenticated request.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (sub): the UUID of the user, the primary key used to fetch
    /// the user's role and premium flag from `public.profiles`.
    pub sub: Uuid,
    /// Expiration time (exp): timestamp after which the token is rejected.
    pub exp: usize,
    /// Issued at (iat): timestamp when the token was issued.
    pub iat: usize,
}

/// AuthUser
///
/// The resolved identity of an authenticated request. The role and premium
/// flag are read fresh from the database so entitlement changes (an upgrade
/// completing, an admin demotion) take effect without re-issuing tokens.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub id: Uuid,
    /// 'user', 'admin' or 'owner'. Used for role-gated routing.
    pub role: String,
    /// Current premium entitlement, owned by the subscription collaborator.
    pub is_premium: bool,
}

/// AuthUser extractor.
///
/// 1. Local bypass: in `Env::Local`, a known user UUID in the `x-user-id`
///    header authenticates directly (the UUID must still resolve to a row).
/// 2. Bearer token extraction and JWT decoding against the configured secret.
/// 3. Database lookup for the current role/premium flag; a deleted user is
///    rejected even when their token is still valid.
///
/// Rejection: 401 Unauthorized on any failure.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let repo = RepositoryState::from_ref(state);
        let config = AppConfig::from_ref(state);

        // Local development bypass, guarded by the Env check.
        if config.env == Env::Local {
            if let Some(user_id_header) = parts.headers.get("x-user-id") {
                if let Ok(id_str) = user_id_header.to_str() {
                    if let Ok(user_id) = Uuid::parse_str(id_str) {
                        if let Some(user) = repo.get_user(user_id).await {
                            return Ok(AuthUser {
                                id: user.id,
                                role: user.role,
                                is_premium: user.is_premium,
                            });
                        }
                    }
                }
            }
        }
        // Production, or the bypass did not resolve: standard JWT flow.

        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let decoding_key = DecodingKey::from_secret(config.jwt_secret.as_bytes());

        let mut validation = Validation::default();
        validation.validate_exp = true;

        let token_data = match decode::<Claims>(token, &decoding_key, &validation) {
            Ok(data) => data,
            Err(e) => {
                match e.kind() {
                    // Expired tokens are the common failure for a returning user.
                    ErrorKind::ExpiredSignature => return Err(StatusCode::UNAUTHORIZED),
                    _ => return Err(StatusCode::UNAUTHORIZED),
                }
            }
        };

        let user = repo
            .get_user(token_data.claims.sub)
            .await
            .ok_or(StatusCode::UNAUTHORIZED)?;

        Ok(AuthUser {
            id: user.id,
            role: user.role,
            is_premium: user.is_premium,
        })
    }
}

/// OptionalAuthUser
///
/// Wrapper extractor for endpoints that serve both guests and signed-in users
/// (the CTA and promo-eligibility endpoints). A missing or invalid credential
/// resolves to `None` instead of rejecting the request.
#[derive(Debug, Clone)]
pub struct OptionalAuthUser(pub Option<AuthUser>);

impl<S> FromRequestParts<S> for OptionalAuthUser
where
    S: Send + Sync,
    RepositoryState: FromRef<S>,
    AppConfig: FromRef<S>,
{
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        Ok(OptionalAuthUser(
            AuthUser::from_request_parts(parts, state).await.ok(),
        ))
    }
}
