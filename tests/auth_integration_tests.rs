mod common;

use common::{
    FREE_USER_ID, PREMIUM_USER_ID, make_expired_token, make_token, seeded_repo, spawn_app,
    test_state, test_state_with_config,
};
use prep_portal::AppConfig;
use prep_portal::config::Env;
use reqwest::StatusCode;
use uuid::Uuid;

#[tokio::test]
async fn test_missing_credentials_rejected() {
    let base = spawn_app(test_state(seeded_repo())).await;

    let response = reqwest::get(format!("{base}/api/user/premium-status"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_malformed_bearer_rejected() {
    let base = spawn_app(test_state(seeded_repo())).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/user/premium-status"))
        .header("Authorization", "Bearer not-a-jwt")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_resolves_user() {
    let config = AppConfig::default();
    let token = make_token(PREMIUM_USER_ID, &config.jwt_secret);
    let base = spawn_app(test_state_with_config(seeded_repo(), config)).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/user/premium-status"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["isPremium"], true);
}

#[tokio::test]
async fn test_expired_token_rejected() {
    let config = AppConfig::default();
    let token = make_expired_token(FREE_USER_ID, &config.jwt_secret);
    let base = spawn_app(test_state_with_config(seeded_repo(), config)).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/user/premium-status"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_token_signed_with_wrong_secret_rejected() {
    let base = spawn_app(test_state(seeded_repo())).await;
    let token = make_token(FREE_USER_ID, "some-other-secret");

    let response = reqwest::Client::new()
        .get(format!("{base}/api/user/premium-status"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_token_for_deleted_user_rejected() {
    // The token decodes fine, but the subject no longer has a profile row.
    let config = AppConfig::default();
    let token = make_token(Uuid::from_u128(0xdead), &config.jwt_secret);
    let base = spawn_app(test_state_with_config(seeded_repo(), config)).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/user/premium-status"))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_local_bypass_header_authenticates() {
    // Env::Local accepts a known user UUID in x-user-id without a token.
    let base = spawn_app(test_state(seeded_repo())).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/user/premium-status"))
        .header("x-user-id", FREE_USER_ID.to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["isPremium"], false);
}

#[tokio::test]
async fn test_local_bypass_with_unknown_user_rejected() {
    let base = spawn_app(test_state(seeded_repo())).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/user/premium-status"))
        .header("x-user-id", Uuid::from_u128(0xdead).to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_bypass_disabled_in_production() {
    let config = AppConfig {
        env: Env::Production,
        ..AppConfig::default()
    };
    let base = spawn_app(test_state_with_config(seeded_repo(), config)).await;

    let response = reqwest::Client::new()
        .get(format!("{base}/api/user/premium-status"))
        .header("x-user-id", FREE_USER_ID.to_string())
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_optional_auth_routes_serve_guests() {
    // The CTA endpoint resolves credentials optionally and never rejects.
    let base = spawn_app(test_state(seeded_repo())).await;

    let response = reqwest::get(format!("{base}/api/cta")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["label"], "Get Started");
}
