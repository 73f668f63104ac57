//! Integration tests for registration, login, and token handling.

mod helpers;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::http::header::WWW_AUTHENTICATE;
use serde_json::json;

use inspecthub_auth::jwt::{INVALID_TOKEN_MESSAGE, JwtDecoder, JwtEncoder};
use inspecthub_core::config::AuthConfig;
use inspecthub_core::traits::clock::SystemClock;
use inspecthub_core::types::UserId;
use inspecthub_entity::user::UserRole;

fn auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: helpers::JWT_SECRET.into(),
        token_ttl_minutes: 60,
    }
}

#[tokio::test]
async fn test_register_then_login_issues_customer_token() {
    let app = helpers::TestApp::new();

    let registered = app.register("a@x.com", "pw1", "customer").await;
    assert_eq!(registered.status, StatusCode::CREATED);
    assert_eq!(registered.data()["role"], "customer");
    assert!(registered.data().get("password_hash").is_none());

    let login = app.login("a@x.com", "pw1").await;
    assert_eq!(login.status, StatusCode::OK);
    assert_eq!(login.data()["token_type"], "bearer");
    assert_eq!(login.data()["user"]["email"], "a@x.com");

    let token = login.data()["access_token"].as_str().unwrap();
    let decoder = JwtDecoder::new(&auth_config(), Arc::new(SystemClock));
    let claims = decoder.verify(token).unwrap();
    assert_eq!(claims.role, UserRole::Customer);
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.sub.to_string(), helpers::id_of(registered.data()));
}

#[tokio::test]
async fn test_me_returns_caller() {
    let app = helpers::TestApp::new();
    let token = app.pilot("p@x.com").await;

    let me = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(me.status, StatusCode::OK);
    assert_eq!(me.data()["email"], "p@x.com");
    assert_eq!(me.data()["role"], "pilot");
}

#[tokio::test]
async fn test_duplicate_email_rejected() {
    let app = helpers::TestApp::new();
    app.register("a@x.com", "pw1", "customer").await;

    let again = app.register("A@x.com", "other", "pilot").await;
    assert_eq!(again.status, StatusCode::BAD_REQUEST);
    assert_eq!(again.error_code(), "VALIDATION_ERROR");
    assert_eq!(again.body["message"], "Email already registered");
}

#[tokio::test]
async fn test_unknown_role_rejected_at_registration() {
    let app = helpers::TestApp::new();
    let response = app.register("a@x.com", "pw1", "admin").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.error_code(), "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_malformed_registration_body() {
    let app = helpers::TestApp::new();
    let response = app
        .request(
            "POST",
            "/api/auth/register",
            Some(json!({ "email": "a@x.com" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let response = app.register("not-an-email", "pw1", "customer").await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_failures_look_identical() {
    let app = helpers::TestApp::new();
    app.register("a@x.com", "pw1", "customer").await;

    let wrong_password = app.login("a@x.com", "nope").await;
    let unknown_email = app.login("nobody@x.com", "pw1").await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_email.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.error_code(), "INVALID_CREDENTIALS");
    assert_eq!(wrong_password.body, unknown_email.body);
}

#[tokio::test]
async fn test_missing_token_is_unauthenticated() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/inspections", None, None).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.error_code(), "UNAUTHENTICATED");
    assert_eq!(response.headers.get(WWW_AUTHENTICATE).unwrap(), "Bearer");
}

#[tokio::test]
async fn test_expired_and_forged_tokens_are_indistinguishable() {
    let app = helpers::TestApp::new();
    let token = app.customer("a@x.com").await;

    let encoder = JwtEncoder::new(&auth_config(), Arc::new(SystemClock));
    let expired = encoder
        .issue_with_ttl(
            UserId::new(),
            "a@x.com",
            UserRole::Customer,
            chrono::Duration::minutes(-1),
        )
        .unwrap()
        .token;

    let other_secret = AuthConfig {
        jwt_secret: "a-completely-different-secret-0123456789".into(),
        token_ttl_minutes: 60,
    };
    let forged = JwtEncoder::new(&other_secret, Arc::new(SystemClock))
        .issue(UserId::new(), "a@x.com", UserRole::Pilot)
        .unwrap()
        .token;

    let mut tampered = token.clone();
    tampered.push('x');

    let mut bodies = Vec::new();
    for bad in [expired.as_str(), forged.as_str(), tampered.as_str(), "garbage"] {
        let response = app.request("GET", "/api/auth/me", None, Some(bad)).await;
        assert_eq!(response.status, StatusCode::UNAUTHORIZED);
        assert_eq!(response.body["message"], INVALID_TOKEN_MESSAGE);
        bodies.push(response.body);
    }
    assert!(bodies.windows(2).all(|pair| pair[0] == pair[1]));

    let ok = app.request("GET", "/api/auth/me", None, Some(&token)).await;
    assert_eq!(ok.status, StatusCode::OK);
}

#[tokio::test]
async fn test_health() {
    let app = helpers::TestApp::new();
    let response = app.request("GET", "/api/health", None, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.data()["status"], "ok");
    assert_eq!(response.data()["storage"], "noop");
}
