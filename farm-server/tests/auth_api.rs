//! Auth API integration tests
//!
//! Drives the production router stack (middleware included) against a real
//! embedded database in a temp dir.

mod common;

use common::{request_json, signup, spawn_app};
use farm_server::auth::{JwtConfig, JwtService};
use farm_server::db::repository::UserRepository;
use http::StatusCode;
use serde_json::json;

#[tokio::test]
async fn signup_returns_token_and_public_user_view() {
    let (app, _state, _tmp) = spawn_app().await;

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "Asha",
            "email": "asha@example.com",
            "password": "a-strong-password",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["name"], "Asha");
    assert_eq!(body["user"]["email"], "asha@example.com");
    // Role defaults to buyer when omitted
    assert_eq!(body["user"]["role"], "buyer");
    // The password (or its hash) never appears in the response
    assert!(body["user"].get("password").is_none());
    assert!(body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn duplicate_signup_conflicts_and_creates_no_second_record() {
    let (app, state, _tmp) = spawn_app().await;

    signup(&app, "Asha", "asha@example.com", "first-password", "buyer").await;

    let (status, body) = request_json(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "Imposter",
            "email": "asha@example.com",
            "password": "other-password",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT, "{body}");

    let repo = UserRepository::new(state.db.clone());
    let count = repo.count_by_email("asha@example.com").await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn invalid_role_is_rejected() {
    let (app, _state, _tmp) = spawn_app().await;

    let (status, _body) = request_json(
        &app,
        "POST",
        "/api/auth/signup",
        None,
        Some(json!({
            "name": "X",
            "email": "x@example.com",
            "password": "some-password",
            "role": "superuser",
        })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn login_distinguishes_unknown_email_from_wrong_password() {
    let (app, _state, _tmp) = spawn_app().await;

    signup(&app, "Asha", "asha@example.com", "correct-password", "buyer").await;

    // Unknown email → 404
    let (status, _) = request_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "nobody@example.com", "password": "whatever"})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // Correct email, wrong password → 401, consistently
    for attempt in ["wrong", "also-wrong"] {
        let (status, _) = request_json(
            &app,
            "POST",
            "/api/auth/login",
            None,
            Some(json!({"email": "asha@example.com", "password": attempt})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    // Correct credentials → 200 with a token
    let (status, body) = request_json(
        &app,
        "POST",
        "/api/auth/login",
        None,
        Some(json!({"email": "asha@example.com", "password": "correct-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(!body["token"].as_str().unwrap().is_empty());
    assert_eq!(body["user"]["email"], "asha@example.com");
}

#[tokio::test]
async fn protected_routes_reject_missing_and_forged_tokens() {
    let (app, _state, _tmp) = spawn_app().await;

    // No token at all
    let (status, _) = request_json(&app, "GET", "/api/orders", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A syntactically valid JWT signed with the wrong secret: the payload
    // decodes to an admin, but the signature must not verify
    let forger = JwtService::with_config(JwtConfig {
        secret: "attacker-controlled-secret-32-bytes!!".to_string(),
        expiration_minutes: 60,
        issuer: "farm-server".to_string(),
        audience: "farmcom-web".to_string(),
    });
    let forged = forger
        .generate_token("user:mallory", "Mallory", "m@example.com", "admin")
        .unwrap();

    let (status, _) = request_json(&app, "GET", "/api/orders/seller", Some(&forged), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn health_and_pages_are_public() {
    let (app, _state, _tmp) = spawn_app().await;

    let (status, body) = request_json(&app, "GET", "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");

    // CMS is unconfigured in tests; built-in defaults are served
    let (status, body) = request_json(&app, "GET", "/api/pages/home", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["slug"], "home");
    assert_eq!(body["title"], "FarmCom");
}
