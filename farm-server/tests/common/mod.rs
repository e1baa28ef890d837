//! Shared helpers for the API integration tests
//!
//! Each test gets a real embedded database in a fresh temp dir and drives
//! the production router stack through `tower::ServiceExt::oneshot`.

use axum::Router;
use axum::body::Body;
use farm_server::core::{Config, ServerState, build_router};
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

/// Spin up a full application over a temp-dir work directory.
///
/// The TempDir must stay alive for the duration of the test.
pub async fn spawn_app() -> (Router, ServerState, tempfile::TempDir) {
    let tmp = tempfile::tempdir().expect("tempdir");
    let config = Config::with_overrides(tmp.path().to_string_lossy().to_string(), 0);

    let state = ServerState::initialize(&config)
        .await
        .expect("state init");
    let app = build_router(state.clone());

    (app, state, tmp)
}

/// Issue one request against the router and return (status, parsed JSON body).
///
/// Non-JSON bodies parse to `Value::Null`.
pub async fn request_json(
    app: &Router,
    method: &str,
    uri: &str,
    token: Option<&str>,
    body: Option<serde_json::Value>,
) -> (StatusCode, serde_json::Value) {
    let mut builder = Request::builder().method(method).uri(uri);

    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }

    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(&json).expect("serialize")))
            .expect("request"),
        None => builder.body(Body::empty()).expect("request"),
    };

    let response = app.clone().oneshot(request).await.expect("oneshot");
    let status = response.status();
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body")
        .to_bytes();

    let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
    (status, json)
}

/// Signup a user and return (token, user id)
pub async fn signup(app: &Router, name: &str, email: &str, password: &str, role: &str) -> (String, String) {
    let (status, body) = request_json(
        app,
        "POST",
        "/api/auth/signup",
        None,
        Some(serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
            "role": role,
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED, "signup failed: {body}");
    let token = body["token"].as_str().expect("token").to_string();
    let user_id = body["user"]["id"].as_str().expect("user id").to_string();
    (token, user_id)
}
