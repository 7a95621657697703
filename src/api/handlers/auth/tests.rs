//! Auth endpoint tests.

use super::{
    login::{destination, login},
    two_factor::{cancel, verify},
    AccountDirectory, AuthConfig, AuthState,
};
use anyhow::{Context, Result};
use axum::{
    body::{to_bytes, Body},
    extract::Extension,
    http::{header::CONTENT_TYPE, Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use tower::ServiceExt;

fn auth_state(two_factor: bool) -> Arc<AuthState> {
    let config = AuthConfig::new("http://localhost:3000".to_string())
        .with_two_factor_enabled(two_factor)
        .with_latency(Duration::ZERO);
    Arc::new(AuthState::new(config, AccountDirectory::seeded()))
}

fn app_router(auth_state: Arc<AuthState>) -> Router {
    Router::new()
        .route("/v1/auth/login", post(login))
        .route("/v1/auth/two-factor/verify", post(verify))
        .route("/v1/auth/two-factor/cancel", post(cancel))
        .route("/v1/auth/destination", get(destination))
        .layer(Extension(auth_state))
}

async fn post_json(app: &Router, uri: &str, payload: Value) -> Result<(StatusCode, Value)> {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&payload)?))?,
        )
        .await?;
    let status = response.status();
    let body = to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, serde_json::from_slice(&body)?))
}

fn str_field<'a>(value: &'a Value, field: &str) -> Option<&'a str> {
    value.get(field).and_then(Value::as_str)
}

#[tokio::test]
async fn admin_login_routes_to_dashboard_without_challenge() -> Result<()> {
    let app = app_router(auth_state(false));

    let (status, body) = post_json(
        &app,
        "/v1/auth/login",
        json!({ "email": "admin@prorecruit.co.il", "password": "password123" }),
    )
    .await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(str_field(&body, "status"), Some("authenticated"));
    assert_eq!(str_field(&body, "role"), Some("admin"));
    assert_eq!(str_field(&body, "name"), Some("Dana Levi"));
    assert_eq!(str_field(&body, "redirect"), Some("/executive-dashboard"));
    assert!(body.get("challenge_id").is_none());
    Ok(())
}

#[tokio::test]
async fn every_seeded_account_lands_on_its_screen() -> Result<()> {
    let app = app_router(auth_state(false));
    let expected = [
        ("admin@prorecruit.co.il", "admin", "/executive-dashboard"),
        ("ceo@prorecruit.co.il", "admin", "/executive-dashboard"),
        ("recruiter@prorecruit.co.il", "recruiter", "/candidates"),
        ("client@prorecruit.co.il", "client", "/client-portal"),
        ("vendor@prorecruit.co.il", "vendor", "/vendor-portal"),
        ("candidate@prorecruit.co.il", "candidate", "/candidate-portal"),
    ];

    for (email, role, redirect) in expected {
        let (status, body) = post_json(
            &app,
            "/v1/auth/login",
            json!({ "email": email, "password": "password123" }),
        )
        .await?;
        assert_eq!(status, StatusCode::OK, "{email}");
        assert_eq!(str_field(&body, "role"), Some(role), "{email}");
        assert_eq!(str_field(&body, "redirect"), Some(redirect), "{email}");
    }
    Ok(())
}

#[tokio::test]
async fn wrong_password_is_unauthorized() -> Result<()> {
    let app = app_router(auth_state(false));

    let (status, body) = post_json(
        &app,
        "/v1/auth/login",
        json!({ "email": "client@prorecruit.co.il", "password": "letmein" }),
    )
    .await?;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "error": "Incorrect email or password" }));
    Ok(())
}

#[tokio::test]
async fn malformed_login_is_bad_request() -> Result<()> {
    let app = app_router(auth_state(false));

    let (status, body) = post_json(
        &app,
        "/v1/auth/login",
        json!({ "email": "client@prorecruit.co.il" }),
    )
    .await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(str_field(&body, "error"), Some("Missing payload"));
    Ok(())
}

#[tokio::test]
async fn enabled_gate_challenges_then_verifies() -> Result<()> {
    let state = auth_state(true);
    let app = app_router(state.clone());

    let (status, body) = post_json(
        &app,
        "/v1/auth/login",
        json!({ "email": "admin@prorecruit.co.il", "password": "password123" }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(str_field(&body, "status"), Some("two_factor_required"));
    assert_eq!(str_field(&body, "email"), Some("admin@prorecruit.co.il"));
    assert!(body.get("redirect").is_none());
    let challenge_id = str_field(&body, "challenge_id")
        .context("missing challenge_id")?
        .to_string();
    assert_eq!(state.challenges().len().await, 1);

    // Short code: rejected, challenge kept.
    let (status, body) = post_json(
        &app,
        "/v1/auth/two-factor/verify",
        json!({ "challenge_id": challenge_id, "code": "123" }),
    )
    .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Code must be 6 digits" }));
    assert_eq!(state.challenges().len().await, 1);

    let (status, body) = post_json(
        &app,
        "/v1/auth/two-factor/verify",
        json!({ "challenge_id": challenge_id, "code": "987654" }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(str_field(&body, "status"), Some("authenticated"));
    assert_eq!(str_field(&body, "redirect"), Some("/executive-dashboard"));
    assert!(state.challenges().is_empty().await);

    // The challenge cannot be replayed.
    let (status, body) = post_json(
        &app,
        "/v1/auth/two-factor/verify",
        json!({ "challenge_id": challenge_id, "code": "987654" }),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(str_field(&body, "error"), Some("Unknown or expired challenge"));
    Ok(())
}

#[tokio::test]
async fn enabled_gate_skips_non_elevated_roles() -> Result<()> {
    let app = app_router(auth_state(true));

    let (status, body) = post_json(
        &app,
        "/v1/auth/login",
        json!({ "email": "candidate@prorecruit.co.il", "password": "password123" }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(str_field(&body, "status"), Some("authenticated"));
    assert_eq!(str_field(&body, "redirect"), Some("/candidate-portal"));
    Ok(())
}

#[tokio::test]
async fn cancel_discards_challenge() -> Result<()> {
    let state = auth_state(true);
    let app = app_router(state.clone());

    let (_, body) = post_json(
        &app,
        "/v1/auth/login",
        json!({ "email": "recruiter@prorecruit.co.il", "password": "password123" }),
    )
    .await?;
    let challenge_id = str_field(&body, "challenge_id")
        .context("missing challenge_id")?
        .to_string();

    let (status, body) = post_json(
        &app,
        "/v1/auth/two-factor/cancel",
        json!({ "challenge_id": challenge_id }),
    )
    .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "credentials" }));
    assert!(state.challenges().is_empty().await);

    let (status, _) = post_json(
        &app,
        "/v1/auth/two-factor/verify",
        json!({ "challenge_id": challenge_id, "code": "123456" }),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn verify_with_garbage_challenge_id_is_not_found() -> Result<()> {
    let app = app_router(auth_state(true));

    let (status, _) = post_json(
        &app,
        "/v1/auth/two-factor/verify",
        json!({ "challenge_id": "not-a-uuid", "code": "123456" }),
    )
    .await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn destination_lookup_falls_back_home() -> Result<()> {
    let app = app_router(auth_state(false));

    for (query, role, redirect) in [
        ("?role=vendor", "vendor", "/vendor-portal"),
        ("?role=intern", "intern", "/"),
        ("", "", "/"),
    ] {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method("GET")
                    .uri(format!("/v1/auth/destination{query}"))
                    .body(Body::empty())?,
            )
            .await?;
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        let payload: Value = serde_json::from_slice(&body)?;
        assert_eq!(payload, json!({ "role": role, "redirect": redirect }));
    }
    Ok(())
}
