mod common;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use common::spawn_app;
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn register_login_and_access_protected_route() {
    let app = spawn_app().await;

    // Unauthorized request should fail
    let (status, body) = app
        .send(Method::GET, "/api/v1/transactions", None, None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 401);

    let (status, body) = app.send(Method::GET, "/api/v1/auth/status", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requiresToken"], true);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "username": "alice",
                "email": "Alice@Example.com",
                "password": "secret1",
                "confirmPassword": "secret1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["email"], "alice@example.com");
    assert_eq!(body["tokenType"], "Bearer");
    assert!(body["user"].get("passwordHash").is_none());

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "alice@example.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    let token = body["accessToken"].as_str().unwrap().to_string();

    let (status, body) = app.get("/api/v1/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "alice");

    let (status, _) = app
        .send(Method::POST, "/api/v1/auth/logout", Some(&token), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn login_failures_share_one_message() {
    let app = spawn_app().await;
    app.register("bob@example.com").await;

    let (status, unknown) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "nobody@example.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, wrong) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "bob@example.com", "password": "wrong-pass" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown["message"], wrong["message"]);
    assert_eq!(wrong["message"], "Invalid email or password");

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "bob@example.com" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn duplicate_registration_is_conflict() {
    let app = spawn_app().await;
    app.register("carol@example.com").await;

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": "carol",
                "email": "CAROL@example.com",
                "password": "secret1"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 409);
}

#[tokio::test]
async fn invalid_registration_is_bad_request() {
    let app = spawn_app().await;

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({
                "name": "dave",
                "email": "dave@example.com",
                "password": "secret1",
                "confirmPassword": "different"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = app
        .send(
            Method::POST,
            "/api/v1/auth/register",
            None,
            Some(json!({ "email": "erin@example.com", "password": "secret1" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn malformed_authorization_header_is_rejected() {
    let app = spawn_app().await;

    for value in ["Basic abc", "Bearer", "Bearer not-a-token"] {
        let response = app
            .router
            .clone()
            .oneshot(
                Request::builder()
                    .uri("/api/v1/dashboard")
                    .header(header::AUTHORIZATION, value)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{value}");
    }
}

#[tokio::test]
async fn deleted_account_token_stops_working() {
    let app = spawn_app().await;
    let token = app.register("erin@example.com").await;

    let (status, _) = app.delete("/api/v1/users/profile", &token).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app.get("/api/v1/users/profile", &token).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn profile_and_password_updates() {
    let app = spawn_app().await;
    let token = app.register("frank@example.com").await;
    app.register("grace@example.com").await;

    let (status, body) = app
        .put("/api/v1/users/profile", &token, json!({ "name": "Franky" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Franky");

    let (status, _) = app
        .put(
            "/api/v1/users/profile",
            &token,
            json!({ "email": "grace@example.com" }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.put("/api/v1/users/profile", &token, json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .put(
            "/api/v1/users/password",
            &token,
            json!({ "currentPassword": "nope123", "newPassword": "another1" }),
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .put(
            "/api/v1/users/password",
            &token,
            json!({ "currentPassword": "secret1", "newPassword": "another1" }),
        )
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = app
        .send(
            Method::POST,
            "/api/v1/auth/login",
            None,
            Some(json!({ "email": "frank@example.com", "password": "another1" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}
