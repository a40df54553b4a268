// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Auth cookie attribute tests.
//!
//! These tests verify that the session cookie is created with the expected
//! attributes, cleared on logout, and accepted by the auth middleware.

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    response::Response,
};
use tower::ServiceExt;

mod common;

fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

async fn create_session(app: &axum::Router, body: &str) -> Response {
    app.clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/session")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
}

#[tokio::test]
async fn test_session_cookie_attributes() {
    let (app, _) = common::create_test_app();

    let response = create_session(&app, r#"{"user_id": "user-1"}"#).await;
    assert_eq!(response.status(), StatusCode::OK);

    let set_cookies = set_cookie_headers(&response);
    let token_cookie = find_cookie(&set_cookies, "fitbridge_token");

    assert!(token_cookie.contains("Path=/"));
    assert!(token_cookie.contains("HttpOnly"));
    assert!(token_cookie.contains("SameSite=Lax"));
    assert!(!token_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_logout_cookie_removal_attributes() {
    let (app, _) = common::create_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/auth/logout")
                .header(header::COOKIE, "fitbridge_token=some-session-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let set_cookies = set_cookie_headers(&response);
    let token_cookie = find_cookie(&set_cookies, "fitbridge_token");

    // Removal must match the creation path so browsers actually drop it
    assert!(token_cookie.contains("Path=/"));
    assert!(token_cookie.contains("Max-Age=0"));
}

#[tokio::test]
async fn test_cookie_authenticates_protected_routes() {
    let (app, _) = common::create_test_app();

    let response = create_session(&app, r#"{"user_id": "user-1"}"#).await;
    let set_cookies = set_cookie_headers(&response);
    let token_cookie = find_cookie(&set_cookies, "fitbridge_token");
    let cookie_pair = token_cookie
        .split(';')
        .next()
        .expect("cookie name=value pair");

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/profile")
                .header(header::COOKIE, cookie_pair)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::response_json(response).await;
    assert_eq!(json["profile"]["id"], "user-1");
}

#[tokio::test]
async fn test_cookie_takes_precedence_over_bearer_header() {
    let (app, state) = common::create_test_app();

    let response = create_session(&app, r#"{"user_id": "cookie-user"}"#).await;
    let set_cookies = set_cookie_headers(&response);
    let token_cookie = find_cookie(&set_cookies, "fitbridge_token");
    let cookie_pair = token_cookie.split(';').next().unwrap().to_string();

    let bearer = common::create_test_jwt("header-user", &state.config.jwt_signing_key);
    // header-user needs a profile too, so a mixup would still return 200
    create_session(&app, r#"{"user_id": "header-user"}"#).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/api/profile")
                .header(header::COOKIE, cookie_pair)
                .header(header::AUTHORIZATION, format!("Bearer {}", bearer))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = common::response_json(response).await;
    assert_eq!(json["profile"]["id"], "cookie-user");
}
