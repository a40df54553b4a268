// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session endpoints.
//!
//! The client asserts its identity and exchanges it for a signed session
//! token; there is no password check here. Deployments front this with
//! their own identity provider. In demo mode an absent id maps to the
//! built-in demo user.

use crate::error::{AppError, Result};
use crate::middleware::auth::{create_session_jwt, valid_user_id, SESSION_COOKIE};
use crate::models::profile::DEMO_USER_ID;
use crate::models::UserProfile;
use crate::AppState;
use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/auth/session", post(create_session))
        .route("/api/auth/logout", post(logout))
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionRequest {
    pub user_id: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct SessionResponse {
    pub token: String,
    pub profile: UserProfile,
}

/// Exchange a caller-asserted identity for a session token.
///
/// Creates the profile on first sight of a user. The token comes back in
/// the body and as the session cookie.
async fn create_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    payload: Option<Json<SessionRequest>>,
) -> Result<(CookieJar, Json<SessionResponse>)> {
    let SessionRequest {
        user_id,
        name,
        email,
    } = payload.map(|Json(r)| r).unwrap_or_default();

    let user_id = match user_id {
        Some(id) => id,
        None if state.config.demo_mode => DEMO_USER_ID.to_string(),
        None => return Err(AppError::BadRequest("user_id is required".to_string())),
    };
    if !valid_user_id(&user_id) {
        return Err(AppError::BadRequest(
            "user_id must be 1-64 characters of [A-Za-z0-9_-]".to_string(),
        ));
    }

    let profile = state
        .ledger
        .ensure_profile(&user_id, name.as_deref(), email)?;
    let token = create_session_jwt(&user_id, &state.config.jwt_signing_key)?;

    tracing::info!(user = %user_id, "Session created");

    let cookie = Cookie::build((SESSION_COOKIE, token.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build();

    Ok((jar.add(cookie), Json(SessionResponse { token, profile })))
}

/// Clear the session cookie.
async fn logout(jar: CookieJar) -> (CookieJar, Json<serde_json::Value>) {
    let jar = jar.remove(Cookie::build(SESSION_COOKIE).path("/").build());
    (jar, Json(serde_json::json!({ "success": true })))
}
