// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Profile endpoints.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::{resolve_level, LevelStatus, StreakState, UserProfile};
use crate::AppState;
use axum::{
    extract::State,
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/profile", get(get_profile).put(update_profile))
}

/// Profile with its derived standings.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct ProfileResponse {
    pub profile: UserProfile,
    pub level: LevelStatus,
    pub streak: StreakState,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(range(min = 0.0, max = 500.0))]
    pub weight_kg: Option<f64>,
    #[validate(range(min = 0.0, max = 300.0))]
    pub height_cm: Option<f64>,
    #[validate(length(max = 50))]
    pub fitness_goal: Option<String>,
    #[validate(length(max = 50))]
    pub fitness_level: Option<String>,
}

/// Get the current user's profile with level and streak.
async fn get_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<ProfileResponse>> {
    let profile = state
        .ledger
        .profile(&user.user_id)
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user.user_id)))?;

    let level = resolve_level(profile.xp.into());
    let streak = state.ledger.streak(&user.user_id);

    Ok(Json(ProfileResponse {
        profile,
        level,
        streak,
    }))
}

/// Apply a partial profile update. XP is server-owned and not settable.
async fn update_profile(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<UpdateProfileRequest>,
) -> Result<Json<ProfileResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let profile = state
        .ledger
        .update_profile(&user.user_id, |profile| {
            if let Some(name) = payload.name {
                profile.name = name;
            }
            if let Some(email) = payload.email {
                profile.email = Some(email);
            }
            if let Some(weight_kg) = payload.weight_kg {
                profile.weight_kg = weight_kg;
            }
            if let Some(height_cm) = payload.height_cm {
                profile.height_cm = height_cm;
            }
            if let Some(fitness_goal) = payload.fitness_goal {
                profile.fitness_goal = fitness_goal;
            }
            if let Some(fitness_level) = payload.fitness_level {
                profile.fitness_level = fitness_level;
            }
        })?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", user.user_id)))?;

    let level = resolve_level(profile.xp.into());
    let streak = state.ledger.streak(&user.user_id);

    Ok(Json(ProfileResponse {
        profile,
        level,
        streak,
    }))
}
