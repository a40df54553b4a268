// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Workout logging endpoints.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::stats::WorkoutRangeStats;
use crate::models::ActivityRecord;
use crate::routes::DeletedResponse;
use crate::services::{NewWorkout, XP_PER_LOG};
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/workout/log", post(log_workout))
        .route("/api/workout/logs", get(list_workouts))
        .route(
            "/api/workout/logs/{id}",
            get(get_workout).delete(delete_workout),
        )
        .route("/api/workout/stats", get(get_stats))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogWorkoutRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0, max = 1440.0))]
    pub duration_minutes: Option<f64>,
    #[validate(range(min = 0.0, max = 100_000.0))]
    pub calories: Option<f64>,
    /// Epoch milliseconds; defaults to the server clock
    pub timestamp: Option<i64>,
}

/// A logged workout plus the XP it earned.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct LoggedWorkoutResponse {
    pub workout: ActivityRecord,
    pub xp_earned: u32,
}

#[derive(Deserialize)]
struct LogsQuery {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
}

fn default_limit() -> usize {
    10
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct WorkoutLogsResponse {
    pub logs: Vec<ActivityRecord>,
    pub limit: usize,
    pub offset: usize,
}

#[derive(Deserialize)]
struct StatsQuery {
    #[serde(default = "default_stats_days")]
    days: u32,
}

fn default_stats_days() -> u32 {
    7
}

pub(crate) fn check_stats_days(days: u32) -> Result<u32> {
    if (1..=365).contains(&days) {
        Ok(days)
    } else {
        Err(AppError::BadRequest(
            "days must be between 1 and 365".to_string(),
        ))
    }
}

/// Log a workout.
async fn log_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<LogWorkoutRequest>,
) -> Result<Json<LoggedWorkoutResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let workout = state.ledger.log_workout(
        &user.user_id,
        NewWorkout {
            name: payload.name,
            duration_minutes: payload.duration_minutes,
            calories: payload.calories,
            timestamp: payload.timestamp,
        },
    )?;

    Ok(Json(LoggedWorkoutResponse {
        workout,
        xp_earned: XP_PER_LOG,
    }))
}

/// List workouts, newest first.
async fn list_workouts(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<LogsQuery>,
) -> Result<Json<WorkoutLogsResponse>> {
    let logs = state
        .ledger
        .recent_workouts(&user.user_id, query.limit, query.offset);

    Ok(Json(WorkoutLogsResponse {
        logs,
        limit: query.limit,
        offset: query.offset,
    }))
}

/// Fetch one workout by id.
async fn get_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ActivityRecord>> {
    let workout = state
        .ledger
        .workout(&user.user_id, &id)
        .ok_or_else(|| AppError::NotFound(format!("Workout {} not found", id)))?;
    Ok(Json(workout))
}

/// Delete one workout by id.
async fn delete_workout(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>> {
    if !state.ledger.delete_workout(&user.user_id, &id)? {
        return Err(AppError::NotFound(format!("Workout {} not found", id)));
    }
    Ok(Json(DeletedResponse {
        success: true,
        message: "Workout deleted".to_string(),
    }))
}

/// Workout totals over a trailing window (default 7 days).
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<WorkoutRangeStats>> {
    let days = check_stats_days(query.days)?;
    Ok(Json(state.ledger.workout_stats(&user.user_id, days)))
}
