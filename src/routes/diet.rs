// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Meal logging endpoints.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::stats::{DietRangeStats, MacroTotals};
use crate::models::ActivityRecord;
use crate::routes::workout::check_stats_days;
use crate::routes::DeletedResponse;
use crate::services::{NewMeal, XP_PER_LOG};
use crate::time_utils::today_local;
use crate::AppState;
use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/diet/log", post(log_meal))
        .route("/api/diet/logs", get(list_meals))
        .route("/api/diet/logs/{id}", get(get_meal).delete(delete_meal))
        .route("/api/diet/today", get(today_summary))
        .route("/api/diet/stats", get(get_stats))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogMealRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    #[validate(range(min = 0.0, max = 100_000.0))]
    pub calories: Option<f64>,
    #[validate(range(min = 0.0, max = 10_000.0))]
    pub protein: Option<f64>,
    #[validate(range(min = 0.0, max = 10_000.0))]
    pub carbs: Option<f64>,
    #[validate(range(min = 0.0, max = 10_000.0))]
    pub fats: Option<f64>,
    /// Epoch milliseconds; defaults to the server clock
    pub timestamp: Option<i64>,
}

/// A logged meal plus the XP it earned.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct LoggedMealResponse {
    pub meal: ActivityRecord,
    pub xp_earned: u32,
}

#[derive(Deserialize)]
struct MealLogsQuery {
    #[serde(default = "default_limit")]
    limit: usize,
    #[serde(default)]
    offset: usize,
    /// Restrict to one local calendar day (YYYY-MM-DD)
    date: Option<NaiveDate>,
}

fn default_limit() -> usize {
    20
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct MealLogsResponse {
    pub logs: Vec<ActivityRecord>,
    pub limit: usize,
    pub offset: usize,
}

/// Today's meals with summed macros.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct TodaySummaryResponse {
    /// Local calendar date (YYYY-MM-DD)
    pub date: String,
    pub meals: Vec<ActivityRecord>,
    pub totals: MacroTotals,
}

#[derive(Deserialize)]
struct StatsQuery {
    #[serde(default = "default_stats_days")]
    days: u32,
}

fn default_stats_days() -> u32 {
    7
}

/// Log a meal.
async fn log_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<LogMealRequest>,
) -> Result<Json<LoggedMealResponse>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let meal = state.ledger.log_meal(
        &user.user_id,
        NewMeal {
            name: payload.name,
            calories: payload.calories,
            protein: payload.protein,
            carbs: payload.carbs,
            fats: payload.fats,
            timestamp: payload.timestamp,
        },
    )?;

    Ok(Json(LoggedMealResponse {
        meal,
        xp_earned: XP_PER_LOG,
    }))
}

/// List meals, newest first, optionally for one day.
async fn list_meals(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<MealLogsQuery>,
) -> Result<Json<MealLogsResponse>> {
    let logs = state
        .ledger
        .recent_meals(&user.user_id, query.limit, query.offset, query.date);

    Ok(Json(MealLogsResponse {
        logs,
        limit: query.limit,
        offset: query.offset,
    }))
}

/// Fetch one meal by id.
async fn get_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ActivityRecord>> {
    let meal = state
        .ledger
        .meal(&user.user_id, &id)
        .ok_or_else(|| AppError::NotFound(format!("Meal {} not found", id)))?;
    Ok(Json(meal))
}

/// Delete one meal by id.
async fn delete_meal(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>> {
    if !state.ledger.delete_meal(&user.user_id, &id)? {
        return Err(AppError::NotFound(format!("Meal {} not found", id)));
    }
    Ok(Json(DeletedResponse {
        success: true,
        message: "Meal deleted".to_string(),
    }))
}

/// Today's meals and macro totals.
async fn today_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<TodaySummaryResponse>> {
    let (meals, totals) = state.ledger.today_meals(&user.user_id);
    Ok(Json(TodaySummaryResponse {
        date: today_local().format("%Y-%m-%d").to_string(),
        meals,
        totals,
    }))
}

/// Nutrition totals over a trailing window (default 7 days).
async fn get_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<StatsQuery>,
) -> Result<Json<DietRangeStats>> {
    let days = check_stats_days(query.days)?;
    Ok(Json(state.ledger.diet_stats(&user.user_id, days)))
}
