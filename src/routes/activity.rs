// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Aggregated activity endpoints: daily series, period history, streak,
//! and level standing.

use crate::middleware::auth::AuthUser;
use crate::models::{DailyStat, LevelStatus, PeriodBucket, PeriodKind, StreakState};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/activity/summary", get(get_summary))
        .route("/api/activity/streak", get(get_streak))
        .route("/api/activity/level", get(get_level))
}

#[derive(Deserialize)]
struct SummaryQuery {
    /// week (7-day series) or month (30-day series)
    #[serde(default = "default_view")]
    view: PeriodKind,
}

fn default_view() -> PeriodKind {
    PeriodKind::Week
}

/// Daily chart series plus recent period rollups for one view.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct ActivitySummaryResponse {
    pub daily: Vec<DailyStat>,
    pub history: Vec<PeriodBucket>,
}

/// Activity summary for the week or month view.
async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(query): Query<SummaryQuery>,
) -> Json<ActivitySummaryResponse> {
    Json(ActivitySummaryResponse {
        daily: state.ledger.daily_series(&user.user_id, query.view),
        history: state.ledger.period_history(&user.user_id, query.view),
    })
}

/// Current and longest workout streak.
async fn get_streak(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<StreakState> {
    Json(state.ledger.streak(&user.user_id))
}

/// Level standing derived from stored XP.
async fn get_level(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Json<LevelStatus> {
    Json(state.ledger.level(&user.user_id))
}
