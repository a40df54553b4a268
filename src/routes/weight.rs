// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Weight log endpoints.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::WeightRecord;
use crate::routes::DeletedResponse;
use crate::services::NewWeight;
use crate::AppState;
use axum::{
    extract::{Path, State},
    routing::{delete, get, post},
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/weight/log", post(log_weight))
        .route("/api/weight/logs", get(list_weights))
        .route("/api/weight/logs/{id}", delete(delete_weight))
}

#[derive(Debug, Deserialize, Validate)]
pub struct LogWeightRequest {
    /// Kilograms
    #[validate(range(min = 1.0, max = 500.0))]
    pub weight: f64,
    /// Epoch milliseconds; defaults to the server clock
    pub timestamp: Option<i64>,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct WeightLogsResponse {
    /// Oldest first
    pub logs: Vec<WeightRecord>,
}

/// Log a weight entry. Weight entries earn no XP.
async fn log_weight(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(payload): Json<LogWeightRequest>,
) -> Result<Json<WeightRecord>> {
    payload
        .validate()
        .map_err(|e| AppError::Validation(e.to_string()))?;

    let record = state.ledger.log_weight(
        &user.user_id,
        NewWeight {
            weight: payload.weight,
            timestamp: payload.timestamp,
        },
    )?;
    Ok(Json(record))
}

/// All weight entries, oldest first.
async fn list_weights(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<WeightLogsResponse>> {
    Ok(Json(WeightLogsResponse {
        logs: state.ledger.weight_logs(&user.user_id),
    }))
}

/// Delete one weight entry by id.
async fn delete_weight(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<DeletedResponse>> {
    if !state.ledger.delete_weight(&user.user_id, &id)? {
        return Err(AppError::NotFound(format!("Weight entry {} not found", id)));
    }
    Ok(Json(DeletedResponse {
        success: true,
        message: "Weight entry deleted".to_string(),
    }))
}
