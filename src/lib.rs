// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! FitBridge Tracker: self-hosted fitness log and gamification service
//!
//! This crate provides the backend API for the FitBridge mobile client:
//! workout, meal, and weight logging over a local JSON store, with streaks,
//! XP levels, and calendar-period rollups derived from the raw records.

pub mod config;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod time_utils;

use std::sync::Arc;

use config::Config;
use services::ActivityLedger;
use store::ActivityStore;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub store: Arc<ActivityStore>,
    pub ledger: ActivityLedger,
}
