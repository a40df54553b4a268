// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activity ledger - the write and query path for all user records.
//!
//! Handlers never touch the store directly; they go through this service,
//! which mints record ids, applies the XP award for logged activity, and
//! derives streak, level, and aggregate views from the raw collections.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use uuid::Uuid;

use crate::error::Result;
use crate::models::stats::{
    build_daily_series, build_period_history, diet_range_stats, macro_totals, workout_range_stats,
    DailyStat, DietRangeStats, MacroTotals, PeriodBucket, PeriodKind, WorkoutRangeStats,
};
use crate::models::{
    compute_streak, profile::DEMO_USER_ID, resolve_level, ActivityRecord, LevelStatus, StreakState,
    UserProfile, WeightRecord,
};
use crate::store::{collections, ActivityStore};
use crate::time_utils::{format_utc_rfc3339, local_date_of_millis, now_millis, today_local};

/// Experience points awarded for each logged workout or meal.
/// Weight entries award nothing.
pub const XP_PER_LOG: u32 = 10;

/// A workout to record.
#[derive(Debug, Clone)]
pub struct NewWorkout {
    pub name: String,
    pub duration_minutes: Option<f64>,
    pub calories: Option<f64>,
    /// Epoch milliseconds; defaults to now
    pub timestamp: Option<i64>,
}

/// A meal to record.
#[derive(Debug, Clone)]
pub struct NewMeal {
    pub name: String,
    pub calories: Option<f64>,
    pub protein: Option<f64>,
    pub carbs: Option<f64>,
    pub fats: Option<f64>,
    /// Epoch milliseconds; defaults to now
    pub timestamp: Option<i64>,
}

/// A weight entry to record.
#[derive(Debug, Clone)]
pub struct NewWeight {
    pub weight: f64,
    /// Epoch milliseconds; defaults to now
    pub timestamp: Option<i64>,
}

/// Service for recording and querying user activity.
#[derive(Clone)]
pub struct ActivityLedger {
    store: Arc<ActivityStore>,
}

impl ActivityLedger {
    pub fn new(store: Arc<ActivityStore>) -> Self {
        Self { store }
    }

    // ─── Logging ─────────────────────────────────────────────────

    /// Record a workout and award the log XP.
    pub fn log_workout(&self, user_id: &str, new: NewWorkout) -> Result<ActivityRecord> {
        let record = ActivityRecord {
            id: Uuid::new_v4().to_string(),
            name: Some(new.name),
            timestamp: new.timestamp.unwrap_or_else(now_millis),
            duration_minutes: new.duration_minutes,
            calories: new.calories,
            protein: None,
            carbs: None,
            fats: None,
        };
        self.store
            .append_record(user_id, collections::WORKOUTS, record.clone())?;
        self.award_log_xp(user_id)?;
        tracing::debug!(user = user_id, id = %record.id, "Logged workout");
        Ok(record)
    }

    /// Record a meal and award the log XP.
    pub fn log_meal(&self, user_id: &str, new: NewMeal) -> Result<ActivityRecord> {
        let record = ActivityRecord {
            id: Uuid::new_v4().to_string(),
            name: Some(new.name),
            timestamp: new.timestamp.unwrap_or_else(now_millis),
            duration_minutes: None,
            calories: new.calories,
            protein: new.protein,
            carbs: new.carbs,
            fats: new.fats,
        };
        self.store
            .append_record(user_id, collections::MEALS, record.clone())?;
        self.award_log_xp(user_id)?;
        tracing::debug!(user = user_id, id = %record.id, "Logged meal");
        Ok(record)
    }

    /// Record a weight entry. No XP.
    pub fn log_weight(&self, user_id: &str, new: NewWeight) -> Result<WeightRecord> {
        let record = WeightRecord {
            id: Uuid::new_v4().to_string(),
            weight: new.weight,
            timestamp: new.timestamp.unwrap_or_else(now_millis),
        };
        self.store
            .append_record(user_id, collections::WEIGHTS, record.clone())?;
        tracing::debug!(user = user_id, id = %record.id, "Logged weight");
        Ok(record)
    }

    pub fn delete_workout(&self, user_id: &str, id: &str) -> Result<bool> {
        self.store
            .remove_records::<ActivityRecord>(user_id, collections::WORKOUTS, |r| r.id == id)
    }

    pub fn delete_meal(&self, user_id: &str, id: &str) -> Result<bool> {
        self.store
            .remove_records::<ActivityRecord>(user_id, collections::MEALS, |r| r.id == id)
    }

    pub fn delete_weight(&self, user_id: &str, id: &str) -> Result<bool> {
        self.store
            .remove_records::<WeightRecord>(user_id, collections::WEIGHTS, |r| r.id == id)
    }

    // ─── Listings ────────────────────────────────────────────────

    /// Workouts newest first, paginated.
    pub fn recent_workouts(&self, user_id: &str, limit: usize, offset: usize) -> Vec<ActivityRecord> {
        let mut records: Vec<ActivityRecord> =
            self.store.read_records(user_id, collections::WORKOUTS);
        records.reverse();
        records.into_iter().skip(offset).take(limit).collect()
    }

    /// Meals newest first, paginated, optionally limited to one local day.
    pub fn recent_meals(
        &self,
        user_id: &str,
        limit: usize,
        offset: usize,
        date: Option<NaiveDate>,
    ) -> Vec<ActivityRecord> {
        let mut records: Vec<ActivityRecord> = self.store.read_records(user_id, collections::MEALS);
        records.reverse();
        if let Some(date) = date {
            records.retain(|r| local_date_of_millis(r.timestamp) == Some(date));
        }
        records.into_iter().skip(offset).take(limit).collect()
    }

    /// All weight entries, oldest first.
    pub fn weight_logs(&self, user_id: &str) -> Vec<WeightRecord> {
        self.store.read_records(user_id, collections::WEIGHTS)
    }

    pub fn workout(&self, user_id: &str, id: &str) -> Option<ActivityRecord> {
        self.store
            .read_records::<ActivityRecord>(user_id, collections::WORKOUTS)
            .into_iter()
            .find(|r| r.id == id)
    }

    pub fn meal(&self, user_id: &str, id: &str) -> Option<ActivityRecord> {
        self.store
            .read_records::<ActivityRecord>(user_id, collections::MEALS)
            .into_iter()
            .find(|r| r.id == id)
    }

    /// Today's meals (newest first) with their macro totals.
    pub fn today_meals(&self, user_id: &str) -> (Vec<ActivityRecord>, MacroTotals) {
        let today = today_local();
        let mut meals: Vec<ActivityRecord> = self.store.read_records(user_id, collections::MEALS);
        meals.retain(|r| local_date_of_millis(r.timestamp) == Some(today));
        let totals = macro_totals(&meals);
        meals.reverse();
        (meals, totals)
    }

    // ─── Profile ─────────────────────────────────────────────────

    /// Fetch the stored profile, creating one on first sight of a user.
    ///
    /// The demo user gets the built-in demo profile instead of a blank one;
    /// everyone else starts with the given name, the email local-part, or
    /// "Athlete", in that order.
    pub fn ensure_profile(
        &self,
        user_id: &str,
        name: Option<&str>,
        email: Option<String>,
    ) -> Result<UserProfile> {
        if let Some(profile) = self.store.read_profile(user_id) {
            return Ok(profile);
        }
        let created_at = format_utc_rfc3339(Utc::now());
        let profile = if user_id == DEMO_USER_ID {
            UserProfile::demo(&created_at)
        } else {
            let name = default_name(name, email.as_deref());
            UserProfile::new(user_id, &name, email, &created_at)
        };
        self.store.write_profile(&profile)?;
        tracing::info!(user = user_id, "Created profile");
        Ok(profile)
    }

    pub fn profile(&self, user_id: &str) -> Option<UserProfile> {
        self.store.read_profile(user_id)
    }

    /// Apply a partial update to a stored profile.
    pub fn update_profile(
        &self,
        user_id: &str,
        update: impl FnOnce(&mut UserProfile),
    ) -> Result<Option<UserProfile>> {
        self.store.update_profile(user_id, update)
    }

    fn award_log_xp(&self, user_id: &str) -> Result<()> {
        let updated = self.store.update_profile(user_id, |profile| {
            profile.xp = profile.xp.saturating_add(XP_PER_LOG);
        })?;
        if updated.is_none() {
            // First log from a user whose profile never got created
            let name = default_name(None, None);
            let mut profile =
                UserProfile::new(user_id, &name, None, &format_utc_rfc3339(Utc::now()));
            profile.xp = XP_PER_LOG;
            self.store.write_profile(&profile)?;
        }
        Ok(())
    }

    // ─── Derived Views ───────────────────────────────────────────

    /// Consecutive-day workout streak ending today or yesterday.
    pub fn streak(&self, user_id: &str) -> StreakState {
        let workouts: Vec<ActivityRecord> = self.store.read_records(user_id, collections::WORKOUTS);
        compute_streak(&workouts, today_local())
    }

    /// Level standing for the user's stored XP (0 when no profile).
    pub fn level(&self, user_id: &str) -> LevelStatus {
        let xp = self
            .store
            .read_profile(user_id)
            .map(|p| p.xp as i64)
            .unwrap_or(0);
        resolve_level(xp)
    }

    /// Per-day calories and workout activity for the view's lookback window.
    pub fn daily_series(&self, user_id: &str, kind: PeriodKind) -> Vec<DailyStat> {
        let workouts: Vec<ActivityRecord> = self.store.read_records(user_id, collections::WORKOUTS);
        let meals: Vec<ActivityRecord> = self.store.read_records(user_id, collections::MEALS);
        build_daily_series(&workouts, &meals, kind.series_days(), today_local())
    }

    /// Recent week or month rollups, newest first.
    pub fn period_history(&self, user_id: &str, kind: PeriodKind) -> Vec<PeriodBucket> {
        let workouts: Vec<ActivityRecord> = self.store.read_records(user_id, collections::WORKOUTS);
        let weights: Vec<WeightRecord> = self.store.read_records(user_id, collections::WEIGHTS);
        build_period_history(kind, &workouts, &weights, today_local())
    }

    /// Workout totals over the trailing `days` days.
    pub fn workout_stats(&self, user_id: &str, days: u32) -> WorkoutRangeStats {
        let workouts: Vec<ActivityRecord> = self.store.read_records(user_id, collections::WORKOUTS);
        workout_range_stats(&workouts, days, today_local())
    }

    /// Nutrition totals over the trailing `days` days.
    pub fn diet_stats(&self, user_id: &str, days: u32) -> DietRangeStats {
        let meals: Vec<ActivityRecord> = self.store.read_records(user_id, collections::MEALS);
        diet_range_stats(&meals, days, today_local())
    }
}

/// Display name for a new profile: explicit name, email local-part, or
/// the "Athlete" placeholder.
fn default_name(name: Option<&str>, email: Option<&str>) -> String {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
        .or_else(|| {
            email
                .and_then(|e| e.split('@').next())
                .filter(|n| !n.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| "Athlete".to_string())
}
