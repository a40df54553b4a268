// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stored activity and weight records.
//!
//! Records are immutable once written: the only mutation the store offers
//! is delete (and re-add). Numeric fields are optional because logs written
//! by older client revisions omit fields they did not track; every
//! aggregation treats a missing value as 0.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Anything carrying an epoch-millisecond timestamp.
///
/// The store sorts collections ascending by this key on every read, so
/// downstream aggregation never assumes insertion order.
pub trait Timestamped {
    fn timestamp_millis(&self) -> i64;
}

/// A logged workout or meal.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct ActivityRecord {
    /// Opaque ID, unique within its collection
    pub id: String,
    /// Workout title or meal name
    #[serde(default)]
    pub name: Option<String>,
    /// When the activity happened (epoch milliseconds, local timezone)
    pub timestamp: i64,
    /// Workout duration in minutes
    #[serde(default)]
    pub duration_minutes: Option<f64>,
    /// Calories burned (workout) or consumed (meal)
    #[serde(default)]
    pub calories: Option<f64>,
    /// Protein in grams (meals)
    #[serde(default)]
    pub protein: Option<f64>,
    /// Carbohydrates in grams (meals)
    #[serde(default)]
    pub carbs: Option<f64>,
    /// Fats in grams (meals)
    #[serde(default)]
    pub fats: Option<f64>,
}

impl Timestamped for ActivityRecord {
    fn timestamp_millis(&self) -> i64 {
        self.timestamp
    }
}

/// A logged body-weight measurement.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct WeightRecord {
    /// Opaque ID, unique within its collection
    pub id: String,
    /// Body weight in kilograms
    pub weight: f64,
    /// When the measurement was taken (epoch milliseconds, local timezone)
    pub timestamp: i64,
}

impl Timestamped for WeightRecord {
    fn timestamp_millis(&self) -> i64 {
        self.timestamp
    }
}
