//! Calendar-period aggregation over the record collections.
//!
//! Everything here is a pure function of (records, today): a daily series
//! for the activity chart, week/month history rows, and windowed range
//! stats. Nothing is cached; callers recompute from the store on demand.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::{ActivityRecord, WeightRecord};
use crate::time_utils::{local_date_of_millis, millis_at_local_day_end, millis_at_local_midnight};

/// Periods shown in the history list.
pub const HISTORY_PERIODS: usize = 6;

/// Days in the daily series for the week view.
pub const WEEK_SERIES_DAYS: usize = 7;

/// Days in the daily series for the month view.
pub const MONTH_SERIES_DAYS: usize = 30;

/// Which calendar period the activity screen is grouping by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodKind {
    Week,
    Month,
}

impl PeriodKind {
    /// Lookback length of the daily series for this view.
    pub fn series_days(self) -> usize {
        match self {
            PeriodKind::Week => WEEK_SERIES_DAYS,
            PeriodKind::Month => MONTH_SERIES_DAYS,
        }
    }
}

/// One day of the daily series.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct DailyStat {
    /// ISO date label ("2026-08-25")
    pub date: String,
    /// Short weekday label ("Tue")
    pub weekday: String,
    /// Day of month (1-31)
    pub day_number: u32,
    /// Sum of meal calories that day
    pub calories_in: f64,
    /// Sum of workout calories that day
    pub calories_out: f64,
    /// Whether any workout was logged that day
    pub has_workout: bool,
    /// Total workout minutes that day
    pub workout_minutes: f64,
}

/// One row of the week/month history list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct PeriodBucket {
    /// Period start (epoch milliseconds, local midnight)
    pub start_timestamp: i64,
    /// Period end (epoch milliseconds, 23:59:59.999 local)
    pub end_timestamp: i64,
    /// "Current Week", "Week 35", "August", ...
    pub label: String,
    /// Date range ("24/8 - 30/8") for weeks, year ("2026") for months
    pub sub_label: String,
    /// Workouts logged in the period
    pub workout_count: u32,
    /// Total workout minutes in the period
    pub total_duration_minutes: f64,
    /// Total workout calories in the period
    pub total_calories_burned: f64,
    /// Mean of weight records in the period; 0 when there are none.
    /// Callers distinguish "no data" from a real zero via the weight log.
    pub average_weight: f64,
}

/// Summed macros for a set of meals.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct MacroTotals {
    pub calories: f64,
    pub protein: f64,
    pub carbs: f64,
    pub fats: f64,
}

/// Workout totals over a trailing day window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct WorkoutRangeStats {
    pub total_workouts: u32,
    pub total_duration_minutes: f64,
    pub total_calories_burned: f64,
    /// Distinct days with at least one workout
    pub workout_days: u32,
    pub period_days: u32,
}

/// Nutrition totals over a trailing day window.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct DietRangeStats {
    pub total_meals: u32,
    pub total_calories: f64,
    pub total_protein: f64,
    pub total_carbs: f64,
    pub total_fats: f64,
    /// Floor of total calories over the window length
    pub avg_daily_calories: f64,
    pub period_days: u32,
}

/// Records dated after `today` (or with unrepresentable timestamps) never
/// reach a bucket.
fn bucket_date(timestamp: i64, today: NaiveDate) -> Option<NaiveDate> {
    local_date_of_millis(timestamp).filter(|date| *date <= today)
}

/// Build the daily series: `days` consecutive calendar days ending today.
///
/// Always exactly `days` entries, however sparse the records are.
pub fn build_daily_series(
    workouts: &[ActivityRecord],
    meals: &[ActivityRecord],
    days: usize,
    today: NaiveDate,
) -> Vec<DailyStat> {
    let mut series = Vec::with_capacity(days);

    for i in (0..days as i64).rev() {
        let day = today - chrono::Duration::days(i);

        let mut calories_in = 0.0;
        for meal in meals {
            if bucket_date(meal.timestamp, today) == Some(day) {
                calories_in += meal.calories.unwrap_or(0.0);
            }
        }

        let mut calories_out = 0.0;
        let mut workout_minutes = 0.0;
        let mut has_workout = false;
        for workout in workouts {
            if bucket_date(workout.timestamp, today) == Some(day) {
                has_workout = true;
                calories_out += workout.calories.unwrap_or(0.0);
                workout_minutes += workout.duration_minutes.unwrap_or(0.0);
            }
        }

        series.push(DailyStat {
            date: day.format("%Y-%m-%d").to_string(),
            weekday: day.format("%a").to_string(),
            day_number: day.day(),
            calories_in,
            calories_out,
            has_workout,
            workout_minutes,
        });
    }

    series
}

/// Build the history list: the most recent [`HISTORY_PERIODS`] weeks or
/// months, newest first.
///
/// The current period is always present; a past period appears only if it
/// holds at least one workout or weight record.
pub fn build_period_history(
    kind: PeriodKind,
    workouts: &[ActivityRecord],
    weights: &[WeightRecord],
    today: NaiveDate,
) -> Vec<PeriodBucket> {
    let mut history = Vec::new();

    for i in 0..HISTORY_PERIODS {
        let (start_date, end_date, label, sub_label) = match kind {
            PeriodKind::Week => week_period(today, i),
            PeriodKind::Month => month_period(today, i),
        };

        let start_ms = millis_at_local_midnight(start_date);
        let end_ms = millis_at_local_day_end(end_date);

        let in_range = |ts: i64| {
            // Date-granular future exclusion first, then the raw range
            bucket_date(ts, today).is_some() && ts >= start_ms && ts <= end_ms
        };

        let mut workout_count = 0u32;
        let mut total_duration_minutes = 0.0;
        let mut total_calories_burned = 0.0;
        for workout in workouts {
            if in_range(workout.timestamp) {
                workout_count += 1;
                total_duration_minutes += workout.duration_minutes.unwrap_or(0.0);
                total_calories_burned += workout.calories.unwrap_or(0.0);
            }
        }

        let mut weight_sum = 0.0;
        let mut weight_count = 0u32;
        for weight in weights {
            if in_range(weight.timestamp) {
                weight_sum += weight.weight;
                weight_count += 1;
            }
        }
        let average_weight = if weight_count > 0 {
            weight_sum / weight_count as f64
        } else {
            0.0
        };

        if i == 0 || workout_count > 0 || weight_count > 0 {
            history.push(PeriodBucket {
                start_timestamp: start_ms,
                end_timestamp: end_ms,
                label,
                sub_label,
                workout_count,
                total_duration_minutes,
                total_calories_burned,
                average_weight,
            });
        }
    }

    history
}

/// Sum meal macros (missing fields count as 0).
pub fn macro_totals(meals: &[ActivityRecord]) -> MacroTotals {
    let mut totals = MacroTotals::default();
    for meal in meals {
        totals.calories += meal.calories.unwrap_or(0.0);
        totals.protein += meal.protein.unwrap_or(0.0);
        totals.carbs += meal.carbs.unwrap_or(0.0);
        totals.fats += meal.fats.unwrap_or(0.0);
    }
    totals
}

/// Workout totals over the last `days` days (inclusive of today).
pub fn workout_range_stats(
    workouts: &[ActivityRecord],
    days: u32,
    today: NaiveDate,
) -> WorkoutRangeStats {
    let window_start = today - chrono::Duration::days(days as i64);
    let mut stats = WorkoutRangeStats {
        total_workouts: 0,
        total_duration_minutes: 0.0,
        total_calories_burned: 0.0,
        workout_days: 0,
        period_days: days,
    };

    let mut active_days = std::collections::BTreeSet::new();
    for workout in workouts {
        if let Some(date) = bucket_date(workout.timestamp, today) {
            if date >= window_start {
                stats.total_workouts += 1;
                stats.total_duration_minutes += workout.duration_minutes.unwrap_or(0.0);
                stats.total_calories_burned += workout.calories.unwrap_or(0.0);
                active_days.insert(date);
            }
        }
    }
    stats.workout_days = active_days.len() as u32;

    stats
}

/// Nutrition totals over the last `days` days (inclusive of today).
pub fn diet_range_stats(meals: &[ActivityRecord], days: u32, today: NaiveDate) -> DietRangeStats {
    let window_start = today - chrono::Duration::days(days as i64);
    let mut total_meals = 0u32;
    let mut totals = MacroTotals::default();

    for meal in meals {
        if let Some(date) = bucket_date(meal.timestamp, today) {
            if date >= window_start {
                total_meals += 1;
                totals.calories += meal.calories.unwrap_or(0.0);
                totals.protein += meal.protein.unwrap_or(0.0);
                totals.carbs += meal.carbs.unwrap_or(0.0);
                totals.fats += meal.fats.unwrap_or(0.0);
            }
        }
    }

    DietRangeStats {
        total_meals,
        total_calories: totals.calories,
        total_protein: totals.protein,
        total_carbs: totals.carbs,
        total_fats: totals.fats,
        avg_daily_calories: (totals.calories / days.max(1) as f64).floor(),
        period_days: days,
    }
}

// ─── Period Boundaries ───────────────────────────────────────────

/// Week `i` back from today: starts on the most recent Monday minus
/// `7*i` days, ends six days later.
fn week_period(today: NaiveDate, i: usize) -> (NaiveDate, NaiveDate, String, String) {
    let monday = today - chrono::Duration::days(today.weekday().num_days_from_monday() as i64);
    let start = monday - chrono::Duration::days(7 * i as i64);
    let end = start + chrono::Duration::days(6);

    let label = if i == 0 {
        "Current Week".to_string()
    } else {
        format!("Week {}", week_number(start))
    };
    let sub_label = format!(
        "{}/{} - {}/{}",
        start.day(),
        start.month(),
        end.day(),
        end.month()
    );

    (start, end, label, sub_label)
}

/// Month `i` back from today: first to last day of that calendar month.
fn month_period(today: NaiveDate, i: usize) -> (NaiveDate, NaiveDate, String, String) {
    let months0 = today.year() as i64 * 12 + today.month0() as i64 - i as i64;
    let year = months0.div_euclid(12) as i32;
    let month = months0.rem_euclid(12) as u32 + 1;

    // from_ymd_opt only fails outside chrono's +/-262000-year range
    let start = NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(today);
    let next_month = NaiveDate::from_ymd_opt(
        if month == 12 { year + 1 } else { year },
        if month == 12 { 1 } else { month + 1 },
        1,
    )
    .unwrap_or(start);
    let end = next_month.pred_opt().unwrap_or(start);

    let label = start.format("%B").to_string();
    let sub_label = start.year().to_string();

    (start, end, label, sub_label)
}

/// Week-of-year label used by the history rows.
///
/// This is the client's longstanding `ceil((days_since_jan1 +
/// jan1_weekday_sunday_based + 1) / 7)` formula, which is close to but not
/// the same as ISO-8601 week numbering near year boundaries. Kept verbatim
/// so displayed labels do not change.
fn week_number(date: NaiveDate) -> u32 {
    let jan1 = NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date);
    let days = (date - jan1).num_days();
    // n >= 1 always (days >= 0 within the same year), so the unsigned cast is
    // lossless; `div_ceil` is only stable on unsigned integer types.
    let n = (days + jan1.weekday().num_days_from_sunday() as i64 + 1) as u64;
    n.div_ceil(7) as u32
}
