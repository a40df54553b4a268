// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Consecutive-day workout streaks.
//!
//! A streak is a pure function of the workout collection; it is never
//! stored. Walking backward from today, each calendar day with at least
//! one workout extends the streak. Today gets one forgiveness: while the
//! day is still in progress, its absence does not break the chain.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

use crate::models::ActivityRecord;
use crate::time_utils::local_date_of_millis;

/// Bound on the backward walk; also bounds the cost of a streak
/// computation over hand-edited store files with absurd dates.
const MAX_STREAK_WALK_DAYS: u32 = 365;

/// Derived streak summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct StreakState {
    /// Consecutive active days ending today (or yesterday, see module doc)
    pub current_streak: u32,
    /// Longest run of consecutive active days anywhere in the history
    pub longest_streak: u32,
    /// Most recent active day, if any
    #[cfg_attr(feature = "binding-generation", ts(type = "string | null"))]
    pub last_activity_date: Option<NaiveDate>,
}

/// Compute the streak state from an (unsorted) workout collection.
///
/// Records with timestamps after `today` or outside chrono's range do not
/// contribute to any day.
pub fn compute_streak(workouts: &[ActivityRecord], today: NaiveDate) -> StreakState {
    let active = active_dates(workouts, today);

    StreakState {
        current_streak: walk_back(&active, today),
        longest_streak: longest_run(&active),
        last_activity_date: active.iter().next_back().copied(),
    }
}

/// Distinct local calendar dates with at least one workout.
fn active_dates(workouts: &[ActivityRecord], today: NaiveDate) -> BTreeSet<NaiveDate> {
    workouts
        .iter()
        .filter_map(|r| local_date_of_millis(r.timestamp))
        .filter(|date| *date <= today)
        .collect()
}

/// Backward walk from `today` with the single forgiveness step.
fn walk_back(active: &BTreeSet<NaiveDate>, today: NaiveDate) -> u32 {
    let mut count = 0;
    let mut check = today;

    for _ in 0..MAX_STREAK_WALK_DAYS {
        if active.contains(&check) {
            count += 1;
        } else if check != today {
            break;
        }
        // check == today without a workout falls through uncounted:
        // the day is still in progress
        match check.pred_opt() {
            Some(prev) => check = prev,
            None => break,
        }
    }

    count
}

/// Length of the longest run of consecutive dates in the set.
fn longest_run(active: &BTreeSet<NaiveDate>) -> u32 {
    let mut longest = 0u32;
    let mut run = 0u32;
    let mut prev: Option<NaiveDate> = None;

    for date in active {
        run = match prev.and_then(|p| p.succ_opt()) {
            Some(next) if next == *date => run + 1,
            _ => 1,
        };
        longest = longest.max(run);
        prev = Some(*date);
    }

    longest
}
