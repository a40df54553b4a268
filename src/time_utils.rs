// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Shared helpers for local-day arithmetic over epoch-millisecond timestamps.
//!
//! All record timestamps are epoch milliseconds interpreted in the server's
//! local timezone; a "day" starts at local midnight.

use chrono::{DateTime, Local, NaiveDate, SecondsFormat, TimeZone, Utc};

/// Format a UTC timestamp as RFC3339 using a `Z` suffix.
pub fn format_utc_rfc3339(date: DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Secs, true)
}

/// Current time as epoch milliseconds.
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Today's date in the local timezone.
pub fn today_local() -> NaiveDate {
    Local::now().date_naive()
}

/// Map an epoch-millisecond timestamp to its local calendar date.
///
/// Returns `None` for timestamps chrono cannot represent; callers treat
/// those records as not belonging to any day bucket.
pub fn local_date_of_millis(millis: i64) -> Option<NaiveDate> {
    match Local.timestamp_millis_opt(millis) {
        chrono::LocalResult::Single(dt) => Some(dt.date_naive()),
        chrono::LocalResult::Ambiguous(dt, _) => Some(dt.date_naive()),
        chrono::LocalResult::None => None,
    }
}

/// Epoch milliseconds at local midnight of `date`.
///
/// During a DST gap the earliest valid local time of the day is used.
pub fn millis_at_local_midnight(date: NaiveDate) -> i64 {
    let naive = date.and_hms_opt(0, 0, 0).unwrap_or_default();
    match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.timestamp_millis(),
        chrono::LocalResult::Ambiguous(dt, _) => dt.timestamp_millis(),
        chrono::LocalResult::None => {
            // Midnight skipped by a DST transition
            let later = date.and_hms_opt(1, 0, 0).unwrap_or_default();
            Local
                .from_local_datetime(&later)
                .earliest()
                .map(|dt| dt.timestamp_millis())
                .unwrap_or_default()
        }
    }
}

/// Epoch milliseconds at 23:59:59.999 local time of `date`.
pub fn millis_at_local_day_end(date: NaiveDate) -> i64 {
    let naive = date.and_hms_milli_opt(23, 59, 59, 999).unwrap_or_default();
    match Local.from_local_datetime(&naive) {
        chrono::LocalResult::Single(dt) => dt.timestamp_millis(),
        chrono::LocalResult::Ambiguous(_, dt) => dt.timestamp_millis(),
        chrono::LocalResult::None => millis_at_local_midnight(date),
    }
}
