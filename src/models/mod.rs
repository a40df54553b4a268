// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod level;
pub mod profile;
pub mod record;
pub mod stats;
pub mod streak;

pub use level::{resolve_level, LevelStatus, LevelTier, LEVEL_TIERS};
pub use profile::UserProfile;
pub use record::{ActivityRecord, Timestamped, WeightRecord};
pub use stats::{DailyStat, PeriodBucket, PeriodKind};
pub use streak::{compute_streak, StreakState};
