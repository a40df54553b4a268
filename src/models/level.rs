// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! XP level tiers and the level resolver.

use serde::Serialize;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// One row of the static level table.
#[derive(Debug, Clone, Copy)]
pub struct LevelTier {
    pub name: &'static str,
    pub min_xp: u32,
    pub max_xp: u32,
}

/// The level ladder, lowest first.
///
/// Contiguous and gap-free: each tier's `max_xp` equals the next tier's
/// `min_xp`. XP beyond the top tier stays "Legend" at 100% progress.
pub const LEVEL_TIERS: [LevelTier; 5] = [
    LevelTier {
        name: "Beginner",
        min_xp: 0,
        max_xp: 500,
    },
    LevelTier {
        name: "Fitness Enthusiast",
        min_xp: 500,
        max_xp: 2000,
    },
    LevelTier {
        name: "Elite",
        min_xp: 2000,
        max_xp: 4000,
    },
    LevelTier {
        name: "Champion",
        min_xp: 4000,
        max_xp: 7000,
    },
    LevelTier {
        name: "Legend",
        min_xp: 7000,
        max_xp: 10000,
    },
];

/// Resolved level for API responses.
#[derive(Debug, Clone, Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct LevelStatus {
    /// Tier name ("Beginner" .. "Legend")
    pub level: String,
    /// Tier XP floor
    pub min_xp: u32,
    /// Tier XP ceiling
    pub max_xp: u32,
    /// XP the resolution was computed from (clamped at 0)
    pub xp: u32,
    /// Progress within the tier, 0-100
    pub progress_percent: u8,
}

/// Index into [`LEVEL_TIERS`] of the highest tier whose floor is <= `xp`.
///
/// Linear scan from the top; the table has five entries.
fn resolve_index(xp: u32) -> usize {
    for i in (0..LEVEL_TIERS.len()).rev() {
        if xp >= LEVEL_TIERS[i].min_xp {
            return i;
        }
    }
    0
}

/// Map a cumulative XP total to its tier and progress-within-tier.
///
/// Negative inputs (possible via hand-edited store files) clamp to 0;
/// progress clamps to the 0-100 range, so XP past the top tier reports
/// "Legend" at 100%.
pub fn resolve_level(xp: i64) -> LevelStatus {
    let xp = u32::try_from(xp.max(0)).unwrap_or(u32::MAX);
    let tier = &LEVEL_TIERS[resolve_index(xp)];

    let span = (tier.max_xp - tier.min_xp) as f64;
    let into_tier = xp.saturating_sub(tier.min_xp) as f64;
    let raw = (100.0 * into_tier / span).round();
    let progress_percent = raw.clamp(0.0, 100.0) as u8;

    LevelStatus {
        level: tier.name.to_string(),
        min_xp: tier.min_xp,
        max_xp: tier.max_xp,
        xp,
        progress_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_contiguous_and_increasing() {
        for pair in LEVEL_TIERS.windows(2) {
            assert_eq!(pair[0].max_xp, pair[1].min_xp);
            assert!(pair[0].min_xp < pair[0].max_xp);
        }
        assert_eq!(LEVEL_TIERS[0].min_xp, 0);
        assert_eq!(LEVEL_TIERS[LEVEL_TIERS.len() - 1].max_xp, 10000);
    }

    #[test]
    fn test_zero_xp_is_beginner_at_zero_progress() {
        let status = resolve_level(0);
        assert_eq!(status.level, "Beginner");
        assert_eq!(status.progress_percent, 0);
    }

    #[test]
    fn test_negative_xp_clamps_to_zero() {
        let status = resolve_level(-500);
        assert_eq!(status.level, "Beginner");
        assert_eq!(status.xp, 0);
        assert_eq!(status.progress_percent, 0);
    }

    #[test]
    fn test_boundary_xp_lands_in_upper_tier() {
        // Floors are inclusive: exactly 500 XP is already an Enthusiast
        let status = resolve_level(500);
        assert_eq!(status.level, "Fitness Enthusiast");
        assert_eq!(status.progress_percent, 0);
    }

    #[test]
    fn test_mid_tier_progress() {
        // 1250 XP: 750 into the 1500-wide Enthusiast tier
        let status = resolve_level(1250);
        assert_eq!(status.level, "Fitness Enthusiast");
        assert_eq!(status.progress_percent, 50);
    }

    #[test]
    fn test_overflow_clamps_at_top_tier() {
        let status = resolve_level(10_000_000);
        assert_eq!(status.level, "Legend");
        assert_eq!(status.progress_percent, 100);
    }

    #[test]
    fn test_tier_rank_is_monotonic_in_xp() {
        let mut last_rank = 0;
        for xp in (0..12_000).step_by(50) {
            let rank = resolve_index(xp);
            assert!(rank >= last_rank, "rank regressed at xp={}", xp);
            last_rank = rank;
        }
        assert_eq!(last_rank, LEVEL_TIERS.len() - 1);
    }
}
