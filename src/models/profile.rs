//! User profile for storage and API.

use serde::{Deserialize, Serialize};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// User profile stored per user.
///
/// XP is the only gamification state that is genuinely stored rather than
/// derived; streaks and level titles are recomputed from the record
/// collections on every read.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "frontend/src/generated/")
)]
pub struct UserProfile {
    /// User ID (externally assigned, also the store partition key)
    pub id: String,
    /// Display name
    pub name: String,
    /// Email address (may be None for demo/guest users)
    pub email: Option<String>,
    /// Body weight in kilograms (onboarding value, not the weight log)
    #[serde(default)]
    pub weight_kg: f64,
    /// Height in centimeters
    #[serde(default)]
    pub height_cm: f64,
    /// Training goal ("Muscle Gain", "Fat Loss", "Maintenance")
    #[serde(default)]
    pub fitness_goal: String,
    /// Self-declared experience ("Beginner", "Intermediate", "Advanced").
    /// Distinct from the XP level title.
    #[serde(default)]
    pub fitness_level: String,
    /// Cumulative experience points
    #[serde(default)]
    pub xp: u32,
    /// When the profile was created (RFC3339)
    pub created_at: String,
}

impl UserProfile {
    /// Fresh profile for a first-time user.
    pub fn new(id: &str, name: &str, email: Option<String>, created_at: &str) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            email,
            weight_kg: 0.0,
            height_cm: 0.0,
            fitness_goal: String::new(),
            fitness_level: String::new(),
            xp: 0,
            created_at: created_at.to_string(),
        }
    }

    /// The built-in demo profile (matches the mobile client's mock user).
    pub fn demo(created_at: &str) -> Self {
        Self {
            id: DEMO_USER_ID.to_string(),
            name: "Alex".to_string(),
            email: Some("demo@fitbridge.app".to_string()),
            weight_kg: 78.0,
            height_cm: 180.0,
            fitness_goal: "Muscle Gain".to_string(),
            fitness_level: "Intermediate".to_string(),
            xp: 1250,
            created_at: created_at.to_string(),
        }
    }
}

/// Fixed user ID for demo-mode sessions.
pub const DEMO_USER_ID: &str = "demo-user";
