//! Persistence layer (local JSON collections).

pub mod local;

pub use local::{spawn_mtime_poller, ActivityStore, StoreEvent};

/// Collection names as constants.
pub mod collections {
    pub const WORKOUTS: &str = "manual_workouts";
    pub const MEALS: &str = "manual_meals";
    pub const WEIGHTS: &str = "weight_logs";
    /// Single-document collection (one object, not an array)
    pub const PROFILE: &str = "profile";
}
