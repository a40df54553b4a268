// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod ledger;

pub use ledger::{ActivityLedger, NewMeal, NewWeight, NewWorkout, XP_PER_LOG};
