//! Combo counter and flow state.

pub mod tracker;

pub use tracker::{flow_bonus_multiplier, ComboOutcome, ComboReset, ComboState, ComboTracker, IgnoreReason};
