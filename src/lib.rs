//! Shanhai - typing battles against the beasts of the Classic of Mountains and Seas.
//!
//! Every keystroke may turn up treasure, and treasure is what wounds the
//! monster. This library holds the whole engine so it can be tested without
//! a terminal; the binary in `main.rs` is a thin host around it.

pub mod combo;
pub mod config;
pub mod core;
pub mod dice;
pub mod loot;
pub mod monster;
pub mod persistence;
pub mod titles;
pub mod treasure;

pub use crate::core::{BattleEngine, EngineEvent, Notice};
pub use dice::{Dice, ScriptedDice};
