//! Core game state: the battle engine, its events and the input plumbing
//! feeding it.

pub mod battle;
pub mod constants;
pub mod engine;
pub mod events;
pub mod input;
pub mod player;
pub mod timers;

pub use battle::{BattleReport, BattleStats};
pub use engine::BattleEngine;
pub use events::{EngineEvent, Notice};
pub use input::{InputAggregator, InputDelta, KeyPress, KeySound};
pub use player::PlayerData;
pub use timers::TimerSlot;
