//! Monsters: the static catalog, custom opponents and HP bookkeeping.

pub mod data;
pub mod types;

pub use data::{default_template, find_template, templates_by_theme, MONSTERS};
pub use types::{apply_damage, CustomMonster, Monster, MonsterChoice, MonsterError, MonsterTemplate};
