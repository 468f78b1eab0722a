//! JSON save file: settings, player progress and the active monster.
//!
//! Stored at `~/.shanhai/data.json` by default.

pub mod save_data;
pub mod store;

pub use save_data::SaveData;
pub use store::{data_dir, default_save_path, load_or_default, save, SaveError};
