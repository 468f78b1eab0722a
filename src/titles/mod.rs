//! Titles earned by defeating monsters.

pub mod data;
pub mod logic;
pub mod types;

pub use logic::{count_by_star, generate_title, remove_title, sorted_by_star, RerollSession};
pub use types::{GeneratedTitle, Title};
