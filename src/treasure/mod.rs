//! Per-tier treasure counts with ten-for-one promotion.

pub mod ledger;

pub use ledger::{Promotions, TreasureLedger};
