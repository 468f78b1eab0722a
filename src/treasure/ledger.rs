use crate::core::constants::{PROMOTION_RATIO, TIER_COUNT};
use serde::{Deserialize, Serialize};

/// Slots in the persisted array; slot 0 is unused so tiers index directly.
const SLOTS: usize = TIER_COUNT as usize + 1;

/// Treasure counts for tiers 1-5.
///
/// Serialized as a plain six-element number array (`[0, t1, t2, t3, t4, t5]`).
/// Shorter arrays load with missing tiers at zero; extra entries are dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct TreasureLedger {
    counts: [u32; SLOTS],
}

/// Number of treasures promoted out of each tier by one conversion pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Promotions([u32; SLOTS]);

impl Promotions {
    /// Promotions out of `tier` (only tiers 1-4 ever promote).
    pub fn promoted_from(&self, tier: u8) -> u32 {
        self.0.get(tier as usize).copied().unwrap_or(0)
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    pub fn any(&self) -> bool {
        self.total() > 0
    }
}

impl TreasureLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_counts(tiers: [u32; TIER_COUNT as usize]) -> Self {
        let mut ledger = Self::new();
        for (i, count) in tiers.iter().enumerate() {
            ledger.counts[i + 1] = *count;
        }
        ledger
    }

    pub fn count(&self, tier: u8) -> u32 {
        if tier == 0 {
            return 0;
        }
        self.counts.get(tier as usize).copied().unwrap_or(0)
    }

    /// Add treasures to a tier. Tiers outside 1-5 are ignored.
    pub fn add(&mut self, tier: u8, amount: u32) {
        if tier == 0 {
            return;
        }
        if let Some(count) = self.counts.get_mut(tier as usize) {
            *count = count.saturating_add(amount);
        }
    }

    /// Counts for tiers 1-5 in order.
    pub fn tiers(&self) -> [u32; TIER_COUNT as usize] {
        let mut out = [0; TIER_COUNT as usize];
        out.copy_from_slice(&self.counts[1..]);
        out
    }

    pub fn iter(&self) -> impl Iterator<Item = (u8, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .skip(1)
            .map(|(tier, count)| (tier as u8, *count))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.iter().all(|c| *c == 0)
    }

    /// Worth of the ledger in tier-1 treasures.
    pub fn total_value(&self) -> u64 {
        self.iter().fold(0u64, |acc, (tier, count)| {
            acc + count as u64 * (PROMOTION_RATIO as u64).pow(tier as u32 - 1)
        })
    }

    /// Promote every ten treasures of a tier into one of the next tier.
    ///
    /// One ascending pass over tiers 1-4; tier 5 has no promotion target and
    /// keeps growing. Calling it again on a converted ledger changes nothing.
    pub fn convert(&mut self) -> Promotions {
        let mut promotions = Promotions::default();
        for tier in 1..TIER_COUNT as usize {
            let promoted = self.counts[tier] / PROMOTION_RATIO;
            if promoted == 0 {
                continue;
            }
            self.counts[tier] %= PROMOTION_RATIO;
            self.counts[tier + 1] = self.counts[tier + 1].saturating_add(promoted);
            promotions.0[tier] = promoted;
        }
        promotions
    }
}

impl From<Vec<u32>> for TreasureLedger {
    fn from(slots: Vec<u32>) -> Self {
        let mut ledger = Self::new();
        for (i, count) in slots.into_iter().enumerate().skip(1).take(SLOTS - 1) {
            ledger.counts[i] = count;
        }
        ledger
    }
}

impl From<TreasureLedger> for Vec<u32> {
    fn from(ledger: TreasureLedger) -> Self {
        ledger.counts.to_vec()
    }
}
