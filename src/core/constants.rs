// Host loop timing
pub const TICK_INTERVAL_MS: u64 = 100;
pub const INPUT_POLL_MS: u64 = 50;
pub const NOTIFICATION_DURATION_MS: i64 = 3_000;
pub const MS_PER_MINUTE: i64 = 60_000;

// Input classification
pub const BULK_INSERT_THRESHOLD: i64 = 10; // net change above this is a paste, not typing
pub const RAPID_REPEAT_MS: i64 = 50; // faster than this is auto-repeat or IME noise

// Combo and flow
pub const FLOW_COMBO_THRESHOLD: u32 = 20;
// (minimum combo, loot chance multiplier), highest threshold first
pub const FLOW_BONUS_STEPS: [(u32, u32); 5] = [(100, 6), (80, 5), (60, 4), (40, 3), (20, 2)];

// Treasure
pub const TIER_COUNT: u8 = 5;
pub const PROMOTION_RATIO: u32 = 10;

// Monster lifecycle
pub const IDLE_REGEN_INTERVAL_MS: i64 = 6_000;
pub const IDLE_REGEN_AMOUNT: u32 = 1;
pub const CUSTOM_MONSTER_HP: [u32; 5] = [50, 250, 500, 1_000, 2_000];

// Titles
pub const MAX_TITLE_REROLLS: u32 = 5;

// Save file
pub const DATA_DIR_NAME: &str = ".shanhai";
pub const DATA_FILE_NAME: &str = "data.json";
