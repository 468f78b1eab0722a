//! User settings and effect presets.

pub mod presets;
pub mod settings;

pub use presets::{ExplosionPreset, EXPLOSION_PRESETS};
pub use settings::{
    BackgroundMode, ComboSettings, ExplosionOrder, ExplosionOverride, ExplosionSettings,
    FlowSettings, GifMode, Settings, ShakeSettings, SoundSettings,
};
