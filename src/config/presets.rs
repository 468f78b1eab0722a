//! Built-in explosion presets, selectable by index.

use super::settings::{BackgroundMode, ExplosionOrder, ExplosionOverride, GifMode};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExplosionPreset {
    pub kind: &'static str,
    pub max_explosions: Option<u32>,
    pub size: Option<u32>,
    pub frequency: Option<u32>,
    pub explosion_order: Option<ExplosionOrder>,
    pub gif_mode: Option<GifMode>,
    pub duration: Option<u32>,
    pub offset: Option<f64>,
    pub background_mode: Option<BackgroundMode>,
    pub image_list: Option<&'static [&'static str]>,
}

impl ExplosionPreset {
    const EMPTY: ExplosionPreset = ExplosionPreset {
        kind: "",
        max_explosions: None,
        size: None,
        frequency: None,
        explosion_order: None,
        gif_mode: None,
        duration: None,
        offset: None,
        background_mode: None,
        image_list: None,
    };

    pub fn to_override(&self) -> ExplosionOverride {
        ExplosionOverride {
            max_explosions: self.max_explosions,
            size: self.size,
            frequency: self.frequency,
            explosion_order: self.explosion_order,
            gif_mode: self.gif_mode,
            duration: self.duration,
            offset: self.offset,
            background_mode: self.background_mode,
            image_list: self
                .image_list
                .map(|list| list.iter().map(|s| s.to_string()).collect()),
        }
    }
}

pub const EXPLOSION_PRESETS: &[ExplosionPreset] = &[
    ExplosionPreset {
        kind: "confetti",
        max_explosions: Some(3),
        size: Some(10),
        image_list: Some(&["confetti.gif"]),
        ..ExplosionPreset::EMPTY
    },
    ExplosionPreset {
        kind: "fireworks",
        max_explosions: Some(5),
        size: Some(14),
        frequency: Some(2),
        gif_mode: Some(GifMode::Restart),
        duration: Some(600),
        image_list: Some(&["fireworks-1.gif", "fireworks-2.gif"]),
        ..ExplosionPreset::EMPTY
    },
    ExplosionPreset {
        kind: "ink",
        max_explosions: Some(2),
        size: Some(8),
        explosion_order: Some(ExplosionOrder::Sequential),
        background_mode: Some(BackgroundMode::Image),
        offset: Some(0.1),
        image_list: Some(&["ink-1.png", "ink-2.png", "ink-3.png"]),
        ..ExplosionPreset::EMPTY
    },
    ExplosionPreset {
        kind: "minimal",
        max_explosions: Some(1),
        size: Some(6),
        duration: Some(250),
        ..ExplosionPreset::EMPTY
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_preset_is_confetti() {
        assert_eq!(EXPLOSION_PRESETS[0].kind, "confetti");
    }

    #[test]
    fn test_unset_fields_fall_back_to_defaults() {
        let resolved = EXPLOSION_PRESETS[3].to_override().resolve(true);
        assert_eq!(resolved.max_explosions, 1);
        assert_eq!(resolved.duration, 250);
        assert_eq!(resolved.offset, 0.25);
        assert!(resolved.image_list.is_empty());
    }

    #[test]
    fn test_image_lists_copied() {
        let resolved = EXPLOSION_PRESETS[2].to_override().resolve(true);
        assert_eq!(resolved.image_list.len(), 3);
        assert_eq!(resolved.explosion_order, ExplosionOrder::Sequential);
    }
}
