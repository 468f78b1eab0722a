//! Editor input aggregation: document length deltas and held-key tracking.

use super::constants::BULK_INSERT_THRESHOLD;

/// A key-down notification from the host editor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPress {
    /// DOM-style key code, e.g. `"KeyA"`, `"Enter"`, `"Backspace"`.
    pub code: String,
    pub is_repeat: bool,
    pub is_composing: bool,
    pub ctrl: bool,
    pub meta: bool,
    pub alt: bool,
}

impl KeyPress {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            ..Self::default()
        }
    }

    pub fn repeated(mut self) -> Self {
        self.is_repeat = true;
        self
    }

    pub fn has_modifier(&self) -> bool {
        self.ctrl || self.meta || self.alt
    }
}

/// Which sample of a sound pack a key press plays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeySound {
    Key,
    Key2,
    Enter,
    Space,
    Delete,
}

impl KeySound {
    pub fn for_code(code: &str) -> Self {
        match code {
            "Enter" | "NumpadEnter" => KeySound::Enter,
            "Space" => KeySound::Space,
            "Backspace" | "Delete" => KeySound::Delete,
            "ArrowLeft" | "ArrowRight" | "ArrowUp" | "ArrowDown" | "Tab" | "Escape" => {
                KeySound::Key2
            }
            _ => KeySound::Key,
        }
    }
}

/// Signed change in document length for one editor-change notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputDelta {
    pub net_change: i64,
    pub key_held: bool,
}

impl InputDelta {
    pub fn is_bulk_insert(&self) -> bool {
        self.net_change > BULK_INSERT_THRESHOLD
    }

    /// Characters that earn loot rolls. Zero for deletions, pastes and held keys.
    pub fn loot_units(&self) -> u32 {
        if self.net_change > 0 && !self.key_held && !self.is_bulk_insert() {
            self.net_change as u32
        } else {
            0
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct InputAggregator {
    previous_len: usize,
    key_held: bool,
}

impl InputAggregator {
    pub fn new(initial_len: usize) -> Self {
        Self {
            previous_len: initial_len,
            key_held: false,
        }
    }

    /// Adopt a new baseline length without producing a delta (document switch).
    pub fn rebase(&mut self, len: usize) {
        self.previous_len = len;
    }

    pub fn key_down(&mut self, is_repeat: bool) {
        self.key_held = is_repeat;
    }

    pub fn key_up(&mut self) {
        self.key_held = false;
    }

    pub fn key_held(&self) -> bool {
        self.key_held
    }

    pub fn previous_len(&self) -> usize {
        self.previous_len
    }

    pub fn measure(&mut self, current_len: usize) -> InputDelta {
        let net_change = current_len as i64 - self.previous_len as i64;
        self.previous_len = current_len;
        InputDelta {
            net_change,
            key_held: self.key_held,
        }
    }
}
