use crate::core::constants::{FLOW_BONUS_STEPS, FLOW_COMBO_THRESHOLD, RAPID_REPEAT_MS};
use crate::core::input::InputDelta;
use crate::core::timers::TimerSlot;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComboState {
    pub combo_count: u32,
    /// Unix ms of the last keystroke that counted toward the combo.
    pub last_input_timestamp: i64,
    pub is_flow_state: bool,
}

/// Why an input event did not extend the combo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    KeyHeld,
    BulkInsert,
    RapidRepeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComboOutcome {
    Counted { combo: u32, flow_activated: bool },
    Ignored(IgnoreReason),
}

/// What an inactivity reset cleared.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ComboReset {
    pub previous_combo: u32,
    pub flow_interrupted: bool,
}

/// Loot chance multiplier for the current combo.
///
/// Outside flow state the multiplier is always 1. Inside flow it steps up
/// every 20 combo, capped at 6 from 100 on.
pub fn flow_bonus_multiplier(combo_count: u32, is_flow_state: bool) -> u32 {
    if !is_flow_state {
        return 1;
    }
    FLOW_BONUS_STEPS
        .iter()
        .find(|(threshold, _)| combo_count >= *threshold)
        .map(|(_, multiplier)| *multiplier)
        .unwrap_or(1)
}

#[derive(Debug, Clone, Default)]
pub struct ComboTracker {
    state: ComboState,
    reset_timer: TimerSlot,
}

impl ComboTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ComboState {
        &self.state
    }

    pub fn combo(&self) -> u32 {
        self.state.combo_count
    }

    pub fn is_flow(&self) -> bool {
        self.state.is_flow_state
    }

    pub fn bonus_multiplier(&self) -> u32 {
        flow_bonus_multiplier(self.state.combo_count, self.state.is_flow_state)
    }

    pub fn reset_timer(&self) -> &TimerSlot {
        &self.reset_timer
    }

    /// Feed one editor-change event into the combo.
    ///
    /// Every event, counted or not, re-arms the inactivity timer for
    /// `hold_ms`.
    pub fn register(&mut self, delta: &InputDelta, now_ms: i64, hold_ms: i64) -> ComboOutcome {
        self.reset_timer.arm(now_ms, hold_ms);

        if delta.key_held {
            return ComboOutcome::Ignored(IgnoreReason::KeyHeld);
        }
        if delta.is_bulk_insert() {
            return ComboOutcome::Ignored(IgnoreReason::BulkInsert);
        }
        if now_ms - self.state.last_input_timestamp < RAPID_REPEAT_MS {
            return ComboOutcome::Ignored(IgnoreReason::RapidRepeat);
        }

        self.state.last_input_timestamp = now_ms;
        self.state.combo_count = self.state.combo_count.saturating_add(1);

        let flow_activated =
            !self.state.is_flow_state && self.state.combo_count >= FLOW_COMBO_THRESHOLD;
        if flow_activated {
            self.state.is_flow_state = true;
        }

        ComboOutcome::Counted {
            combo: self.state.combo_count,
            flow_activated,
        }
    }

    /// Reset the combo if the inactivity timer has expired.
    pub fn expire(&mut self, now_ms: i64) -> Option<ComboReset> {
        if self.reset_timer.fire_if_due(now_ms) {
            Some(self.reset())
        } else {
            None
        }
    }

    pub fn reset(&mut self) -> ComboReset {
        let reset = ComboReset {
            previous_combo: self.state.combo_count,
            flow_interrupted: self.state.is_flow_state,
        };
        self.state.combo_count = 0;
        self.state.is_flow_state = false;
        reset
    }

    /// Clear the combo and any pending inactivity timer.
    pub fn clear(&mut self) {
        self.reset();
        self.reset_timer.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOLD_MS: i64 = 5 * 60_000;

    fn typed(n: i64) -> InputDelta {
        InputDelta {
            net_change: n,
            key_held: false,
        }
    }

    /// Type `count` single characters 100ms apart starting at `start`.
    fn type_run(tracker: &mut ComboTracker, start: i64, count: u32) -> i64 {
        let mut now = start;
        for _ in 0..count {
            now += 100;
            tracker.register(&typed(1), now, HOLD_MS);
        }
        now
    }

    #[test]
    fn test_multiplier_steps() {
        assert_eq!(flow_bonus_multiplier(150, false), 1);
        assert_eq!(flow_bonus_multiplier(19, true), 1);
        assert_eq!(flow_bonus_multiplier(20, true), 2);
        assert_eq!(flow_bonus_multiplier(39, true), 2);
        assert_eq!(flow_bonus_multiplier(40, true), 3);
        assert_eq!(flow_bonus_multiplier(45, true), 3);
        assert_eq!(flow_bonus_multiplier(60, true), 4);
        assert_eq!(flow_bonus_multiplier(80, true), 5);
        assert_eq!(flow_bonus_multiplier(100, true), 6);
        assert_eq!(flow_bonus_multiplier(5_000, true), 6);
    }

    #[test]
    fn test_counts_spaced_keystrokes() {
        let mut tracker = ComboTracker::new();
        type_run(&mut tracker, 1_000, 3);
        assert_eq!(tracker.combo(), 3);
        assert!(!tracker.is_flow());
    }

    #[test]
    fn test_rapid_repeat_not_counted() {
        let mut tracker = ComboTracker::new();
        tracker.register(&typed(1), 1_000, HOLD_MS);
        let outcome = tracker.register(&typed(1), 1_049, HOLD_MS);
        assert_eq!(outcome, ComboOutcome::Ignored(IgnoreReason::RapidRepeat));
        assert_eq!(tracker.combo(), 1);
        // The rapid event does not move the reference timestamp
        let outcome = tracker.register(&typed(1), 1_050, HOLD_MS);
        assert!(matches!(outcome, ComboOutcome::Counted { combo: 2, .. }));
    }

    #[test]
    fn test_held_key_and_paste_not_counted() {
        let mut tracker = ComboTracker::new();
        let held = InputDelta {
            net_change: 1,
            key_held: true,
        };
        assert_eq!(
            tracker.register(&held, 1_000, HOLD_MS),
            ComboOutcome::Ignored(IgnoreReason::KeyHeld)
        );
        assert_eq!(
            tracker.register(&typed(11), 2_000, HOLD_MS),
            ComboOutcome::Ignored(IgnoreReason::BulkInsert)
        );
        assert_eq!(tracker.combo(), 0);
        assert!(tracker.reset_timer().is_armed());
    }

    #[test]
    fn test_nineteen_to_twenty_activates_flow_once() {
        let mut tracker = ComboTracker::new();
        let now = type_run(&mut tracker, 0, 19);
        assert!(!tracker.is_flow());

        let outcome = tracker.register(&typed(1), now + 100, HOLD_MS);
        assert_eq!(
            outcome,
            ComboOutcome::Counted {
                combo: 20,
                flow_activated: true
            }
        );
        assert!(tracker.is_flow());

        let outcome = tracker.register(&typed(1), now + 200, HOLD_MS);
        assert_eq!(
            outcome,
            ComboOutcome::Counted {
                combo: 21,
                flow_activated: false
            }
        );
    }

    #[test]
    fn test_timeout_resets_to_zero_and_interrupts_flow() {
        let mut tracker = ComboTracker::new();
        let now = type_run(&mut tracker, 0, 25);
        assert!(tracker.is_flow());

        assert_eq!(tracker.expire(now + HOLD_MS - 1), None);
        let reset = tracker.expire(now + HOLD_MS).expect("timer should fire");
        assert_eq!(reset.previous_combo, 25);
        assert!(reset.flow_interrupted);
        assert_eq!(tracker.combo(), 0);
        assert!(!tracker.is_flow());
        assert_eq!(tracker.bonus_multiplier(), 1);
    }

    #[test]
    fn test_any_event_pushes_timeout_back() {
        let mut tracker = ComboTracker::new();
        tracker.register(&typed(1), 0, HOLD_MS);
        tracker.register(&typed(-1), HOLD_MS - 10, HOLD_MS);
        assert_eq!(tracker.expire(HOLD_MS), None);
        assert!(tracker.expire(2 * HOLD_MS - 10).is_some());
    }

    #[test]
    fn test_clear_cancels_timer() {
        let mut tracker = ComboTracker::new();
        type_run(&mut tracker, 0, 5);
        tracker.clear();
        assert_eq!(tracker.combo(), 0);
        assert!(!tracker.reset_timer().is_armed());
    }
}
