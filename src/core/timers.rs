//! Deadline-based timers polled from the host loop.
//!
//! A [`TimerSlot`] holds at most one pending deadline. Arming always cancels
//! the previous deadline first, so a logical timer can never fire twice for
//! one schedule.

#[derive(Debug, Clone, Default)]
pub struct TimerSlot {
    deadline: Option<i64>,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any pending deadline and schedule a new one `delay_ms` from `now_ms`.
    pub fn arm(&mut self, now_ms: i64, delay_ms: i64) {
        self.cancel();
        self.deadline = Some(now_ms.saturating_add(delay_ms.max(0)));
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn is_armed(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn deadline(&self) -> Option<i64> {
        self.deadline
    }

    pub fn remaining_ms(&self, now_ms: i64) -> Option<i64> {
        self.deadline.map(|d| (d - now_ms).max(0))
    }

    /// Disarm and return true if the deadline has been reached.
    pub fn fire_if_due(&mut self, now_ms: i64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_slot_is_idle() {
        let mut slot = TimerSlot::new();
        assert!(!slot.is_armed());
        assert!(!slot.fire_if_due(i64::MAX));
    }

    #[test]
    fn test_fires_once_at_deadline() {
        let mut slot = TimerSlot::new();
        slot.arm(1_000, 500);
        assert!(!slot.fire_if_due(1_499));
        assert!(slot.fire_if_due(1_500));
        assert!(!slot.fire_if_due(2_000));
    }

    #[test]
    fn test_rearm_replaces_previous_deadline() {
        let mut slot = TimerSlot::new();
        slot.arm(0, 100);
        slot.arm(50, 100);
        assert_eq!(slot.deadline(), Some(150));
        assert!(!slot.fire_if_due(100));
        assert!(slot.fire_if_due(150));
    }

    #[test]
    fn test_cancel_disarms() {
        let mut slot = TimerSlot::new();
        slot.arm(0, 10);
        slot.cancel();
        assert!(!slot.is_armed());
        assert!(!slot.fire_if_due(100));
    }

    #[test]
    fn test_remaining_ms_never_negative() {
        let mut slot = TimerSlot::new();
        assert_eq!(slot.remaining_ms(0), None);
        slot.arm(0, 300);
        assert_eq!(slot.remaining_ms(100), Some(200));
        assert_eq!(slot.remaining_ms(900), Some(0));
    }

    #[test]
    fn test_negative_delay_fires_immediately() {
        let mut slot = TimerSlot::new();
        slot.arm(100, -50);
        assert!(slot.fire_if_due(100));
    }
}
