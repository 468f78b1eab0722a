//! Integration test: combo counting, flow state and the loot multiplier
//!
//! Exercises the combo tracker and loot resolver together, the way a typing
//! burst flows through them inside the engine.

use shanhai::combo::{flow_bonus_multiplier, ComboOutcome, ComboTracker, IgnoreReason};
use shanhai::core::InputDelta;
use shanhai::loot::{resolve_loot, roll_unit, tier_config};
use shanhai::ScriptedDice;

const HOLD_MS: i64 = 300_000;

fn typed(net_change: i64) -> InputDelta {
    InputDelta {
        net_change,
        key_held: false,
    }
}

/// Count `n` keystrokes 100ms apart starting at `start`; returns the last timestamp.
fn burst(tracker: &mut ComboTracker, n: u32, start: i64) -> i64 {
    let mut now = start;
    for _ in 0..n {
        now += 100;
        tracker.register(&typed(1), now, HOLD_MS);
    }
    now
}

#[test]
fn test_nineteenth_to_twentieth_keystroke_enters_flow() {
    let mut tracker = ComboTracker::new();
    let now = burst(&mut tracker, 19, 0);
    assert!(!tracker.is_flow());
    assert_eq!(tracker.bonus_multiplier(), 1);

    let outcome = tracker.register(&typed(1), now + 100, HOLD_MS);
    assert_eq!(
        outcome,
        ComboOutcome::Counted {
            combo: 20,
            flow_activated: true
        }
    );
    assert!(tracker.is_flow());
    assert_eq!(tracker.bonus_multiplier(), 2);

    // Staying in flow does not re-announce it
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
fn test_multiplier_steps_through_flow() {
    let mut tracker = ComboTracker::new();
    let mut now = 0;
    let expected = [(20, 2), (39, 2), (40, 3), (60, 4), (80, 5), (100, 6), (150, 6)];
    let mut combo = 0;
    for (target, multiplier) in expected {
        now = burst(&mut tracker, target - combo, now);
        combo = target;
        assert_eq!(tracker.combo(), target);
        assert_eq!(tracker.bonus_multiplier(), multiplier, "at combo {}", target);
    }
}

#[test]
fn test_disqualified_events_keep_combo_but_refresh_timer() {
    let mut tracker = ComboTracker::new();
    let now = burst(&mut tracker, 5, 0);

    let held = InputDelta {
        net_change: 1,
        key_held: true,
    };
    assert_eq!(
        tracker.register(&held, now + 100, HOLD_MS),
        ComboOutcome::Ignored(IgnoreReason::KeyHeld)
    );
    assert_eq!(
        tracker.register(&typed(25), now + 200, HOLD_MS),
        ComboOutcome::Ignored(IgnoreReason::BulkInsert)
    );
    assert_eq!(tracker.combo(), 5);

    // The paste pushed the reset deadline out
    assert_eq!(tracker.expire(now + HOLD_MS), None);
    let reset = tracker.expire(now + 200 + HOLD_MS).unwrap();
    assert_eq!(reset.previous_combo, 5);
    assert!(!reset.flow_interrupted);
    assert_eq!(tracker.combo(), 0);
}

#[test]
fn test_expiry_clears_flow_exactly_once() {
    let mut tracker = ComboTracker::new();
    let now = burst(&mut tracker, 45, 0);
    assert!(tracker.is_flow());

    let reset = tracker.expire(now + HOLD_MS).unwrap();
    assert_eq!(reset.previous_combo, 45);
    assert!(reset.flow_interrupted);
    assert_eq!(tracker.state().combo_count, 0);
    assert!(!tracker.is_flow());
    assert_eq!(tracker.expire(now + HOLD_MS * 2), None);

    // Flow needs twenty fresh keystrokes after a reset
    let later = now + HOLD_MS * 3;
    burst(&mut tracker, 19, later);
    assert!(!tracker.is_flow());
}

#[test]
fn test_forced_tier_two_hit_at_combo_forty_five() {
    let multiplier = flow_bonus_multiplier(45, true);
    assert_eq!(multiplier, 3);
    let tier_2 = tier_config(2).unwrap();
    assert!((tier_2.effective_chance(multiplier) - 0.03).abs() < 1e-12);

    for damage_roll in [0.0, 0.5, 0.99] {
        // Miss tier 1 (0.3), land just under tier 2 (0.03), then roll damage
        let mut dice = ScriptedDice::new([0.5, 0.029, damage_roll]);
        let drop = roll_unit(multiplier, &mut dice).unwrap();
        assert_eq!(drop.tier, 2);
        assert!((3..=5).contains(&drop.damage));
        assert_eq!(dice.remaining(), 0);
    }
}

#[test]
fn test_outside_flow_no_bonus() {
    assert_eq!(flow_bonus_multiplier(45, false), 1);
    // 0.15 misses tier 1 at base chance but hits with the x2 flow bonus
    let mut dice = ScriptedDice::new([0.15]);
    assert!(roll_unit(1, &mut dice).is_none());
    let mut dice = ScriptedDice::new([0.15]);
    assert_eq!(roll_unit(2, &mut dice).map(|d| d.tier), Some(1));
}

#[test]
fn test_each_character_rolled_independently() {
    // hit, miss (five tier rolls), hit
    let mut dice = ScriptedDice::new([0.0, 0.9, 0.9, 0.9, 0.9, 0.9, 0.0]);
    let roll = resolve_loot(3, 1, &mut dice);
    assert_eq!(roll.units_rolled, 3);
    assert_eq!(roll.drops.len(), 2);
    assert_eq!(roll.total_damage(), 2);
    assert_eq!(roll.count_for(1), 2);
}
