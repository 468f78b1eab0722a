//! Integration test: saving and restoring a session through the save file

use shanhai::config::Settings;
use shanhai::monster::{CustomMonster, MonsterChoice};
use shanhai::persistence::{load_or_default, save, SaveData};
use shanhai::{BattleEngine, ScriptedDice};
use std::fs;

const T0: i64 = 1_700_000_000_000;

fn played_engine() -> BattleEngine {
    let mut engine = BattleEngine::new(Settings::default(), T0);
    engine
        .select_monster(
            MonsterChoice::Custom(CustomMonster {
                name: "Wisp".to_string(),
                star: 2,
                theme: "cosmos".to_string(),
            }),
            T0,
        )
        .unwrap();
    let mut dice = ScriptedDice::always_miss().with_fallback(0.0);
    for i in 1..=12 {
        engine.on_text_changed(i, T0 + i as i64 * 100, &mut dice);
    }
    engine
}

#[test]
fn test_session_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let mut engine = played_engine();
    let saved_at = T0 + 5_000;
    save(&path, &engine.snapshot(saved_at)).unwrap();

    let restored = BattleEngine::from_save(load_or_default(&path), saved_at + 1_000);
    assert_eq!(restored.monster(), engine.monster());
    assert_eq!(restored.monster().current_hp, 238);
    assert_eq!(restored.player().treasure_tiers.tiers(), [2, 1, 0, 0, 0]);
    assert_eq!(restored.player().current_theme, "cosmos");
    assert_eq!(restored.player().last_save_timestamp, saved_at);
    // Combo is session state and starts over
    assert_eq!(restored.combo().combo_count, 0);
}

#[test]
fn test_restart_after_long_break_heals_monster() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");

    let mut engine = played_engine();
    let saved_at = T0 + 5_000;
    save(&path, &engine.snapshot(saved_at)).unwrap();

    let hold = engine.settings().hold_time_ms();
    let restored = BattleEngine::from_save(load_or_default(&path), saved_at + hold + 1);
    assert_eq!(restored.monster().current_hp, 250);
    assert_eq!(restored.player().treasure_tiers.tiers(), [2, 1, 0, 0, 0]);
}

#[test]
fn test_older_partial_save_merges_over_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{
            "settings": {"flow": {"holdTime": 2}, "sound": {"volume": 3.5}},
            "playerData": {"treasureTiers": [0, 4], "unlockedTitles": [{"title": "当康无双猎手", "star": 1}]},
            "activeMonster": {"id": "dangkang", "name": "当康", "tier": 1, "maxHp": 50, "currentHp": 20, "theme": "farming"}
        }"#,
    )
    .unwrap();

    let engine = BattleEngine::from_save(load_or_default(&path), T0);
    let settings = engine.settings();
    assert_eq!(settings.hold_time_ms(), 120_000);
    assert_eq!(settings.sound.volume, 1.0);
    assert!(settings.sound.is_enabled);
    assert_eq!(engine.player().treasure_tiers.tiers(), [4, 0, 0, 0, 0]);
    assert_eq!(engine.player().unlocked_titles[0].unlocked_at, 0);
    assert_eq!(engine.player().current_theme, "farming");
    assert_eq!(engine.monster().current_hp, 20);
    assert_eq!(engine.monster().battle_start_time, T0);
}

#[test]
fn test_snapshot_file_uses_camel_case_keys() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    let mut engine = played_engine();
    save(&path, &engine.snapshot(T0)).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    for key in [
        "\"playerData\"",
        "\"treasureTiers\"",
        "\"lastSaveTimestamp\"",
        "\"activeMonster\"",
        "\"battleStartTime\"",
        "\"explosionPreset\"",
    ] {
        assert!(text.contains(key), "missing {}", key);
    }
}

#[test]
fn test_custom_monster_keeps_its_identity_across_reload() {
    let mut engine = BattleEngine::new(Settings::default(), T0);
    engine
        .select_monster(
            MonsterChoice::Custom(CustomMonster {
                name: "Inkblot".to_string(),
                star: 2,
                theme: "sea".to_string(),
            }),
            T0,
        )
        .unwrap();
    assert_eq!(engine.monster().display_name(), "Inkblot");

    let json = engine.snapshot(T0 + 1_000).to_json().unwrap();
    let restored = BattleEngine::from_save(SaveData::from_json(&json).unwrap(), T0 + 2_000);
    assert_eq!(restored.monster().display_name(), "Inkblot");
    assert_eq!(restored.monster().en_name, None);
    assert_eq!(restored.monster(), engine.monster());
}

#[test]
fn test_plugin_style_monster_keys_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.json");
    fs::write(
        &path,
        r#"{"activeMonster": {"id": "kun", "name": "鲲", "en_name": "Kun", "tier": 5, "maxHp": 2000, "currentHp": 900, "theme": "sea"}}"#,
    )
    .unwrap();

    let engine = BattleEngine::from_save(load_or_default(&path), T0);
    assert_eq!(engine.monster().display_name(), "Kun (鲲)");
    assert_eq!(engine.monster().current_hp, 900);
    assert_eq!(engine.monster().description, "");
}
