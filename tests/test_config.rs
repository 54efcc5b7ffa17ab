use invaders::config::*;

#[test]
fn defaults_are_valid() {
    let config = GameConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.grid_size(), 55);
    assert_eq!(config.player_y(), 555.0);
    assert_eq!(config.column_pitch(), 60.0);
    assert_eq!(config.fire_gate, FireGate::Cooldown { ticks: DEFAULT_FIRE_COOLDOWN_TICKS });
    assert_eq!(config.sweep_profile, SweepProfile::Ramped);
}

#[test]
fn empty_json_gives_defaults() {
    let config = GameConfig::from_json_str("{}").unwrap();
    assert_eq!(config, GameConfig::default());
}

#[test]
fn partial_override() {
    let raw = r#"{
        "invader_fire_chance": 0.05,
        "initial_lives": 5,
        "fire_gate": { "kind": "single_live_bullet" },
        "sweep_profile": "constant"
    }"#;
    let config = GameConfig::from_json_str(raw).unwrap();
    assert_eq!(config.invader_fire_chance, 0.05);
    assert_eq!(config.initial_lives, 5);
    assert_eq!(config.fire_gate, FireGate::SingleLiveBullet);
    assert_eq!(config.sweep_profile, SweepProfile::Constant);
    assert_eq!(config.field_width, 800.0);
}

#[test]
fn cooldown_override() {
    let raw = r#"{ "fire_gate": { "kind": "cooldown", "ticks": 30 } }"#;
    let config = GameConfig::from_json_str(raw).unwrap();
    assert_eq!(config.fire_gate, FireGate::Cooldown { ticks: 30 });
}

#[test]
fn unknown_field_is_a_parse_error() {
    let err = GameConfig::from_json_str(r#"{ "lives": 3 }"#).unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

#[test]
fn malformed_json_is_a_parse_error() {
    let err = GameConfig::from_json_str("{ not json").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

fn invalid_field(raw: &str) -> &'static str {
    match GameConfig::from_json_str(raw) {
        Err(ConfigError::Invalid { field, .. }) => field,
        other => panic!("expected Invalid, got {:?}", other),
    }
}

#[test]
fn rejects_out_of_range_values() {
    assert_eq!(invalid_field(r#"{ "field_width": 0 }"#), "field_width");
    assert_eq!(invalid_field(r#"{ "invader_height": -4 }"#), "invader_height");
    assert_eq!(invalid_field(r#"{ "player_width": 900 }"#), "player_width");
    assert_eq!(invalid_field(r#"{ "grid_rows": 0 }"#), "grid_rows");
    assert_eq!(invalid_field(r#"{ "grid_cols": 0 }"#), "grid_cols");
    assert_eq!(invalid_field(r#"{ "invader_fire_chance": 1.5 }"#), "invader_fire_chance");
    assert_eq!(invalid_field(r#"{ "initial_lives": 0 }"#), "initial_lives");
    assert_eq!(
        invalid_field(r#"{ "fire_gate": { "kind": "cooldown", "ticks": 0 } }"#),
        "fire_gate"
    );
    assert_eq!(invalid_field(r#"{ "player_bottom_margin": 590 }"#), "player_bottom_margin");
}

#[test]
fn rejects_formation_that_cannot_fit() {
    // Pitch of zero would divide by zero when mapping invaders to columns
    assert_eq!(invalid_field(r#"{ "invader_spacing_x": -40 }"#), "invader_spacing_x");
    assert_eq!(invalid_field(r#"{ "invader_spacing_x": -60 }"#), "invader_spacing_x");
    assert_eq!(invalid_field(r#"{ "invader_spacing_y": -1 }"#), "invader_spacing_y");
    assert_eq!(invalid_field(r#"{ "invader_start_x": -1 }"#), "invader_start_x");
    // 50 + 19 * 60 + 40 = 1230 > 800
    assert_eq!(invalid_field(r#"{ "grid_cols": 20 }"#), "grid_cols");
    // Right edge exactly on the field edge would bounce before moving
    assert_eq!(invalid_field(r#"{ "invader_start_x": 160 }"#), "grid_cols");
    assert!(GameConfig::from_json_str(r#"{ "invader_start_x": 159 }"#).is_ok());
}

#[test]
fn constant_profile_reproduces_unit_sweep() {
    let config =
        GameConfig::from_json_str(r#"{ "sweep_profile": "constant", "sweep_speed": 1.0 }"#).unwrap();
    assert_eq!(config.sweep_profile, SweepProfile::Constant);
    for live in [55, 20, 1] {
        assert_eq!(invaders::compute::motion::sweep_speed(&config, live), 1.0);
    }
}

#[test]
fn load_reports_missing_file() {
    let err = GameConfig::load("/definitely/not/here/invaders.json").unwrap_err();
    assert!(matches!(err, ConfigError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here/invaders.json"));
}

#[test]
fn load_reads_file() {
    let path = std::env::temp_dir().join(format!("invaders-config-{}.json", std::process::id()));
    std::fs::write(&path, r#"{ "grid_rows": 2, "grid_cols": 3 }"#).unwrap();
    let config = GameConfig::load(&path).unwrap();
    std::fs::remove_file(&path).unwrap();
    assert_eq!(config.grid_size(), 6);
}

#[test]
fn config_round_trips_through_json() {
    let config = GameConfig {
        fire_gate: FireGate::SingleLiveBullet,
        ..GameConfig::default()
    };
    let raw = serde_json::to_string(&config).unwrap();
    assert_eq!(GameConfig::from_json_str(&raw).unwrap(), config);
}
