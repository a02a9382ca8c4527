//! Tests for configuration file loading.

use super::*;
use serial_test::serial;
use std::env;
use std::fs;

#[test]
fn default_config_path_contains_tprompt_config_toml() {
    let Some(path) = default_config_path() else {
        return;
    };
    let path_str = path.to_string_lossy();
    assert!(
        path_str.contains("tprompt") && path_str.ends_with("config.toml"),
        "Path should contain 'tprompt' and end with 'config.toml', got: {}",
        path_str
    );
}

#[test]
fn default_log_path_ends_with_tprompt_log() {
    let path = default_log_path();
    assert!(
        path.to_string_lossy().ends_with("tprompt.log"),
        "Default log path should end with 'tprompt.log', got: {:?}",
        path
    );
}

#[test]
fn load_config_file_returns_ok_none_for_missing_file() {
    let result = load_config_file("/nonexistent/path/to/config.toml");
    assert_eq!(
        result,
        Ok(None),
        "Missing config file should return Ok(None), not an error"
    );
}

#[test]
fn load_config_file_parses_valid_toml() {
    let config_path = env::temp_dir().join("tprompt_test_config.toml");

    let toml_content = r#"
speed = 2.5
countdown_seconds = 5
font_size = 72
line_spacing = 1.5
margin_horizontal = 8
mirrored = true
theme = "amber"
focus_band = false
"#;

    fs::write(&config_path, toml_content).expect("Failed to write test config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    let config = result
        .expect("Should successfully parse valid TOML")
        .expect("Should return Some(ConfigFile) for existing file");

    assert_eq!(config.speed, Some(2.5));
    assert_eq!(config.countdown_seconds, Some(5));
    assert_eq!(config.font_size, Some(72));
    assert_eq!(config.line_spacing, Some(1.5));
    assert_eq!(config.margin_horizontal, Some(8));
    assert_eq!(config.mirrored, Some(true));
    assert_eq!(config.theme, Some("amber".to_string()));
    assert_eq!(config.focus_band, Some(false));
    assert_eq!(config.max_speed, None);
}

#[test]
fn load_config_file_returns_error_for_invalid_toml() {
    let config_path = env::temp_dir().join("tprompt_test_invalid.toml");
    fs::write(&config_path, "this is not valid TOML ][}{").expect("Failed to write config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    match result {
        Err(ConfigError::ParseError { path, reason: _ }) => {
            assert_eq!(path, config_path);
        }
        _ => panic!("Expected ParseError, got {:?}", result),
    }
}

#[test]
fn load_config_file_rejects_unknown_keys() {
    let config_path = env::temp_dir().join("tprompt_test_unknown_key.toml");
    fs::write(&config_path, "scroll_speed = 3.0\n").expect("Failed to write config");

    let result = load_config_file(&config_path);
    fs::remove_file(&config_path).ok();

    assert!(
        matches!(result, Err(ConfigError::ParseError { .. })),
        "Unknown keys should be rejected, got {:?}",
        result
    );
}

#[test]
fn merge_config_uses_defaults_when_none() {
    assert_eq!(merge_config(None), ResolvedConfig::default());
}

#[test]
fn merge_config_overrides_with_config_file_values() {
    let config_file = ConfigFile {
        speed: Some(4.0),
        margin_vertical: Some(3),
        theme: Some("mint".to_string()),
        scroll_past_end: Some(false),
        log_file_path: Some(PathBuf::from("/custom/path/to/app.log")),
        ..ConfigFile::default()
    };

    let resolved = merge_config(Some(config_file));
    let defaults = ResolvedConfig::default();

    assert_eq!(resolved.speed, 4.0);
    assert_eq!(resolved.margins.vertical, 3);
    assert_eq!(
        resolved.margins.horizontal, defaults.margins.horizontal,
        "Unset margin keeps its default"
    );
    assert_eq!(resolved.theme, "mint");
    assert!(!resolved.scroll_past_end);
    assert_eq!(resolved.log_file_path, PathBuf::from("/custom/path/to/app.log"));
    assert_eq!(resolved.font_size, defaults.font_size);
}

#[test]
fn merge_config_keeps_frame_interval_positive() {
    let config_file = ConfigFile {
        frame_interval_ms: Some(0),
        ..ConfigFile::default()
    };
    assert_eq!(merge_config(Some(config_file)).frame_interval_ms, 1);
}

#[test]
#[serial(env)]
fn env_theme_overrides_config() {
    env::set_var("TPROMPT_THEME", "light");
    let resolved = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("TPROMPT_THEME");

    assert_eq!(resolved.theme, "light");
}

#[test]
#[serial(env)]
fn env_speed_overrides_config() {
    env::set_var("TPROMPT_SPEED", "3.75");
    let resolved = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("TPROMPT_SPEED");

    assert_eq!(resolved.speed, 3.75);
}

#[test]
#[serial(env)]
fn invalid_env_speed_is_ignored() {
    env::set_var("TPROMPT_SPEED", "fast");
    let resolved = apply_env_overrides(ResolvedConfig::default());
    env::remove_var("TPROMPT_SPEED");

    assert_eq!(resolved.speed, ResolvedConfig::default().speed);
}

#[test]
#[serial(env)]
fn explicit_config_path_beats_env_var() {
    let explicit = env::temp_dir().join("tprompt_test_explicit.toml");
    let from_env = env::temp_dir().join("tprompt_test_from_env.toml");
    fs::write(&explicit, "theme = \"light\"\n").unwrap();
    fs::write(&from_env, "theme = \"mint\"\n").unwrap();

    env::set_var("TPROMPT_CONFIG", &from_env);
    let result = load_config_with_precedence(Some(explicit.clone()));
    let env_result = load_config_with_precedence(None);
    env::remove_var("TPROMPT_CONFIG");
    fs::remove_file(&explicit).ok();
    fs::remove_file(&from_env).ok();

    assert_eq!(result.unwrap().unwrap().theme.as_deref(), Some("light"));
    assert_eq!(env_result.unwrap().unwrap().theme.as_deref(), Some("mint"));
}

#[test]
fn cli_overrides_take_precedence() {
    let base = merge_config(Some(ConfigFile {
        theme: Some("mint".to_string()),
        speed: Some(2.0),
        ..ConfigFile::default()
    }));

    let resolved = apply_cli_overrides(
        base,
        CliOverrides {
            speed: Some(6.0),
            theme: Some("amber".to_string()),
            mirrored: Some(true),
            ..CliOverrides::default()
        },
    );

    assert_eq!(resolved.speed, 6.0);
    assert_eq!(resolved.theme, "amber");
    assert!(resolved.mirrored);
    assert!(!resolved.fit_on_start);
}

#[test]
fn cli_duration_requests_fit_on_start() {
    let resolved = apply_cli_overrides(
        ResolvedConfig::default(),
        CliOverrides {
            target_duration_secs: Some(90.0),
            ..CliOverrides::default()
        },
    );
    assert!(resolved.fit_on_start);
    assert_eq!(resolved.target_duration_secs, 90.0);
}

#[test]
fn controller_settings_repair_inverted_bounds() {
    let config = ResolvedConfig {
        min_speed: 10.0,
        max_speed: 1.0,
        ..ResolvedConfig::default()
    };
    let settings = config.controller_settings();
    assert!(settings.min_speed <= settings.max_speed);
}

#[test]
fn layout_metrics_carry_typography() {
    let config = ResolvedConfig {
        font_size: 64,
        line_spacing: 2.0,
        mirrored: true,
        ..ResolvedConfig::default()
    };
    let metrics = config.layout_metrics(Viewport::new(100, 30));
    assert_eq!(metrics.font_size(), 64);
    assert_eq!(metrics.line_spacing(), 2.0);
    assert!(metrics.mirrored());
    assert_eq!(metrics.viewport(), Viewport::new(100, 30));
}
