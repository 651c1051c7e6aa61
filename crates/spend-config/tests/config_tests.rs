use std::fs;

use spend_config::{load_predefined_categories, Config, ConfigError, ConfigManager};
use spend_domain::{Granularity, WeekStart};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert!(!cfg.currency.is_empty());
    assert_eq!(cfg.week_start, WeekStart::SUNDAY);
    assert_eq!(cfg.default_granularity, Granularity::Monthly);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path()).expect("manager");

    let mut cfg = Config::default();
    cfg.week_start = WeekStart::MONDAY;
    cfg.default_granularity = Granularity::Weekly;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded, cfg);
    assert!(manager.config_path().ends_with("config.json"));
}

#[test]
fn missing_config_file_yields_defaults() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::new(dir.path().join("absent.json"));
    assert_eq!(manager.load().expect("load"), Config::default());
}

#[test]
fn partial_config_fills_in_defaults() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "week_start": "monday" }"#).unwrap();

    let loaded = ConfigManager::new(path).load().expect("load partial");
    assert_eq!(loaded.week_start, WeekStart::MONDAY);
    assert_eq!(loaded.currency, "USD");
}

#[test]
fn invalid_week_start_is_rejected() {
    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("config.json");
    fs::write(&path, r#"{ "week_start": "someday" }"#).unwrap();

    let err = ConfigManager::new(path).load().unwrap_err();
    assert!(matches!(err, ConfigError::Serde(message) if message.contains("someday")));
}

#[test]
fn predefined_categories_load_from_file_or_defaults() {
    let defaults = load_predefined_categories(None).expect("defaults");
    assert_eq!(defaults.len(), 8);
    assert_eq!(defaults[0].category, "Food");

    let dir = tempdir().expect("tempdir");
    let path = dir.path().join("spending-category.json");
    fs::write(&path, r#"[{"category":"Groceries"},{"category":"Travel"}]"#).unwrap();
    let loaded = load_predefined_categories(Some(&path)).expect("from file");
    let names: Vec<_> = loaded.iter().map(|entry| entry.category.as_str()).collect();
    assert_eq!(names, vec!["Groceries", "Travel"]);
}
