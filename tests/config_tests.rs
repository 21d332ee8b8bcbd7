use sewalogger::config::Config;
use sewalogger::config::migrate::{migrate_config_file, missing_keys};
use std::env;
use std::fs;
use std::path::PathBuf;

fn conf_file(name: &str, content: &str) -> PathBuf {
    let mut path = env::temp_dir();
    path.push(format!("{name}_sewalogger.conf"));
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_defaults() {
    let cfg = Config::default();
    assert_eq!(cfg.day_start_hour, 4);
    assert_eq!(cfg.team_name, "Jalpan Sewa");
    assert!(cfg.counters.iter().any(|c| c == "Tea"));
    assert!(cfg.api_key.is_none());
    assert!(cfg.validate().is_ok());
}

#[test]
fn test_invalid_start_hour_fails_validation() {
    let cfg = Config {
        day_start_hour: 30,
        ..Config::default()
    };
    assert!(cfg.validate().is_err());
}

#[test]
fn test_old_file_is_completed_without_touching_user_values() {
    let path = conf_file(
        "config_migrate_old",
        "database: /tmp/sewa.sqlite\nteam_name: Langar Sewa\n",
    );

    let missing = missing_keys(&path).unwrap();
    assert!(missing.contains(&"day_start_hour".to_string()));
    assert!(!missing.contains(&"team_name".to_string()));

    let added = migrate_config_file(&path).unwrap();
    assert_eq!(added, missing);
    assert!(missing_keys(&path).unwrap().is_empty());

    let cfg: Config = serde_yaml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
    assert_eq!(cfg.team_name, "Langar Sewa");
    assert_eq!(cfg.database, "/tmp/sewa.sqlite");
    assert_eq!(cfg.day_start_hour, 4);

    // second run is a no-op
    assert!(migrate_config_file(&path).unwrap().is_empty());
}
