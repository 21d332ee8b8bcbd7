//! Configuration file upgrades: detect keys missing from an older YAML file
//! and fill them in with their defaults, leaving user values untouched.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Keys of a complete configuration, in file order.
fn expected_keys() -> AppResult<Mapping> {
    let value = serde_yaml::to_value(Config::default())
        .map_err(|e| AppError::Config(format!("Failed to serialize defaults: {e}")))?;

    match value {
        Value::Mapping(m) => Ok(m),
        _ => Err(AppError::Config("defaults are not a mapping".into())),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path).map_err(|_| AppError::ConfigLoad)?;

    match serde_yaml::from_str::<Value>(&content) {
        Ok(Value::Mapping(m)) => Ok(m),
        Ok(Value::Null) => Ok(Mapping::new()),
        Ok(_) => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
        Err(e) => Err(AppError::Config(format!("{}: {}", path.display(), e))),
    }
}

/// Return the configuration keys absent from the file at `path`.
pub fn missing_keys(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let expected = expected_keys()?;

    Ok(expected
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(str::to_string))
        .collect())
}

/// Add every missing key with its default value. Returns the keys added;
/// the file is rewritten only when at least one key was missing.
pub fn migrate_config_file(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;
    let expected = expected_keys()?;
    let mut added = Vec::new();

    for (key, default) in expected {
        if !current.contains_key(&key) {
            if let Some(k) = key.as_str() {
                added.push(k.to_string());
            }
            current.insert(key, default);
        }
    }

    if added.is_empty() {
        return Ok(added);
    }

    let serialized =
        serde_yaml::to_string(&Value::Mapping(current)).map_err(|_| AppError::ConfigSave)?;
    fs::write(path, serialized).map_err(|_| AppError::ConfigSave)?;

    Ok(added)
}
