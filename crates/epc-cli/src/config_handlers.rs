//! Handlers for the `config` subcommands.
//!
//! Also holds the dotted-key helpers used to read and edit the TOML file.

use std::path::{Path, PathBuf};

use epc_core::config::PROJECT_NAME;
use epc_core::{EpcConfig, EpcError, Result};

use crate::cli::ConfigAction;

/// Runs a config subcommand.
pub fn handle_config_command(config_path: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => cmd_config_path(config_path),
        ConfigAction::Get { key } => cmd_config_get(config_path, &key),
        ConfigAction::Set { key, value } => cmd_config_set(config_path, &key, &value),
        ConfigAction::Init { file, force } => {
            let path = cmd_config_init(file.as_deref().or(config_path), force)?;
            println!("Config file created at {}", path.display());
            Ok(())
        }
    }
}

/// Show the resolved config file path.
pub fn cmd_config_path(config_path: Option<&str>) -> Result<()> {
    let path = resolve(config_path)?;
    println!("{}", path.display());
    if !path.exists() {
        eprintln!("(file does not exist, run `epc config init` to create it)");
    }
    Ok(())
}

/// Print a configuration value by dotted key, after environment overrides.
pub fn cmd_config_get(config_path: Option<&str>, key: &str) -> Result<()> {
    let value = lookup(&EpcConfig::load(config_path)?, key)?;
    println!("{value}");
    Ok(())
}

/// Set a configuration value by dotted key in the config file.
pub fn cmd_config_set(config_path: Option<&str>, key: &str, value: &str) -> Result<()> {
    let path = resolve(config_path)?;
    set_in_file(&path, key, value)?;
    println!("Set {key} in {}", path.display());
    Ok(())
}

/// Create a default configuration file and return where it was written.
pub fn cmd_config_init(file: Option<&str>, force: bool) -> Result<PathBuf> {
    let path = resolve(file)?;

    if path.exists() && !force {
        return Err(EpcError::config(format!(
            "Config file already exists at {}. Use --force to overwrite.",
            path.display()
        )));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| EpcError::io_with_path(e, parent))?;
    }

    let toml_str = EpcConfig::default().to_toml_string()?;
    std::fs::write(&path, toml_str).map_err(|e| EpcError::io_with_path(e, &path))?;
    tracing::debug!(path = %path.display(), "Wrote default config");
    Ok(path)
}

fn resolve(config_path: Option<&str>) -> Result<PathBuf> {
    EpcConfig::resolve_config_path(config_path).ok_or_else(|| {
        EpcError::config(format!(
            "Could not determine config directory for {PROJECT_NAME}; pass --config"
        ))
    })
}

const API_KEY_MASK: &str = "********";

/// Formats the value at `key` in `config`.
///
/// The API key is never printed in full.
pub fn lookup(config: &EpcConfig, key: &str) -> Result<String> {
    let mut value =
        toml::Value::try_from(config).map_err(|e| EpcError::config(e.to_string()))?;
    if !config.registry.api_key.is_empty() {
        set_nested_value(
            &mut value,
            "registry.api_key",
            toml::Value::String(API_KEY_MASK.to_string()),
        )?;
    }
    let found = get_nested_value(&value, key)
        .ok_or_else(|| EpcError::config(format!("Key '{key}' not found in configuration")))?;
    Ok(format_toml_value(found))
}

/// Writes `raw` at `key` in the file at `path`.
///
/// Existing string values stay strings, so a numeric-looking API key is not
/// turned into an integer. The edited file must still load as a valid config.
pub fn set_in_file(path: &Path, key: &str, raw: &str) -> Result<()> {
    if !path.exists() {
        return Err(EpcError::config(format!(
            "Config file does not exist at {}. Run `epc config init` first.",
            path.display()
        )));
    }
    let content = std::fs::read_to_string(path).map_err(|e| EpcError::io_with_path(e, path))?;
    let mut doc: toml::Value = toml::from_str(&content)?;

    let value = match get_nested_value(&doc, key) {
        Some(toml::Value::String(_)) => toml::Value::String(raw.to_string()),
        _ => parse_value(raw),
    };
    set_nested_value(&mut doc, key, value)?;
    doc.clone().try_into::<EpcConfig>()?;

    let toml_str = toml::to_string_pretty(&doc).map_err(|e| EpcError::config(e.to_string()))?;
    std::fs::write(path, toml_str).map_err(|e| EpcError::io_with_path(e, path))
}

/// Navigate a dotted key path in a TOML value tree.
pub fn get_nested_value<'a>(value: &'a toml::Value, key: &str) -> Option<&'a toml::Value> {
    key.split('.')
        .try_fold(value, |current, part| current.as_table()?.get(part))
}

/// Set a value at a dotted key path, creating intermediate tables as needed.
pub fn set_nested_value(root: &mut toml::Value, key: &str, value: toml::Value) -> Result<()> {
    let parts: Vec<&str> = key.split('.').collect();
    let Some((last, parents)) = parts.split_last() else {
        return Err(EpcError::config("Empty key path"));
    };
    if parts.iter().any(|p| p.is_empty()) {
        return Err(EpcError::config(format!("Invalid key '{key}'")));
    }

    let mut current = root;
    for part in parents {
        let table = current
            .as_table_mut()
            .ok_or_else(|| EpcError::config("Cannot navigate into a non-table value"))?;
        current = table
            .entry(part.to_string())
            .or_insert(toml::Value::Table(toml::map::Map::new()));
    }

    let table = current
        .as_table_mut()
        .ok_or_else(|| EpcError::config("Cannot set key on a non-table value"))?;
    table.insert(last.to_string(), value);
    Ok(())
}

/// Parse a string value into a TOML value, auto-detecting the type.
///
/// Priority: bool, integer, float, string.
pub fn parse_value(s: &str) -> toml::Value {
    match s {
        "true" => return toml::Value::Boolean(true),
        "false" => return toml::Value::Boolean(false),
        _ => {}
    }
    if let Ok(i) = s.parse::<i64>() {
        return toml::Value::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return toml::Value::Float(f);
    }
    toml::Value::String(s.to_string())
}

/// Format a TOML value for display on stdout.
pub fn format_toml_value(value: &toml::Value) -> String {
    match value {
        toml::Value::String(s) => s.clone(),
        toml::Value::Integer(i) => i.to_string(),
        toml::Value::Float(f) => f.to_string(),
        toml::Value::Boolean(b) => b.to_string(),
        toml::Value::Datetime(dt) => dt.to_string(),
        toml::Value::Array(_) | toml::Value::Table(_) => {
            toml::to_string_pretty(value).unwrap_or_else(|_| format!("{value:?}"))
        }
    }
}
