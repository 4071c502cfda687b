// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! Configuration file loading with override support
//!
//! This module implements the 3-tier configuration loading system:
//! 1. TOML file (base defaults)
//! 2. Environment variables (runtime overrides)
//! 3. CLI arguments (explicit user overrides)

use crate::{validate_config, ConfigError, ConfigResult, FmrConfig};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILE_NAME: &str = "fmr_configuration.toml";

/// Find the FMR configuration file
///
/// Search order:
/// 1. `FMR_CONFIG_PATH` environment variable
/// 2. Current working directory: `./fmr_configuration.toml`
/// 3. Up to 5 parent directories
///
/// # Errors
///
/// Returns `ConfigError::FileNotFound` if no config file is found in any location
pub fn find_config_file() -> ConfigResult<PathBuf> {
    if let Ok(env_path) = env::var("FMR_CONFIG_PATH") {
        let path = PathBuf::from(env_path);
        if path.exists() {
            return Ok(path);
        } else {
            return Err(ConfigError::FileNotFound(format!(
                "Config file specified by FMR_CONFIG_PATH not found: {}",
                path.display()
            )));
        }
    }

    let mut search_paths = Vec::new();
    if let Ok(cwd) = env::current_dir() {
        search_paths.push(cwd.join(CONFIG_FILE_NAME));

        let mut current = cwd.clone();
        for _ in 0..5 {
            if let Some(parent) = current.parent() {
                search_paths.push(parent.join(CONFIG_FILE_NAME));
                current = parent.to_path_buf();
            }
        }
    }

    for path in &search_paths {
        if path.exists() {
            return Ok(path.clone());
        }
    }

    let search_list = search_paths
        .iter()
        .map(|p| format!("  - {}", p.display()))
        .collect::<Vec<_>>()
        .join("\n");

    Err(ConfigError::FileNotFound(format!(
        "FMR configuration file '{}' not found in any of these locations:\n{}\n\nSet FMR_CONFIG_PATH environment variable to specify custom location.",
        CONFIG_FILE_NAME, search_list
    )))
}

/// Load configuration from TOML file
///
/// # Arguments
///
/// * `config_path` - Optional path to config file. If `None`, will search for config file.
/// * `cli_args` - Optional CLI argument overrides
///
/// # Errors
///
/// Returns error if config file is not found, contains invalid TOML, or fails validation
pub fn load_config(
    config_path: Option<&Path>,
    cli_args: Option<&HashMap<String, String>>,
) -> ConfigResult<FmrConfig> {
    let config_file = if let Some(path) = config_path {
        path.to_path_buf()
    } else {
        find_config_file()?
    };

    let content = fs::read_to_string(&config_file)?;
    let mut config: FmrConfig = toml::from_str(&content)?;

    apply_environment_overrides(&mut config);
    if let Some(cli) = cli_args {
        apply_cli_overrides(&mut config, cli);
    }

    validate_config(&config)?;
    Ok(config)
}

fn parse_flag(value: &str) -> bool {
    let value = value.to_lowercase();
    value == "true" || value == "1" || value == "yes"
}

/// Apply environment variable overrides to configuration
///
/// Supported environment variables:
/// - `FMR_MAX_MINUTIAE` -> `curation.max_minutiae`
/// - `FMR_SORT_BY_QUALITY` -> `curation.sort_by_quality`
/// - `FMR_VERIFY_DECLARED_LENGTH` -> `codec.verify_declared_length`
/// - `FMR_LOG_LEVEL` -> `logging.level`
/// - `FMR_LOG_FORMAT` -> `logging.format`
pub fn apply_environment_overrides(config: &mut FmrConfig) {
    if let Ok(value) = env::var("FMR_MAX_MINUTIAE") {
        if let Ok(max_minutiae) = value.parse::<usize>() {
            config.curation.max_minutiae = max_minutiae;
        }
    }
    if let Ok(value) = env::var("FMR_SORT_BY_QUALITY") {
        config.curation.sort_by_quality = parse_flag(&value);
    }
    if let Ok(value) = env::var("FMR_VERIFY_DECLARED_LENGTH") {
        config.codec.verify_declared_length = parse_flag(&value);
    }
    if let Ok(value) = env::var("FMR_LOG_LEVEL") {
        config.logging.level = value;
    }
    if let Ok(value) = env::var("FMR_LOG_FORMAT") {
        config.logging.format = value;
    }
}

/// Apply CLI argument overrides to configuration
///
/// # Arguments
///
/// * `config` - Configuration to modify
/// * `cli_args` - HashMap of CLI arguments keyed by dotted field path
///   (e.g., `{"curation.max_minutiae": "45", "curation.sort_by_quality": "true"}`)
pub fn apply_cli_overrides(config: &mut FmrConfig, cli_args: &HashMap<String, String>) {
    if let Some(value) = cli_args.get("curation.max_minutiae") {
        if let Ok(max_minutiae) = value.parse::<usize>() {
            config.curation.max_minutiae = max_minutiae;
        }
    }
    if let Some(value) = cli_args.get("curation.sort_by_quality") {
        config.curation.sort_by_quality = parse_flag(value);
    }
    if let Some(value) = cli_args.get("codec.verify_declared_length") {
        config.codec.verify_declared_length = parse_flag(value);
    }
    if let Some(value) = cli_args.get("logging.level") {
        config.logging.level = value.clone();
    }
    if let Some(value) = cli_args.get("logging.format") {
        config.logging.format = value.clone();
    }
    if let Some(value) = cli_args.get("logging.with_target") {
        config.logging.with_target = parse_flag(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::tempdir;

    static ENV_LOCK: Mutex<()> = Mutex::new(());

    const OVERRIDE_VARIABLES: [&str; 5] = [
        "FMR_MAX_MINUTIAE",
        "FMR_SORT_BY_QUALITY",
        "FMR_VERIFY_DECLARED_LENGTH",
        "FMR_LOG_LEVEL",
        "FMR_LOG_FORMAT",
    ];

    fn clear_override_variables() {
        for variable in OVERRIDE_VARIABLES {
            env::remove_var(variable);
        }
    }

    #[test]
    fn test_find_config_file_env_var() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("custom_config.toml");
        File::create(&config_path).unwrap();

        env::set_var("FMR_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("FMR_CONFIG_PATH");

        assert_eq!(result.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_file_env_var_missing() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join("does_not_exist.toml");

        env::set_var("FMR_CONFIG_PATH", config_path.to_str().unwrap());
        let result = find_config_file();
        env::remove_var("FMR_CONFIG_PATH");

        assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
    }

    #[test]
    fn test_load_minimal_config() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[curation]").unwrap();
        writeln!(file, "max_minutiae = 45").unwrap();
        writeln!(file, "sort_by_quality = true").unwrap();

        let config = load_config(Some(&config_path), None).unwrap();

        assert_eq!(config.curation.max_minutiae, 45);
        assert!(config.curation.sort_by_quality);
        assert!(!config.codec.verify_declared_length);
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[curation]").unwrap();
        writeln!(file, "max_minutiae = 300").unwrap();

        let result = load_config(Some(&config_path), None);
        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_environment_overrides() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        let mut config = FmrConfig::default();

        env::set_var("FMR_MAX_MINUTIAE", "30");
        env::set_var("FMR_VERIFY_DECLARED_LENGTH", "yes");
        env::set_var("FMR_LOG_LEVEL", "debug");
        env::set_var("FMR_LOG_FORMAT", "json");

        apply_environment_overrides(&mut config);
        clear_override_variables();

        assert_eq!(config.curation.max_minutiae, 30);
        assert!(config.codec.verify_declared_length);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = FmrConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("curation.max_minutiae".to_string(), "12".to_string());
        cli_args.insert("curation.sort_by_quality".to_string(), "1".to_string());

        cli_args.insert("codec.verify_declared_length".to_string(), "true".to_string());
        cli_args.insert("logging.format".to_string(), "json".to_string());
        cli_args.insert("logging.with_target".to_string(), "yes".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.curation.max_minutiae, 12);
        assert!(config.curation.sort_by_quality);
        assert!(config.codec.verify_declared_length);
        assert_eq!(config.logging.format, "json");
        assert!(config.logging.with_target);
    }

    #[test]
    fn test_cli_overrides_require_section_prefix() {
        let mut config = FmrConfig::default();
        let mut cli_args = HashMap::new();
        cli_args.insert("max_minutiae".to_string(), "12".to_string());

        apply_cli_overrides(&mut config, &cli_args);

        assert_eq!(config.curation.max_minutiae, 0);
    }

    #[test]
    fn test_override_precedence() {
        let _env_lock = ENV_LOCK.lock().unwrap();
        clear_override_variables();
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        let mut file = File::create(&config_path).unwrap();
        writeln!(file, "[curation]").unwrap();
        writeln!(file, "max_minutiae = 10").unwrap();
        writeln!(file, "[logging]").unwrap();
        writeln!(file, "level = \"warn\"").unwrap();

        env::set_var("FMR_MAX_MINUTIAE", "20");
        env::set_var("FMR_LOG_LEVEL", "error");

        let mut cli_args = HashMap::new();
        cli_args.insert("curation.max_minutiae".to_string(), "40".to_string());

        let config = load_config(Some(&config_path), Some(&cli_args)).unwrap();
        clear_override_variables();

        // CLI wins for max_minutiae, env wins for log level (no CLI override)
        assert_eq!(config.curation.max_minutiae, 40);
        assert_eq!(config.logging.level, "error");
    }
}
