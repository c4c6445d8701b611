use anyhow::Result;
use directories::ProjectDirs;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

use super::BrowserConfig;

const APP_NAME: &str = "ProjectDock";
const CONFIG_FILE: &str = "config.json";

/// Returns the platform-specific configuration directory for the application.
pub fn get_config_directory() -> Option<PathBuf> {
    ProjectDirs::from("com", "projectdock", APP_NAME)
        .map(|proj_dirs| proj_dirs.config_dir().to_path_buf())
}

/// Returns the full path to the configuration file.
pub fn get_config_file_path() -> Option<PathBuf> {
    get_config_directory().map(|dir| dir.join(CONFIG_FILE))
}

/// Loads the configuration from the config file, or from `override_path`
/// when given (used by tests and embedding hosts).
///
/// A missing file yields a freshly saved default; a file that cannot be
/// parsed is migrated from the legacy shape or, failing that, replaced by
/// the default so a broken config never takes the panel down.
pub fn load_config(override_path: Option<&Path>) -> Result<BrowserConfig> {
    let config_path = match override_path {
        Some(path) => path.to_path_buf(),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };

    if !config_path.exists() {
        tracing::info!(
            "Config file not found, creating default config at {:?}",
            config_path
        );
        let default_config = BrowserConfig::default();
        save_config(&default_config, override_path)?;
        return Ok(default_config);
    }

    let config_content = fs::read_to_string(&config_path)?;

    match serde_json::from_str::<BrowserConfig>(&config_content) {
        Ok(config) => {
            tracing::info!("Loaded config from {:?}", config_path);
            Ok(config)
        }
        Err(e) => {
            tracing::warn!(
                "Failed to parse config file at {:?}: {}. Falling back to default config.",
                config_path,
                e
            );
            migrate_legacy_config(&config_content).or_else(|_| Ok(BrowserConfig::default()))
        }
    }
}

/// Migrates a configuration written before `rootPaths` existed.
///
/// The legacy shape carried a single `rootPath` string and possibly lacked
/// the newer keys entirely; missing or null fields are filled with defaults.
fn migrate_legacy_config(config_content: &str) -> Result<BrowserConfig> {
    let mut value: Value = serde_json::from_str(config_content)?;
    let obj = value
        .as_object_mut()
        .ok_or_else(|| anyhow::anyhow!("Config is not a JSON object"))?;

    let defaults = BrowserConfig::default();

    let ensure_field = |obj: &mut serde_json::Map<String, Value>, key: &str, default_val: Value| {
        if !obj.contains_key(key) || obj.get(key) == Some(&Value::Null) {
            obj.insert(key.to_string(), default_val);
        }
    };

    ensure_field(obj, "rootPaths", serde_json::to_value(&defaults.root_paths)?);
    ensure_field(obj, "rootPath", serde_json::to_value(&defaults.root_path)?);
    ensure_field(obj, "requireGit", Value::Bool(defaults.require_git));
    ensure_field(obj, "ignore", serde_json::to_value(&defaults.ignore)?);
    ensure_field(
        obj,
        "openInNewWindowByDefault",
        Value::Bool(defaults.open_in_new_window_by_default),
    );

    let migrated_config: BrowserConfig = serde_json::from_value(Value::Object(obj.clone()))?;
    tracing::info!("Successfully migrated legacy config");
    Ok(migrated_config)
}

/// Saves the provided configuration to the config file, or to
/// `override_path` when given.
pub fn save_config(config: &BrowserConfig, override_path: Option<&Path>) -> Result<()> {
    let config_path = match override_path {
        Some(path) => path.to_path_buf(),
        None => get_config_file_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?,
    };

    if let Some(dir) = config_path.parent() {
        if !dir.exists() {
            fs::create_dir_all(dir)?;
            tracing::info!("Created config directory: {:?}", dir);
        }
    }

    let config_json = serde_json::to_string_pretty(config)?;
    fs::write(&config_path, config_json)?;
    tracing::info!("Saved config to {:?}", config_path);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::test_helpers::setup_test_logging;
    use tempfile::tempdir;

    #[test]
    fn save_and_load_round_trip() {
        setup_test_logging();
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);

        let mut config = BrowserConfig::default();
        config.root_paths = vec![PathBuf::from("/projects")];
        config.require_git = true;
        save_config(&config, Some(&path)).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn missing_file_creates_default() {
        setup_test_logging();
        let dir = tempdir().unwrap();
        let path = dir.path().join("fresh").join(CONFIG_FILE);

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded, BrowserConfig::default());
        assert!(path.exists());
    }

    #[test]
    fn legacy_single_root_config_migrates() {
        setup_test_logging();
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, r#"{ "rootPath": "/old/projects", "requireGit": true }"#).unwrap();

        let loaded = load_config(Some(&path)).unwrap();
        assert_eq!(loaded.root_path, Some(PathBuf::from("/old/projects")));
        assert!(loaded.root_paths.is_empty());
        assert!(loaded.require_git);
        assert_eq!(
            loaded.effective_roots(),
            vec![PathBuf::from("/old/projects")]
        );
    }

    #[test]
    fn root_paths_take_precedence_over_legacy_root() {
        let config = BrowserConfig {
            root_paths: vec![PathBuf::from("/new")],
            root_path: Some(PathBuf::from("/old")),
            ..Default::default()
        };
        assert_eq!(config.effective_roots(), vec![PathBuf::from("/new")]);
    }

    #[test]
    fn empty_roots_mean_not_configured() {
        let config = BrowserConfig {
            root_paths: Vec::new(),
            root_path: None,
            ..Default::default()
        };
        assert!(config.effective_roots().is_empty());
    }
}
