//! Settings file loading
//!
//! ```toml
//! [urdf]
//! dir = "/opt/dexmate/urdf"
//! cache_capacity = 4
//!
//! [overrides]
//! allow_hand_override = true
//! disable_estop = false
//! disable_heartbeat = false
//! ```

use crate::modifier::OverrideOptions;
use crate::resolver::EnvSource;
use crate::urdf::DEFAULT_CACHE_CAPACITY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Overrides `[urdf] dir`
pub const URDF_DIR_ENV_VAR: &str = "DEXBOT_URDF_DIR";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub urdf: UrdfSettings,
    #[serde(default)]
    pub overrides: OverrideOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UrdfSettings {
    /// Root that relative URDF paths are resolved against
    #[serde(default)]
    pub dir: Option<PathBuf>,
    /// Parsed URDFs kept by the shared cache
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
}

impl Default for UrdfSettings {
    fn default() -> Self {
        Self {
            dir: None,
            cache_capacity: default_cache_capacity(),
        }
    }
}

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, SettingsError> {
        Ok(toml::from_str(content)?)
    }

    /// Layer `DEXBOT_URDF_DIR` and the `DEXCONTROL_*` flags on top
    pub fn apply_env(mut self, env: &dyn EnvSource) -> Self {
        if let Some(dir) = env.non_empty(URDF_DIR_ENV_VAR) {
            self.urdf.dir = Some(PathBuf::from(dir));
        }
        self.overrides = self.overrides.with_env(env);
        self
    }
}

/// Load settings from `path`, or defaults when the file does not exist
pub fn load_settings(path: &Path) -> Result<Settings, SettingsError> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let settings = Settings::from_toml(&content)?;
        info!(path = %path.display(), "Loaded settings");
        Ok(settings)
    } else {
        info!(
            path = %path.display(),
            "Settings file not found, using defaults"
        );
        Ok(Settings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::DISABLE_HEARTBEAT_ENV_VAR;
    use std::collections::HashMap;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let settings = load_settings(&dir.path().join("dexbot.toml")).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.urdf.cache_capacity, 4);
        assert!(settings.overrides.allow_hand_override);
    }

    #[test]
    fn test_load_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dexbot.toml");
        std::fs::write(
            &path,
            "[urdf]\ndir = \"/opt/urdf\"\n\n[overrides]\ndisable_estop = true\n",
        )
        .unwrap();

        let settings = load_settings(&path).unwrap();
        assert_eq!(settings.urdf.dir, Some(PathBuf::from("/opt/urdf")));
        assert_eq!(settings.urdf.cache_capacity, 4);
        assert!(settings.overrides.disable_estop);
        assert!(settings.overrides.allow_hand_override);
    }

    #[test]
    fn test_invalid_toml() {
        let result = Settings::from_toml("[urdf\ndir = 3");
        assert!(matches!(result, Err(SettingsError::TomlError(_))));
    }

    #[test]
    fn test_env_layer() {
        let env: HashMap<String, String> = [
            (URDF_DIR_ENV_VAR.to_string(), "/srv/urdf".to_string()),
            (DISABLE_HEARTBEAT_ENV_VAR.to_string(), "yes".to_string()),
        ]
        .into_iter()
        .collect();
        let settings = Settings::default().apply_env(&env);
        assert_eq!(settings.urdf.dir, Some(PathBuf::from("/srv/urdf")));
        assert!(settings.overrides.disable_heartbeat);
        assert!(!settings.overrides.disable_estop);
    }

    #[test]
    fn test_empty_env_dir_is_ignored() {
        let env: HashMap<String, String> =
            [(URDF_DIR_ENV_VAR.to_string(), String::new())].into_iter().collect();
        let settings = Settings::from_toml("[urdf]\ndir = \"/opt/urdf\"\n")
            .unwrap()
            .apply_env(&env);
        assert_eq!(settings.urdf.dir, Some(PathBuf::from("/opt/urdf")));
    }
}
