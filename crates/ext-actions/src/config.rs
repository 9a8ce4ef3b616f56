//! Configuration
//!
//! Layered from built-in defaults, an optional `ext-actions.toml` and
//! `EXT_ACTIONS_*` environment variables.

use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

use crate::types::{Error, Result};

/// Name of the plugin directory
pub const EXTDIR: &str = "ext_actions";

/// Default configuration file name
pub const CONFIG_FILE: &str = "ext-actions.toml";

/// Extension action settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtActionsConfig {
    /// Directory scanned for plugin modules
    #[serde(default = "default_plugin_dir")]
    pub plugin_dir: PathBuf,
    /// File extension identifying a plugin module
    #[serde(default = "default_module_extension")]
    pub module_extension: String,
}

/// `ext_actions` beside the running executable, or relative to the working
/// directory when the executable location is unknown
fn default_plugin_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join(EXTDIR)))
        .unwrap_or_else(|| PathBuf::from(EXTDIR))
}

fn default_module_extension() -> String {
    "toml".to_string()
}

impl Default for ExtActionsConfig {
    fn default() -> Self {
        Self {
            plugin_dir: default_plugin_dir(),
            module_extension: default_module_extension(),
        }
    }
}

impl ExtActionsConfig {
    /// Load from `ext-actions.toml` in the working directory (if present)
    /// and the environment
    pub fn load() -> Result<Self> {
        Self::load_from(CONFIG_FILE)
    }

    /// Load from the given file (if present) and the environment
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(path.as_ref()))
            .merge(Env::prefixed("EXT_ACTIONS_"))
            .extract()
            .map_err(|e| Error::Config(e.to_string()))
    }

    /// Use a different plugin directory
    pub fn with_plugin_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.plugin_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_plugin_dir_name() {
        let config = ExtActionsConfig::default();
        assert!(config.plugin_dir.ends_with(EXTDIR));
        assert_eq!(config.module_extension, "toml");
    }

    #[test]
    fn test_load_from_missing_file_uses_defaults() {
        let temp = TempDir::new().unwrap();
        let config = ExtActionsConfig::load_from(temp.path().join("absent.toml")).unwrap();
        assert_eq!(config.module_extension, "toml");
        assert!(config.plugin_dir.ends_with(EXTDIR));
    }

    #[test]
    fn test_load_from_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            "plugin_dir = \"/srv/pootle/actions\"\nmodule_extension = \"action\"\n",
        )
        .unwrap();

        let config = ExtActionsConfig::load_from(&path).unwrap();
        assert_eq!(config.plugin_dir, PathBuf::from("/srv/pootle/actions"));
        assert_eq!(config.module_extension, "action");
    }

    #[test]
    fn test_load_from_invalid_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join(CONFIG_FILE);
        std::fs::write(&path, "plugin_dir = [").unwrap();

        let err = ExtActionsConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
