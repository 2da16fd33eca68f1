use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name searched for by [`find_config`].
pub const CONFIG_FILE_NAME: &str = "netguard.toml";

/// Top-level contents of `netguard.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(default, deny_unknown_fields)]
pub struct NetguardConfig {
    /// Which call targets and annotations carry the network effect
    pub effects: EffectsConfig,

    /// Which functions the scanner inspects
    pub scan: ScanConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EffectsConfig {
    /// Start from the built-in catalog of library calls and annotations.
    pub builtin: bool,

    /// Extra fully qualified call targets that always open a connection
    pub risky_calls: Vec<String>,

    /// Extra annotations whose presence on a declaration implies network I/O
    pub risk_annotations: Vec<String>,

    /// Extra annotations that mark a function as accepting the effect
    pub accepting_annotations: Vec<String>,

    /// Extra annotations that opt a function into checking in `marked` mode
    pub marker_annotations: Vec<String>,
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            builtin: true,
            risky_calls: vec![],
            risk_annotations: vec![],
            accepting_annotations: vec![],
            marker_annotations: vec![],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ScanModeConfig {
    /// Check every function body
    #[default]
    All,
    /// Check only marked functions and configured entry points
    Marked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScanConfig {
    pub mode: ScanModeConfig,

    /// Function names checked in `marked` mode even without a marker annotation
    #[serde(default = "default_entry_points")]
    pub entry_points: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            mode: ScanModeConfig::default(),
            entry_points: default_entry_points(),
        }
    }
}

pub fn default_entry_points() -> Vec<String> {
    vec!["main".to_string(), "onCreate".to_string()]
}

impl NetguardConfig {
    /// Parse configuration text. `origin` names the text in error reports.
    pub fn from_toml_str(text: &str, origin: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::from_toml(err, text, origin))
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text, &path.display().to_string())?;
        log::debug!("loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Serialize back to TOML, as written by `netguard init`.
    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|err| ConfigError::Serialize(err.to_string()))
    }
}

/// Finds `netguard.toml` by searching `start` and then each parent directory.
pub fn find_config(start: &Path) -> Result<PathBuf, ConfigError> {
    let mut current = if start.is_dir() {
        start.to_path_buf()
    } else {
        start
            .parent()
            .map_or_else(|| start.to_path_buf(), Path::to_path_buf)
    };

    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Ok(candidate);
        }
        if !current.pop() {
            return Err(ConfigError::NotFound {
                searched_from: start.to_path_buf(),
            });
        }
    }
}
