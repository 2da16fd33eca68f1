pub mod check;
pub mod init;
pub mod registry;

use std::path::{Path, PathBuf};

use netguard_source::{find_config, ConfigError, NetguardConfig, CONFIG_FILE_NAME};

use crate::error::CliError;

/// The configuration for a run: `explicit` when given, otherwise the nearest
/// `netguard.toml` above `start`, otherwise the defaults.
pub fn load_config(explicit: Option<&Path>, start: &Path) -> Result<NetguardConfig, CliError> {
    if let Some(path) = explicit {
        return Ok(NetguardConfig::load(path)?);
    }
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    match find_config(&start) {
        Ok(path) => Ok(NetguardConfig::load(&path)?),
        Err(ConfigError::NotFound { .. }) => {
            log::info!("no {CONFIG_FILE_NAME} found from {}, using defaults", start.display());
            Ok(NetguardConfig::default())
        }
        Err(err) => Err(err.into()),
    }
}

/// Where configuration discovery starts for a set of input paths.
pub fn search_start(paths: &[PathBuf]) -> PathBuf {
    paths.first().cloned().unwrap_or_else(|| PathBuf::from("."))
}
