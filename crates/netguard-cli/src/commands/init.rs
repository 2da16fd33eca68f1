use std::fs;
use std::path::{Path, PathBuf};

use netguard_source::{NetguardConfig, CONFIG_FILE_NAME};

use crate::error::{convert_io_error, CliError};

/// Writes a default `netguard.toml` into `dir`, creating it if needed.
pub fn handle_init(dir: &Path, force: bool) -> Result<PathBuf, CliError> {
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(|e| convert_io_error(e, dir.to_path_buf(), "creating directory"))?;
    }

    let path = dir.join(CONFIG_FILE_NAME);
    if path.exists() && !force {
        return Err(CliError::AlreadyExists { path });
    }

    let text = NetguardConfig::default().to_toml_string()?;
    fs::write(&path, text).map_err(|e| convert_io_error(e, path.clone(), "writing configuration"))?;

    println!("Created {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_loadable_defaults() {
        let dir = TempDir::new().unwrap();
        let path = handle_init(&dir.path().join("project"), false).unwrap();

        assert_eq!(NetguardConfig::load(&path).unwrap(), NetguardConfig::default());
    }

    #[test]
    fn keeps_existing_config_unless_forced() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "[scan]\nmode = \"marked\"\n").unwrap();

        let err = handle_init(dir.path(), false).unwrap_err();
        assert!(matches!(err, CliError::AlreadyExists { .. }));
        assert!(fs::read_to_string(&path).unwrap().contains("marked"));

        handle_init(dir.path(), true).unwrap();
        assert_eq!(NetguardConfig::load(&path).unwrap(), NetguardConfig::default());
    }
}
