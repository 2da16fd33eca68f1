//! Reading analysis units from disk.

use std::fs;
use std::path::{Path, PathBuf};

use netguard_resolve::BindingTable;
use netguard_syntax::{ProgramUnit, UnitError};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::error::{convert_io_error, CliError};

/// Extension of unit documents picked up when walking directories.
pub const UNIT_EXTENSION: &str = "json";

/// One file handed over by a front end: the unit and the bindings of its
/// calls.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UnitDocument {
    pub unit: ProgramUnit,
    #[serde(default)]
    pub bindings: BindingTable,
}

pub fn load_unit(path: &Path) -> Result<UnitDocument, CliError> {
    let text = fs::read_to_string(path).map_err(|source| UnitError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let document = serde_json::from_str(&text)
        .map_err(|err| UnitError::decode(err, &text, &path.display().to_string()))?;
    Ok(document)
}

/// Expands `paths` into unit files: files are taken as given, directories are
/// searched recursively for `.json` documents. The result is sorted and free
/// of duplicates so output order does not depend on the file system.
pub fn discover_units(paths: &[PathBuf]) -> Result<Vec<PathBuf>, CliError> {
    let mut units = Vec::new();
    for path in paths {
        if !path.is_dir() {
            if !path.exists() {
                return Err(convert_io_error(
                    std::io::ErrorKind::NotFound.into(),
                    path.clone(),
                    "looking for units",
                ));
            }
            units.push(path.clone());
            continue;
        }
        for entry in WalkDir::new(path).follow_links(true) {
            let entry = entry.map_err(|err| {
                let at = err.path().unwrap_or(path).to_path_buf();
                convert_io_error(err.into(), at, "walking directory")
            })?;
            let is_unit = entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == UNIT_EXTENSION);
            if is_unit {
                units.push(entry.into_path());
            }
        }
    }
    units.sort();
    units.dedup();
    log::debug!("discovered {} unit file(s)", units.len());
    Ok(units)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"{
        "unit": { "path": "Main.kt", "items": [] },
        "bindings": [{ "call": 1, "target": { "qualified_name": "java.net.URL.openStream" } }]
    }"#;

    #[test]
    fn walks_directories_for_json_documents() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("app/ui")).unwrap();
        fs::write(dir.path().join("app/b.json"), DOCUMENT).unwrap();
        fs::write(dir.path().join("app/ui/a.json"), DOCUMENT).unwrap();
        fs::write(dir.path().join("app/notes.txt"), "").unwrap();

        let units = discover_units(&[dir.path().to_path_buf()]).unwrap();
        let names: Vec<_> = units
            .iter()
            .map(|path| path.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(names, vec![PathBuf::from("app/b.json"), PathBuf::from("app/ui/a.json")]);
    }

    #[test]
    fn missing_paths_are_errors() {
        let dir = TempDir::new().unwrap();
        let err = discover_units(&[dir.path().join("absent.json")]).unwrap_err();
        assert!(matches!(err, CliError::IoError { .. }));
    }

    #[test]
    fn loads_unit_and_bindings() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unit.json");
        fs::write(&path, DOCUMENT).unwrap();

        let document = load_unit(&path).unwrap();
        assert_eq!(document.unit.path, "Main.kt");
        assert_eq!(document.bindings.len(), 1);
    }

    #[test]
    fn bindings_are_optional() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("unit.json");
        fs::write(&path, r#"{ "unit": { "path": "Empty.kt", "items": [] } }"#).unwrap();

        assert!(load_unit(&path).unwrap().bindings.is_empty());
    }

    #[test]
    fn malformed_documents_report_decode_errors() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, r#"{ "unit": { "path": 3 } }"#).unwrap();

        let err = load_unit(&path).unwrap_err();
        assert!(matches!(err, CliError::Unit(UnitError::Decode { .. })));
    }
}
