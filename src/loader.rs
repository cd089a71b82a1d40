//! Loading of transition tables from the filesystem, from strings and from
//! the built-in library.

use std::fs;
use std::path::{Path, PathBuf};

use crate::library::MachineLibrary;
use crate::machine::Machine;
use crate::parser::parse;
use crate::types::MachineError;

/// Source prefix selecting a built-in machine instead of a filesystem path,
/// e.g. `builtin:cons0`.
pub const BUILTIN_PREFIX: &str = "builtin:";

/// `MachineLoader` reads transition tables and turns them into validated
/// [`Machine`]s.
pub struct MachineLoader;

impl MachineLoader {
    /// Loads a machine from `source`: a path, or a [`BUILTIN_PREFIX`]-tagged
    /// name resolved against the built-in library.
    pub fn load(source: &str) -> Result<Machine, MachineError> {
        match source.strip_prefix(BUILTIN_PREFIX) {
            Some(name) => MachineLibrary::find(name),
            None => Self::load_file(Path::new(source)),
        }
    }

    /// Loads a machine from a transition-table file.
    pub fn load_file(path: &Path) -> Result<Machine, MachineError> {
        let content = fs::read_to_string(path).map_err(|e| {
            MachineError::File(format!("failed to read file {}: {}", path.display(), e))
        })?;

        parse(&content)
    }

    /// Loads a machine from table text already in memory.
    pub fn load_str(content: &str) -> Result<Machine, MachineError> {
        parse(content)
    }

    /// Loads every `.tm` table in `directory`, collecting one result per
    /// file. Subdirectories and other extensions are skipped.
    pub fn load_dir(directory: &Path) -> Vec<Result<(PathBuf, Machine), MachineError>> {
        if !directory.exists() {
            return vec![Err(MachineError::File(format!(
                "directory {} does not exist",
                directory.display()
            )))];
        }

        let entries = match fs::read_dir(directory) {
            Ok(entries) => entries,
            Err(e) => {
                return vec![Err(MachineError::File(format!(
                    "failed to read directory {}: {}",
                    directory.display(),
                    e
                )))]
            }
        };

        entries
            .filter_map(|entry| {
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        return Some(Err(MachineError::File(format!(
                            "failed to read directory entry: {e}"
                        ))))
                    }
                };

                let path = entry.path();

                if path.is_dir() || path.extension().is_none_or(|ext| ext != "tm") {
                    return None;
                }

                match Self::load_file(&path) {
                    Ok(machine) => Some(Ok((path, machine))),
                    Err(e) => Some(Err(MachineError::File(format!(
                        "failed to load machine from {}: {}",
                        path.display(),
                        e
                    )))),
                }
            })
            .collect()
    }
}
