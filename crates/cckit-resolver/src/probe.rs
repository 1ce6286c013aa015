//! Directory probing and enumeration.
//!
//! `probe` answers "does any candidate exist under this directory"; `enumerate`
//! lists everything a directory offers, for suggestion output.  Both treat a
//! missing base directory as an empty result.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::candidates::COMMAND_EXT;

/// Find the first candidate that exists as a regular file under `base`.
///
/// Directories matching a candidate name are skipped; a missing `base` is a
/// plain miss.  No side effects.
pub fn probe(base: &Path, candidates: &[String]) -> Option<PathBuf> {
    for candidate in candidates {
        let path = base.join(candidate);
        if path.is_file() {
            return Some(path);
        }
    }
    None
}

/// Recursively list every command file under `base` as a colon-joined name.
///
/// `a.md` becomes `a`, `b/c.md` becomes `b:c`, and a non-empty `prefix`
/// yields `prefix:name`.  Returns an empty list when `base` does not exist.
/// Order follows directory traversal and is not guaranteed.
pub fn enumerate(base: &Path, prefix: &str) -> Vec<String> {
    let mut commands = Vec::new();
    if !base.exists() {
        return commands;
    }

    for entry in WalkDir::new(base).into_iter().filter_map(|e| e.ok()) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !file_name.ends_with(COMMAND_EXT) {
            continue;
        }
        let Ok(relative) = path.strip_prefix(base) else {
            continue;
        };

        let name = relative
            .with_extension("")
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join(":");

        if prefix.is_empty() {
            commands.push(name);
        } else {
            commands.push(format!("{prefix}:{name}"));
        }
    }

    commands
}
