//! Defensive file loading.
//!
//! The resolver reads files that an external installer may be rewriting at
//! any moment (settings, the plugin manifest, command files).  Every read in
//! this module therefore degrades to an empty/default value instead of
//! propagating an error: a file that disappeared or failed to parse is
//! treated exactly like a file that never existed.

use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

/// Load and deserialize a JSON file, returning `T::default()` on any I/O or
/// parse failure.
pub fn load_json<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %err, "unreadable json file");
            }
            return T::default();
        }
    };

    match serde_json::from_str(&text) {
        Ok(value) => value,
        Err(err) => {
            tracing::debug!(path = %path.display(), error = %err, "unparseable json file");
            T::default()
        }
    }
}

/// Read a UTF-8 text file, returning `None` on any failure.
pub fn read_text(path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(text) => Some(text),
        Err(err) => {
            if err.kind() != std::io::ErrorKind::NotFound {
                tracing::debug!(path = %path.display(), error = %err, "unreadable text file");
            }
            None
        }
    }
}
