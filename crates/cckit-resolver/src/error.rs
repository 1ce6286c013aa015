//! Error types for command resolution.
//!
//! Almost every failure mode in this crate is absorbed rather than surfaced:
//! missing files, unparseable JSON, and unresolvable plugin paths all degrade
//! to empty defaults (see the loader and registry modules).  The one failure
//! that is reported is a command file that passed the existence probe but
//! could not be read afterwards.

use std::path::PathBuf;

/// Resolver-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum ResolveError {
    /// The probe saw a regular file but the subsequent read failed
    /// (permissions, or a concurrent removal by an external installer).
    #[error("found command at `{path}` but failed to read content: {source}")]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, ResolveError>;
