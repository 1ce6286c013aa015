//! Error types for the migration runner.
//!
//! Source reads are best-effort (an unreadable file is reported and
//! skipped), but failures while writing into the target tree propagate.

/// Migration-specific errors.
#[derive(Debug, thiserror::Error)]
pub enum MigrateError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, MigrateError>;
