//! Migration policy types.

use std::fmt;

/// Where generated commands land, and how the prompt is materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    /// User-global target (`~/.gemini`); the source content is embedded in
    /// the output so it survives the source moving or disappearing.
    Global,

    /// Project-local target (`./.gemini`); the output carries an `@`
    /// reference back to the source file so later edits propagate.
    Project,
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Global => f.write_str("global"),
            Self::Project => f.write_str("project"),
        }
    }
}

/// Write policy applied when a migration output already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// Wipe all previously migrated outputs first, then regenerate.
    Force,

    /// Overwrite existing outputs unconditionally.
    Override,

    /// Skip files whose output already exists.
    Ignore,

    /// Same as `Ignore`; the default.
    Auto,

    /// Run cleanup only, write nothing.
    Delete,
}

impl Strategy {
    /// Whether an existing output file blocks regeneration.
    pub fn skips_existing(self) -> bool {
        matches!(self, Self::Ignore | Self::Auto)
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Force => f.write_str("force"),
            Self::Override => f.write_str("override"),
            Self::Ignore => f.write_str("ignore"),
            Self::Auto => f.write_str("auto"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

/// What to migrate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    /// User commands and plugin commands.
    All,

    /// Only `~/.claude/commands`.
    Commands,

    /// Only the plugin cache.
    Plugins,
}

impl Selection {
    pub fn includes_commands(self) -> bool {
        matches!(self, Self::All | Self::Commands)
    }

    pub fn includes_plugins(self) -> bool {
        matches!(self, Self::All | Self::Plugins)
    }
}

impl fmt::Display for Selection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Commands => f.write_str("commands"),
            Self::Plugins => f.write_str("plugins"),
        }
    }
}
