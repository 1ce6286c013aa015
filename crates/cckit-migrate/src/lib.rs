//! Bulk conversion of Claude Code markdown commands into Gemini CLI TOML
//! commands.
//!
//! This crate provides:
//!
//! - **Frontmatter scan** — extracts the `description` field from a source
//!   command's metadata header.
//!
//! - **Record generation** — renders the output TOML, either embedding the
//!   source content (global scope) or referencing the source file via an
//!   `@path` token (project scope).  Every output carries a tag-marker line
//!   so cleanup can safely target only generated files.
//!
//! - **[`Migrator`]** — walks the source tree (user commands and the plugin
//!   cache) and applies the configured write [`Strategy`].
//!
//! # Example
//!
//! ```rust,no_run
//! use cckit_migrate::{Migrator, Scope, Selection, Strategy};
//!
//! let migrator = Migrator::new(
//!     "/home/me/.claude",
//!     "/home/me/.gemini",
//!     Scope::Global,
//!     Strategy::Auto,
//! );
//! let summary = migrator.run(Selection::All).unwrap();
//! println!("migrated {} commands", summary.migrated);
//! ```

pub mod error;
pub mod frontmatter;
pub mod record;
pub mod runner;
pub mod types;

pub use error::{MigrateError, Result};
pub use frontmatter::{DEFAULT_DESCRIPTION, description_of};
pub use record::{IMPORT_TAG, toml_record};
pub use runner::{MigrationSummary, Migrator};
pub use types::{Scope, Selection, Strategy};
