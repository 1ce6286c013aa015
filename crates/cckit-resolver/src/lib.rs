//! Layered command lookup for cckit.
//!
//! This crate provides:
//!
//! - **Candidate normalizer** — expands a raw command name (`jira:my-issues`,
//!   `jira/my-issues`, `my-issues.md`) into the ordered relative paths to
//!   probe.
//!
//! - **Directory prober / enumerator** — first-match probing and recursive
//!   command listing for suggestions.
//!
//! - **Plugin registry resolver** — reads enabled-plugin ids from layered
//!   settings files and maps them to install directories via the plugin
//!   manifest, with fallback to the latest available sibling version.
//!
//! - **Content parser** — splits a command file into `---`-delimited
//!   frontmatter and body.
//!
//! - **Reference extractor** — finds script paths and `/skill` mentions in
//!   command bodies.
//!
//! - **[`Resolver`]** — composes the above into the full search order:
//!   project → user → plugins, first match wins.
//!
//! Every read tolerates concurrent modification by an external installer:
//! missing and malformed inputs degrade to empty defaults instead of errors.
//!
//! # Example
//!
//! ```rust,no_run
//! use cckit_resolver::Resolver;
//!
//! let resolver = Resolver::new("/home/me", "/home/me/project");
//! let resolution = resolver.resolve("jira:my-issues");
//! if resolution.found {
//!     println!("{}", resolution.path.unwrap().display());
//! }
//! ```

pub mod candidates;
pub mod error;
pub mod extract;
pub mod loader;
pub mod parser;
pub mod probe;
pub mod registry;
pub mod resolver;
pub mod types;

pub use candidates::{COMMAND_EXT, candidate_paths};
pub use error::{ResolveError, Result};
pub use extract::{script_references, skill_references};
pub use parser::parse_command;
pub use probe::{enumerate, probe};
pub use registry::{enabled_plugins, installed_plugin_paths};
pub use resolver::Resolver;
pub use types::{
    CommandListing, CommandSource, FrontmatterValue, ParsedCommand, Resolution, ScriptReference,
    SearchLocation,
};
