//! Generated TOML command records.
//!
//! Every generated file carries the tag-marker comment so a later cleanup
//! pass can tell migrated-and-regenerable outputs apart from hand-authored
//! ones, plus a `# Source:` comment pointing back at the original file.
//!
//! ```text
//! description = "Review a pull request"
//! # Tags: claude-code-import
//! # Source: /home/me/.claude/commands/review.md
//!
//! prompt = """
//! ...
//! """
//! ```

use std::path::Path;

use crate::types::Scope;

/// Marker identifying a file as generated by this tool.
pub const IMPORT_TAG: &str = "# Tags: claude-code-import";

/// Render the TOML record for one migrated command.
///
/// Project scope emits an `@`-prefixed reference to the source file (a
/// dynamic include, so source edits propagate); global scope embeds the
/// source content directly for portability.
pub fn toml_record(
    source_content: &str,
    description: &str,
    source_path: &Path,
    scope: Scope,
) -> String {
    let description = escape_basic(description);
    let prompt = match scope {
        Scope::Project => format!("@{}", source_path.display()),
        // Keep an embedded `"""` from terminating the multi-line string.
        Scope::Global => source_content.replace("\"\"\"", "\\\"\"\""),
    };

    format!(
        "description = \"{description}\"\n\
         {IMPORT_TAG}\n\
         # Source: {source}\n\
         \n\
         prompt = \"\"\"\n\
         {prompt}\n\
         \"\"\"\n",
        source = source_path.display(),
    )
}

/// Escape a value for a TOML basic (double-quoted) string.
fn escape_basic(value: &str) -> String {
    value.replace('\\', "\\\\").replace('"', "\\\"")
}
