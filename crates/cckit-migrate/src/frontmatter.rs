//! Minimal frontmatter scan for migration.
//!
//! Migration only needs the `description` field, so this is deliberately
//! simpler than the resolver's full parser: scan the `---`-delimited header
//! line by line and take the first `description:` value, with surrounding
//! quotes stripped.

/// Description used when a source file has no usable frontmatter.
pub const DEFAULT_DESCRIPTION: &str = "Imported from Claude Code";

/// Extract the `description` frontmatter value from a command file.
pub fn description_of(content: &str) -> String {
    let mut lines = content.lines();
    if lines.next().map(str::trim) != Some("---") {
        return DEFAULT_DESCRIPTION.to_owned();
    }

    for line in lines {
        if line.trim() == "---" {
            break;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        if key.trim() == "description" {
            return value.trim().trim_matches(['"', '\'']).to_owned();
        }
    }

    DEFAULT_DESCRIPTION.to_owned()
}
