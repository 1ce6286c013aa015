//! Command file parser.
//!
//! A command file is markdown with an optional metadata header:
//!
//! ```text
//! ---
//! description: Show my open issues
//! allowed-tools: [Bash, Read]
//! argument-hint: <project-key>
//! ---
//!
//! Fetch the issues assigned to me...
//! ```
//!
//! The header is a flat `key: value` block, not full YAML: values are kept
//! verbatim (quotes included), and only the `[a, b]` list form gets special
//! treatment.  A file without a leading `---`, or with an unterminated
//! header, is treated as all body — malformed frontmatter is never an error.

use crate::types::{FrontmatterValue, ParsedCommand};

/// Frontmatter key backing [`ParsedCommand::description`].
const KEY_DESCRIPTION: &str = "description";

/// Frontmatter key backing [`ParsedCommand::allowed_tools`].
const KEY_ALLOWED_TOOLS: &str = "allowed-tools";

/// Frontmatter key backing [`ParsedCommand::argument_hint`].
const KEY_ARGUMENT_HINT: &str = "argument-hint";

/// Split a command file into frontmatter and body.
pub fn parse_command(content: &str) -> ParsedCommand {
    let mut parsed = ParsedCommand {
        body: content.to_owned(),
        ..ParsedCommand::default()
    };

    if !content.starts_with("---") {
        return parsed;
    }

    let parts: Vec<&str> = content.splitn(3, "---").collect();
    if parts.len() < 3 {
        // Unterminated header: fall back to the verbatim body.
        return parsed;
    }

    parsed.body = parts[2].trim().to_owned();

    for line in parts[1].trim().lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim();
        let value = value.trim();

        let value = if value.starts_with('[') && value.ends_with(']') {
            let inner = &value[1..value.len() - 1];
            FrontmatterValue::List(inner.split(',').map(|v| v.trim().to_owned()).collect())
        } else {
            FrontmatterValue::Scalar(value.to_owned())
        };
        parsed.frontmatter.insert(key.to_owned(), value);
    }

    parsed.description = match parsed.frontmatter.get(KEY_DESCRIPTION) {
        Some(FrontmatterValue::Scalar(s)) => s.clone(),
        _ => String::new(),
    };
    parsed.allowed_tools = match parsed.frontmatter.get(KEY_ALLOWED_TOOLS) {
        Some(FrontmatterValue::List(list)) => list.clone(),
        // A bare scalar is read as a single-tool list.
        Some(FrontmatterValue::Scalar(s)) if !s.is_empty() => vec![s.clone()],
        _ => Vec::new(),
    };
    parsed.argument_hint = match parsed.frontmatter.get(KEY_ARGUMENT_HINT) {
        Some(FrontmatterValue::Scalar(s)) => s.clone(),
        _ => String::new(),
    };

    parsed
}
