//! Candidate-name normalizer.
//!
//! A command can be addressed as `jira:my-issues`, `jira/my-issues`, or
//! `my-issues`, and optionally with the `.md` extension already attached.
//! This module expands one raw name into the ordered list of relative paths
//! to probe; order encodes priority and the first hit wins.

/// File extension for command files.
pub const COMMAND_EXT: &str = ".md";

/// Expand a raw command name into candidate relative paths.
///
/// Rules, applied in order (a rule that does not match is skipped):
/// 1. name contains `:` — split on `:`, join with `/`, append the extension
/// 2. name contains `/` — append the extension directly
/// 3. always — name plus extension (the direct form)
/// 4. name already ends with the extension — the name unchanged
///
/// Duplicates are removed, keeping the first occurrence.
pub fn candidate_paths(name: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    if name.contains(':') {
        let slashed = name.split(':').collect::<Vec<_>>().join("/");
        candidates.push(format!("{slashed}{COMMAND_EXT}"));
    }

    if name.contains('/') {
        candidates.push(format!("{name}{COMMAND_EXT}"));
    }

    candidates.push(format!("{name}{COMMAND_EXT}"));

    if name.ends_with(COMMAND_EXT) {
        candidates.push(name.to_owned());
    }

    let mut unique = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}
