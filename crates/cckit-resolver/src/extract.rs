//! Cross-reference extraction from command bodies.
//!
//! Command bodies are free-form prose that may mention helper scripts and
//! skills.  Extraction is purely textual and position-independent: a
//! reference counts wherever it appears in the body.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// The three textual forms a script path can take.  `NAME` is word
/// characters and hyphens (`[\w-]+`), `EXT` is word characters (`\w+`).
static SCRIPT_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"~/\.claude/scripts/[\w\-]+\.\w+",
        r"\$HOME/\.claude/scripts/[\w\-]+\.\w+",
        r"/Users/\w+/\.claude/scripts/[\w\-]+\.\w+",
    ]
    .iter()
    .map(|pattern| Regex::new(pattern).expect("script pattern is valid"))
    .collect()
});

/// Skill mention: a slash followed by a lowercase word that may contain
/// word characters, hyphens, and colons (`/review`, `/git:commit`).
static SKILL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/([a-z][\w\-:]+)").expect("skill pattern is valid"));

/// Common path segments that produce false skill matches in prose.
const SKILL_STOPLIST: [&str; 8] = ["dev", "null", "tmp", "bin", "usr", "etc", "var", "home"];

/// Extract script-file references from a command body.
///
/// Returns the deduplicated union across all recognized path forms; order is
/// not significant.
pub fn script_references(content: &str) -> BTreeSet<String> {
    let mut references = BTreeSet::new();
    for pattern in SCRIPT_PATTERNS.iter() {
        for found in pattern.find_iter(content) {
            references.insert(found.as_str().to_owned());
        }
    }
    references
}

/// Extract skill references (`/skill-name` mentions) from a command body.
///
/// Matching is case-insensitive (the content is lowercased first).  A match
/// survives when it is not on the stoplist and either contains a `:` or is
/// longer than 3 characters — the length cutoff trades away short skill
/// names to suppress ordinary slashes in prose.
pub fn skill_references(content: &str) -> BTreeSet<String> {
    let lowered = content.to_lowercase();
    let mut skills = BTreeSet::new();
    for captures in SKILL_PATTERN.captures_iter(&lowered) {
        let name = &captures[1];
        if SKILL_STOPLIST.contains(&name) {
            continue;
        }
        if name.contains(':') || name.len() > 3 {
            skills.insert(name.to_owned());
        }
    }
    skills
}
