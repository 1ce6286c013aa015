//! Type definitions for command resolution.
//!
//! A command is a markdown file with an optional `---`-delimited frontmatter
//! block, discovered across a layered search path: the project's
//! `.claude/commands/` directory, the user's `~/.claude/commands/` directory,
//! and the `commands/` directory of every enabled plugin.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize, Serializer};

/// Where a command was (or could be) found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSource {
    /// The project-local `.claude/commands/` directory.
    Project,

    /// The user-global `~/.claude/commands/` directory.
    User,

    /// The `commands/` directory of an installed plugin, identified by its
    /// full id (`name@marketplace`).
    Plugin(String),
}

impl fmt::Display for CommandSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Project => f.write_str("project"),
            Self::User => f.write_str("user"),
            Self::Plugin(id) => write!(f, "plugin:{id}"),
        }
    }
}

impl Serialize for CommandSource {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// A directory to probe, paired with the provenance tag assigned to any
/// command found inside it.  Immutable once constructed.
#[derive(Debug, Clone)]
pub struct SearchLocation {
    /// The commands directory to probe.
    pub dir: PathBuf,

    /// Provenance assigned to matches from this location.
    pub source: CommandSource,
}

/// A frontmatter value — either a plain string or a `[...]` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FrontmatterValue {
    /// A single trimmed string (surrounding quotes are kept verbatim).
    Scalar(String),

    /// A comma-separated list written as `[a, b, c]`.
    List(Vec<String>),
}

/// A command file split into frontmatter metadata and body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedCommand {
    /// All `key: value` pairs from the frontmatter block.
    pub frontmatter: BTreeMap<String, FrontmatterValue>,

    /// Everything after the frontmatter block (or the whole file when no
    /// frontmatter is present).
    pub body: String,

    /// The `description` frontmatter key, empty string if absent.
    pub description: String,

    /// The `allowed-tools` frontmatter key, empty list if absent.
    pub allowed_tools: Vec<String>,

    /// The `argument-hint` frontmatter key, empty string if absent.
    pub argument_hint: String,
}

/// A script file referenced from a command body, resolved and read.
#[derive(Debug, Clone, Serialize)]
pub struct ScriptReference {
    /// The expanded on-disk path of the script.
    pub path: PathBuf,

    /// The script's content.
    pub content: String,
}

/// A discoverable command, used for suggestion lists.
#[derive(Debug, Clone, Serialize)]
pub struct CommandListing {
    /// Colon-joined command name (e.g. `jira:my-issues`).
    pub name: String,

    /// Where the command lives.
    pub source: CommandSource,
}

/// The outcome of a full command lookup.
///
/// Serialized shape depends on the terminal state: a successful lookup
/// carries the path, provenance, content, and extracted references; a miss
/// carries the suggestion list instead; a found-but-unreadable file carries
/// only the error message.  Absent branches are omitted from the JSON.
#[derive(Debug, Serialize)]
pub struct Resolution {
    /// Whether a command file was found and read.
    pub found: bool,

    /// The raw name the lookup was asked to resolve.
    pub search_query: String,

    /// The candidate relative paths probed in each location, in order.
    pub candidates_checked: Vec<String>,

    /// Every directory probed before the search terminated, in order.
    pub locations_searched: Vec<String>,

    /// Set when a file passed the existence probe but could not be read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Absolute path of the matched command file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,

    /// Provenance of the matched command file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<CommandSource>,

    /// Raw file content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Frontmatter/body split of the content.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parsed: Option<ParsedCommand>,

    /// Referenced scripts that could be resolved and read, keyed by the
    /// reference string as it appeared in the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_scripts: Option<BTreeMap<String, ScriptReference>>,

    /// Skill names referenced from the body.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referenced_skills: Option<BTreeSet<String>>,

    /// On a miss: every discoverable command, for suggestions.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_commands: Option<Vec<CommandListing>>,
}

impl Resolution {
    /// A result skeleton with only the diagnostic fields populated.
    pub(crate) fn miss(
        search_query: String,
        candidates_checked: Vec<String>,
        locations_searched: Vec<String>,
    ) -> Self {
        Self {
            found: false,
            search_query,
            candidates_checked,
            locations_searched,
            error: None,
            path: None,
            source: None,
            content: None,
            parsed: None,
            referenced_scripts: None,
            referenced_skills: None,
            available_commands: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn source_display() {
        assert_eq!(CommandSource::Project.to_string(), "project");
        assert_eq!(CommandSource::User.to_string(), "user");
        assert_eq!(
            CommandSource::Plugin("git@official".into()).to_string(),
            "plugin:git@official"
        );
    }

    #[test]
    fn source_serializes_as_tagged_string() {
        let json = serde_json::to_string(&CommandSource::Plugin("x@m".into())).unwrap();
        assert_eq!(json, "\"plugin:x@m\"");
    }

    #[test]
    fn miss_serialization_omits_success_fields() {
        let resolution = Resolution::miss("x".into(), vec!["x.md".into()], Vec::new());
        let value = serde_json::to_value(&resolution).unwrap();
        assert_eq!(value["found"], false);
        assert_eq!(value["search_query"], "x");
        assert!(value.get("path").is_none());
        assert!(value.get("error").is_none());
        assert!(value.get("available_commands").is_none());
    }

    #[test]
    fn frontmatter_value_serializes_untagged() {
        let scalar = serde_json::to_value(FrontmatterValue::Scalar("a".into())).unwrap();
        assert_eq!(scalar, serde_json::json!("a"));
        let list =
            serde_json::to_value(FrontmatterValue::List(vec!["a".into(), "b".into()])).unwrap();
        assert_eq!(list, serde_json::json!(["a", "b"]));
    }
}
