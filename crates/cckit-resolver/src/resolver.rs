//! Search-order orchestration.
//!
//! A lookup walks a fixed sequence of locations — project, user, then each
//! enabled plugin in settings order — and stops at the first candidate that
//! exists as a regular file.  On a hit the file is read, parsed, and enriched
//! with any resolvable script references; on a miss every location is
//! enumerated to build a suggestion list.
//!
//! The home and working directories are injected rather than read from the
//! environment, so the whole search order can be exercised against synthetic
//! directory trees.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::candidates::candidate_paths;
use crate::error::ResolveError;
use crate::extract::{script_references, skill_references};
use crate::parser::parse_command;
use crate::probe::{enumerate, probe};
use crate::registry::{enabled_plugins, installed_plugin_paths};
use crate::types::{
    CommandListing, CommandSource, Resolution, ScriptReference, SearchLocation,
};

/// Commands directory, relative to both the project root and the home
/// directory.
const COMMANDS_DIR: &str = ".claude/commands";

/// Commands directory inside a plugin's install directory.
const PLUGIN_COMMANDS_SUBDIR: &str = "commands";

/// Resolves command names against the layered search path.
pub struct Resolver {
    /// The user's home directory.
    home: PathBuf,

    /// The project root (current working directory).
    cwd: PathBuf,
}

impl Resolver {
    /// Create a resolver rooted at the given home and project directories.
    pub fn new(home: impl Into<PathBuf>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            cwd: cwd.into(),
        }
    }

    /// Resolve a command name to its definition.
    ///
    /// Search proceeds project → user → plugins and short-circuits on the
    /// first match.  This never fails: a file that vanished between probe
    /// and read yields a `found = false` result carrying the error message,
    /// and a plain miss carries the suggestion list.
    pub fn resolve(&self, name: &str) -> Resolution {
        let candidates = candidate_paths(name);
        let mut searched = Vec::new();

        for location in self.base_locations() {
            searched.push(location.dir.display().to_string());
            if let Some(path) = probe(&location.dir, &candidates) {
                tracing::debug!(name, path = %path.display(), source = %location.source, "command found");
                return self.build_result(name, &candidates, path, location.source, searched);
            }
        }

        for location in self.plugin_locations() {
            searched.push(location.dir.display().to_string());
            if let Some(path) = probe(&location.dir, &candidates) {
                tracing::debug!(name, path = %path.display(), source = %location.source, "command found");
                return self.build_result(name, &candidates, path, location.source, searched);
            }
        }

        tracing::debug!(name, locations = searched.len(), "command not found");
        let mut resolution = Resolution::miss(name.to_owned(), candidates, searched);
        resolution.available_commands = Some(self.list_available());
        resolution
    }

    /// Enumerate every discoverable command across all locations.
    ///
    /// Used for the suggestion list on a miss and for `--list` output.
    /// Plugin commands are prefixed with the plugin name (the id up to `@`).
    pub fn list_available(&self) -> Vec<CommandListing> {
        let mut available = Vec::new();

        for name in enumerate(&self.cwd.join(COMMANDS_DIR), "") {
            available.push(CommandListing {
                name,
                source: CommandSource::Project,
            });
        }
        for name in enumerate(&self.home.join(COMMANDS_DIR), "") {
            available.push(CommandListing {
                name,
                source: CommandSource::User,
            });
        }

        let installed = installed_plugin_paths(&self.home);
        for plugin_id in enabled_plugins(&self.home, &self.cwd) {
            let Some(install_dir) = installed.get(&plugin_id) else {
                continue;
            };
            let prefix = plugin_id.split('@').next().unwrap_or(plugin_id.as_str());
            for name in enumerate(&install_dir.join(PLUGIN_COMMANDS_SUBDIR), prefix) {
                available.push(CommandListing {
                    name,
                    source: CommandSource::Plugin(plugin_id.clone()),
                });
            }
        }

        available
    }

    /// The two fixed locations that precede any plugin.
    fn base_locations(&self) -> Vec<SearchLocation> {
        vec![
            SearchLocation {
                dir: self.cwd.join(COMMANDS_DIR),
                source: CommandSource::Project,
            },
            SearchLocation {
                dir: self.home.join(COMMANDS_DIR),
                source: CommandSource::User,
            },
        ]
    }

    /// One location per enabled plugin that resolves to an install
    /// directory, in settings order.  Computed only after the fixed
    /// locations miss, so a project or user hit never touches the registry.
    fn plugin_locations(&self) -> Vec<SearchLocation> {
        let installed = installed_plugin_paths(&self.home);
        enabled_plugins(&self.home, &self.cwd)
            .into_iter()
            .filter_map(|plugin_id| {
                let install_dir = installed.get(&plugin_id)?;
                Some(SearchLocation {
                    dir: install_dir.join(PLUGIN_COMMANDS_SUBDIR),
                    source: CommandSource::Plugin(plugin_id),
                })
            })
            .collect()
    }

    /// Assemble the full result for a matched file.
    fn build_result(
        &self,
        name: &str,
        candidates: &[String],
        path: PathBuf,
        source: CommandSource,
        searched: Vec<String>,
    ) -> Resolution {
        let mut resolution = Resolution::miss(name.to_owned(), candidates.to_vec(), searched);

        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(err) => {
                let err = ResolveError::Unreadable { path, source: err };
                tracing::warn!(error = %err, "command unreadable after probe");
                resolution.error = Some(err.to_string());
                return resolution;
            }
        };

        let parsed = parse_command(&content);
        let skills = skill_references(&content);

        // Best-effort enrichment: unreadable script references are dropped.
        let mut referenced_scripts = BTreeMap::new();
        for reference in script_references(&content) {
            if let Some(script) = resolve_script(&reference, &self.home) {
                referenced_scripts.insert(reference, script);
            }
        }

        resolution.found = true;
        resolution.path = Some(path);
        resolution.source = Some(source);
        resolution.content = Some(content);
        resolution.parsed = Some(parsed);
        resolution.referenced_scripts = Some(referenced_scripts);
        resolution.referenced_skills = Some(skills);
        resolution
    }
}

/// Expand `~` and `$HOME` tokens in a script reference and read its content.
fn resolve_script(reference: &str, home: &Path) -> Option<ScriptReference> {
    let home_str = home.display().to_string();
    let expanded = reference.replace("$HOME", &home_str).replace('~', &home_str);
    let path = PathBuf::from(expanded);
    let content = crate::loader::read_text(&path)?;
    Some(ScriptReference { path, content })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    /// Synthetic home with one enabled, installed plugin carrying commands.
    fn plugin_home(root: &Path, plugin_id: &str, commands: &[(&str, &str)]) -> PathBuf {
        let home = root.join("home");
        let install = root.join("cache/mp/plugin/1.0.0");
        for (name, content) in commands {
            write(&install.join("commands").join(name), content);
        }
        write(
            &home.join(".claude/settings.json"),
            &format!(r#"{{"enabledPlugins": {{"{plugin_id}": true}}}}"#),
        );
        write(
            &home.join(".claude/plugins/installed_plugins.json"),
            &format!(
                r#"{{"plugins": {{"{plugin_id}": [{{"installPath": "{}"}}]}}}}"#,
                install.display()
            ),
        );
        home
    }

    #[test]
    fn project_wins_over_user_and_plugin() {
        let tmp = tempfile::tempdir().unwrap();
        let home = plugin_home(tmp.path(), "git@mp", &[("sync.md", "plugin copy")]);
        let cwd = tmp.path().join("project");
        write(&cwd.join(".claude/commands/sync.md"), "project copy");
        write(&home.join(".claude/commands/sync.md"), "user copy");

        let resolution = Resolver::new(&home, &cwd).resolve("sync");
        assert!(resolution.found);
        assert_eq!(resolution.source, Some(CommandSource::Project));
        assert_eq!(resolution.content.as_deref(), Some("project copy"));
        // Short-circuit: only the project location was probed.
        assert_eq!(resolution.locations_searched.len(), 1);
    }

    #[test]
    fn user_wins_over_plugin() {
        let tmp = tempfile::tempdir().unwrap();
        let home = plugin_home(tmp.path(), "git@mp", &[("sync.md", "plugin copy")]);
        let cwd = tmp.path().join("project");
        write(&home.join(".claude/commands/sync.md"), "user copy");

        let resolution = Resolver::new(&home, &cwd).resolve("sync");
        assert_eq!(resolution.source, Some(CommandSource::User));
    }

    #[test]
    fn plugin_command_resolves_with_provenance() {
        let tmp = tempfile::tempdir().unwrap();
        let home = plugin_home(
            tmp.path(),
            "git@mp",
            &[("commit.md", "---\ndescription: Commit helper\n---\nCommit it.")],
        );
        let cwd = tmp.path().join("project");

        let resolution = Resolver::new(&home, &cwd).resolve("commit");
        assert!(resolution.found);
        assert_eq!(
            resolution.source,
            Some(CommandSource::Plugin("git@mp".into()))
        );
        let parsed = resolution.parsed.unwrap();
        assert_eq!(parsed.description, "Commit helper");
        assert_eq!(parsed.body, "Commit it.");
    }

    #[test]
    fn colon_name_resolves_nested_plugin_command() {
        let tmp = tempfile::tempdir().unwrap();
        let home = plugin_home(tmp.path(), "jira@mp", &[("jira/my-issues.md", "issues")]);
        let cwd = tmp.path().join("project");

        let resolution = Resolver::new(&home, &cwd).resolve("jira:my-issues");
        assert!(resolution.found);
        assert_eq!(resolution.content.as_deref(), Some("issues"));
    }

    #[test]
    fn miss_lists_plugin_commands_as_suggestions() {
        let tmp = tempfile::tempdir().unwrap();
        let home = plugin_home(
            tmp.path(),
            "git@mp",
            &[("commit.md", ""), ("hooks/install.md", "")],
        );
        let cwd = tmp.path().join("project");

        let resolution = Resolver::new(&home, &cwd).resolve("no-such-command");
        assert!(!resolution.found);
        assert_eq!(resolution.locations_searched.len(), 3);

        let available = resolution.available_commands.unwrap();
        assert!(!available.is_empty());
        for listing in &available {
            assert_eq!(listing.source, CommandSource::Plugin("git@mp".into()));
            assert!(listing.name.starts_with("git:"));
        }
        let names: Vec<&str> = available.iter().map(|l| l.name.as_str()).collect();
        assert!(names.contains(&"git:commit"));
        assert!(names.contains(&"git:hooks:install"));
    }

    #[test]
    fn miss_with_nothing_installed_has_empty_suggestions() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        let cwd = tmp.path().join("project");
        fs::create_dir_all(&home).unwrap();

        let resolution = Resolver::new(&home, &cwd).resolve("anything");
        assert!(!resolution.found);
        assert_eq!(resolution.available_commands.unwrap().len(), 0);
        // Project and user locations are always recorded.
        assert_eq!(resolution.locations_searched.len(), 2);
    }

    #[test]
    fn disabled_plugin_not_searched() {
        let tmp = tempfile::tempdir().unwrap();
        let home = plugin_home(tmp.path(), "git@mp", &[("commit.md", "x")]);
        // Overwrite the settings to disable the plugin.
        write(
            &home.join(".claude/settings.json"),
            r#"{"enabledPlugins": {"git@mp": false}}"#,
        );
        let cwd = tmp.path().join("project");

        let resolution = Resolver::new(&home, &cwd).resolve("commit");
        assert!(!resolution.found);
    }

    #[test]
    fn referenced_scripts_are_resolved_from_home() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        let cwd = tmp.path().join("project");
        write(&home.join(".claude/scripts/deploy.sh"), "#!/bin/sh\necho hi");
        write(
            &cwd.join(".claude/commands/ship.md"),
            "Run ~/.claude/scripts/deploy.sh then also ~/.claude/scripts/missing.sh",
        );

        let resolution = Resolver::new(&home, &cwd).resolve("ship");
        let scripts = resolution.referenced_scripts.unwrap();
        assert_eq!(scripts.len(), 1);
        let script = scripts.get("~/.claude/scripts/deploy.sh").unwrap();
        assert_eq!(script.content, "#!/bin/sh\necho hi");
        assert_eq!(script.path, home.join(".claude/scripts/deploy.sh"));
    }

    #[test]
    fn referenced_skills_reported() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        let cwd = tmp.path().join("project");
        write(
            &cwd.join(".claude/commands/review.md"),
            "First run the /lint:fix skill, then /summarize.",
        );

        let resolution = Resolver::new(&home, &cwd).resolve("review");
        let skills = resolution.referenced_skills.unwrap();
        assert!(skills.contains("lint:fix"));
        assert!(skills.contains("summarize"));
    }

    #[test]
    fn list_available_spans_all_sources() {
        let tmp = tempfile::tempdir().unwrap();
        let home = plugin_home(tmp.path(), "git@mp", &[("commit.md", "")]);
        let cwd = tmp.path().join("project");
        write(&cwd.join(".claude/commands/local.md"), "");
        write(&home.join(".claude/commands/global.md"), "");

        let available = Resolver::new(&home, &cwd).list_available();
        let mut pairs: Vec<(String, String)> = available
            .iter()
            .map(|l| (l.name.clone(), l.source.to_string()))
            .collect();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![
                ("git:commit".to_string(), "plugin:git@mp".to_string()),
                ("global".to_string(), "user".to_string()),
                ("local".to_string(), "project".to_string()),
            ]
        );
    }
}
