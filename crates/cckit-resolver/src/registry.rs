//! Plugin registry resolution.
//!
//! Which plugins participate in the search is decided by two inputs owned by
//! an external installer:
//!
//! 1. **Settings files** — up to four layered JSON files carrying an
//!    `enabledPlugins` map of `pluginId -> bool`.
//! 2. **Install manifest** — `~/.claude/plugins/installed_plugins.json`,
//!    mapping each plugin id to its installation records.
//!
//! The manifest's recorded install path may lag the cache on disk (an upgrade
//! moved the version directory, or a partial install left a stale pointer).
//! In that case the most-recently-modified sibling version directory is used
//! instead; a plugin with no usable directory at all is silently dropped from
//! the resolvable set.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use serde::Deserialize;

use crate::loader;

/// Project- and home-relative settings file carrying local overrides.
const SETTINGS_LOCAL: &str = ".claude/settings.local.json";

/// Project- and home-relative shared settings file.
const SETTINGS: &str = ".claude/settings.json";

/// Home-relative manifest written by the plugin installer.
const INSTALLED_MANIFEST: &str = ".claude/plugins/installed_plugins.json";

/// One settings file.  Only the `enabledPlugins` key is read; everything
/// else in the file belongs to other tools.  `serde_json`'s `preserve_order`
/// feature keeps the map in document order, which drives plugin precedence.
#[derive(Debug, Default, Deserialize)]
struct SettingsFile {
    #[serde(default, rename = "enabledPlugins")]
    enabled_plugins: serde_json::Map<String, serde_json::Value>,
}

/// The plugin install manifest.  Per-plugin entries are kept as raw values so
/// one malformed record cannot take down the whole manifest.
#[derive(Debug, Default, Deserialize)]
struct PluginManifest {
    #[serde(default)]
    plugins: serde_json::Map<String, serde_json::Value>,
}

/// One installation record inside the manifest.
#[derive(Debug, Deserialize)]
struct PluginInstall {
    #[serde(rename = "installPath")]
    install_path: Option<String>,
}

/// Read the enabled plugin ids from the layered settings files.
///
/// Locations are consulted in fixed order — project-local override, project,
/// user override, user — and an id is included once, at its first `true`
/// marking.  Missing or unparseable files count as empty.
pub fn enabled_plugins(home: &Path, cwd: &Path) -> Vec<String> {
    let settings_paths = [
        cwd.join(SETTINGS_LOCAL),
        cwd.join(SETTINGS),
        home.join(SETTINGS_LOCAL),
        home.join(SETTINGS),
    ];

    let mut enabled = Vec::new();
    for path in &settings_paths {
        let settings: SettingsFile = loader::load_json(path);
        for (plugin_id, flag) in &settings.enabled_plugins {
            if flag.as_bool() == Some(true) && !enabled.iter().any(|id| id == plugin_id) {
                enabled.push(plugin_id.clone());
            }
        }
    }

    tracing::debug!(count = enabled.len(), "enabled plugins collected");
    enabled
}

/// Map each installed plugin id to a usable install directory.
///
/// The FIRST installation record per id is taken (the installer keeps the
/// most recent one first).  A recorded path that no longer exists falls back
/// to [`alternative_version`]; ids with no usable directory are omitted.
pub fn installed_plugin_paths(home: &Path) -> HashMap<String, PathBuf> {
    let manifest: PluginManifest = loader::load_json(&home.join(INSTALLED_MANIFEST));

    let mut paths = HashMap::new();
    for (plugin_id, value) in &manifest.plugins {
        let Ok(installs) = serde_json::from_value::<Vec<PluginInstall>>(value.clone()) else {
            tracing::debug!(plugin = %plugin_id, "malformed installation list, skipping");
            continue;
        };
        let Some(install_path) = installs.first().and_then(|i| i.install_path.as_deref()) else {
            continue;
        };

        let recorded = PathBuf::from(install_path);
        if recorded.exists() {
            paths.insert(plugin_id.clone(), recorded);
        } else if let Some(alternative) = alternative_version(&recorded) {
            tracing::debug!(
                plugin = %plugin_id,
                recorded = %recorded.display(),
                fallback = %alternative.display(),
                "recorded install path missing, using sibling version"
            );
            paths.insert(plugin_id.clone(), alternative);
        } else {
            tracing::debug!(plugin = %plugin_id, recorded = %recorded.display(), "unresolvable install path");
        }
    }

    paths
}

/// Find an alternative version directory next to a stale install path.
///
/// The plugin cache keeps one directory per version; when the recorded
/// version is gone, the most-recently-modified non-hidden sibling directory
/// is the best available substitute.  Never invents a path: returns `None`
/// when the parent is missing or holds no candidate directories.
fn alternative_version(install_path: &Path) -> Option<PathBuf> {
    let parent = install_path.parent()?;
    if !parent.exists() {
        return None;
    }

    let entries = fs::read_dir(parent).ok()?;
    let mut best: Option<(SystemTime, PathBuf)> = None;
    for entry in entries.flatten() {
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with('.') {
            continue;
        }
        let modified = entry
            .metadata()
            .and_then(|m| m.modified())
            .unwrap_or(SystemTime::UNIX_EPOCH);
        if best.as_ref().is_none_or(|(t, _)| modified > *t) {
            best = Some((modified, path));
        }
    }

    best.map(|(_, path)| path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;
    use std::time::Duration;

    fn write(path: &Path, content: &str) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn enabled_plugins_empty_when_no_settings() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(enabled_plugins(tmp.path(), tmp.path()).is_empty());
    }

    #[test]
    fn enabled_plugins_layered_first_seen_once() {
        let tmp = tempfile::tempdir().unwrap();
        let cwd = tmp.path().join("project");
        let home = tmp.path().join("home");
        write(
            &cwd.join(SETTINGS_LOCAL),
            r#"{"enabledPlugins": {"a@m": true, "b@m": false}}"#,
        );
        write(
            &home.join(SETTINGS),
            r#"{"enabledPlugins": {"a@m": true, "b@m": true, "c@m": true}}"#,
        );

        let enabled = enabled_plugins(&home, &cwd);
        assert_eq!(enabled, vec!["a@m", "b@m", "c@m"]);
    }

    #[test]
    fn enabled_plugins_ignores_malformed_settings() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        write(&home.join(SETTINGS), "{broken");
        write(
            &home.join(SETTINGS_LOCAL),
            r#"{"enabledPlugins": {"a@m": true}}"#,
        );

        assert_eq!(enabled_plugins(&home, tmp.path()), vec!["a@m"]);
    }

    #[test]
    fn installed_paths_uses_existing_recorded_path() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        let install = tmp.path().join("cache/mp/git/1.0.0");
        fs::create_dir_all(&install).unwrap();
        write(
            &home.join(INSTALLED_MANIFEST),
            &format!(
                r#"{{"plugins": {{"git@mp": [{{"installPath": "{}", "scope": "user"}}]}}}}"#,
                install.display()
            ),
        );

        let paths = installed_plugin_paths(&home);
        assert_eq!(paths.get("git@mp"), Some(&install));
    }

    #[test]
    fn installed_paths_falls_back_to_latest_sibling() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        let plugin_dir = tmp.path().join("cache/mp/git");
        let old = plugin_dir.join("1.0.0");
        let new = plugin_dir.join("1.1.0");
        fs::create_dir_all(&old).unwrap();
        thread::sleep(Duration::from_millis(20));
        fs::create_dir_all(&new).unwrap();

        let stale = plugin_dir.join("2.0.0");
        write(
            &home.join(INSTALLED_MANIFEST),
            &format!(
                r#"{{"plugins": {{"git@mp": [{{"installPath": "{}"}}]}}}}"#,
                stale.display()
            ),
        );

        let paths = installed_plugin_paths(&home);
        assert_eq!(paths.get("git@mp"), Some(&new));
    }

    #[test]
    fn installed_paths_omits_unresolvable_plugin() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        write(
            &home.join(INSTALLED_MANIFEST),
            r#"{"plugins": {"gone@mp": [{"installPath": "/nonexistent/cache/gone/1.0.0"}]}}"#,
        );

        assert!(installed_plugin_paths(&home).is_empty());
    }

    #[test]
    fn installed_paths_skips_malformed_entry_keeps_rest() {
        let tmp = tempfile::tempdir().unwrap();
        let home = tmp.path().join("home");
        let install = tmp.path().join("cache/mp/ok/1.0.0");
        fs::create_dir_all(&install).unwrap();
        write(
            &home.join(INSTALLED_MANIFEST),
            &format!(
                r#"{{"plugins": {{"bad@mp": "not-a-list", "ok@mp": [{{"installPath": "{}"}}]}}}}"#,
                install.display()
            ),
        );

        let paths = installed_plugin_paths(&home);
        assert_eq!(paths.len(), 1);
        assert_eq!(paths.get("ok@mp"), Some(&install));
    }

    #[test]
    fn alternative_version_ignores_hidden_dirs() {
        let tmp = tempfile::tempdir().unwrap();
        let plugin_dir = tmp.path().join("git");
        fs::create_dir_all(plugin_dir.join("1.0.0")).unwrap();
        thread::sleep(Duration::from_millis(20));
        fs::create_dir_all(plugin_dir.join(".tmp-download")).unwrap();

        let alt = alternative_version(&plugin_dir.join("9.9.9")).unwrap();
        assert_eq!(alt, plugin_dir.join("1.0.0"));
    }

    #[test]
    fn alternative_version_missing_parent() {
        assert!(alternative_version(Path::new("/nonexistent/git/1.0.0")).is_none());
    }
}
