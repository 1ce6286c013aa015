//! The migration runner.
//!
//! Walks the source tree (`~/.claude`) and generates one TOML command file
//! per markdown command, grouped by category: user commands keep their
//! subdirectory (top-level files land in `user_misc`), plugin commands are
//! grouped under the plugin's name.  Progress is reported as plain lines on
//! stdout; the only per-file failure is an unreadable source, which is
//! printed and skipped.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::Result;
use crate::frontmatter::description_of;
use crate::record::{IMPORT_TAG, toml_record};
use crate::types::{Scope, Selection, Strategy};

/// Output files the cleanup pass must never delete, even when tagged.
const PROTECTED_FILES: [&str; 1] = ["cc-command.toml"];

/// Totals for one migration run.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MigrationSummary {
    /// Output files written.
    pub migrated: usize,

    /// Previously generated files removed by cleanup.
    pub removed: usize,
}

/// Converts a tree of markdown commands into TOML command files.
pub struct Migrator {
    /// Source root, conventionally `~/.claude`.
    source_root: PathBuf,

    /// Target commands directory, `<target-root>/commands`.
    target_commands: PathBuf,

    scope: Scope,
    strategy: Strategy,
}

impl Migrator {
    /// Create a migrator writing under `target_root/commands`.
    pub fn new(
        source_root: impl Into<PathBuf>,
        target_root: impl Into<PathBuf>,
        scope: Scope,
        strategy: Strategy,
    ) -> Self {
        Self {
            source_root: source_root.into(),
            target_commands: target_root.into().join("commands"),
            scope,
            strategy,
        }
    }

    /// Run the migration.
    ///
    /// The `Delete` strategy runs cleanup and writes nothing; `Force` runs
    /// cleanup first and then regenerates everything.
    pub fn run(&self, selection: Selection) -> Result<MigrationSummary> {
        let mut summary = MigrationSummary::default();

        if self.strategy == Strategy::Delete {
            summary.removed = self.cleanup()?;
            return Ok(summary);
        }

        if self.strategy == Strategy::Force {
            summary.removed = self.cleanup()?;
        }

        if selection.includes_commands() {
            summary.migrated += self.migrate_user_commands()?;
        }
        if selection.includes_plugins() {
            summary.migrated += self.migrate_plugin_commands()?;
        }

        Ok(summary)
    }

    /// Remove previously generated files from the target tree.
    ///
    /// Only `.toml` files containing the tag marker are deleted; protected
    /// files and hand-authored files are left untouched.  Returns the number
    /// of files removed.
    pub fn cleanup(&self) -> Result<usize> {
        println!(
            "Phase 0: Cleaning up previously imported files in {}...",
            self.target_commands.display()
        );
        if !self.target_commands.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in WalkDir::new(&self.target_commands)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("toml") {
                continue;
            }
            let file_name = entry.file_name().to_string_lossy();
            if PROTECTED_FILES.contains(&file_name.as_ref()) {
                continue;
            }

            match fs::read_to_string(path) {
                Ok(text) if text.contains(IMPORT_TAG) => {
                    fs::remove_file(path)?;
                    removed += 1;
                }
                Ok(_) => {}
                Err(err) => println!("Error checking {}: {err}", path.display()),
            }
        }

        println!("Removed {removed} previously imported files.");
        Ok(removed)
    }

    /// Migrate `<source-root>/commands`, preserving subdirectories as
    /// categories; top-level files go to `user_misc`.
    fn migrate_user_commands(&self) -> Result<usize> {
        let root = self.source_root.join("commands");
        if !root.exists() {
            return Ok(0);
        }

        let mut migrated = 0;
        for entry in WalkDir::new(&root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }

            let category = match path.parent().and_then(|p| p.strip_prefix(&root).ok()) {
                Some(rel) if !rel.as_os_str().is_empty() => rel.to_path_buf(),
                _ => PathBuf::from("user_misc"),
            };
            if self.migrate_file(path, &category)? {
                migrated += 1;
            }
        }
        Ok(migrated)
    }

    /// Migrate the plugin cache: only `.md` files sitting directly inside a
    /// directory named `commands`, grouped under the plugin's name.
    fn migrate_plugin_commands(&self) -> Result<usize> {
        let cache_root = self.source_root.join("plugins/cache");
        if !cache_root.exists() {
            return Ok(0);
        }

        let mut migrated = 0;
        for entry in WalkDir::new(&cache_root).into_iter().filter_map(|e| e.ok()) {
            if !entry.file_type().is_file() {
                continue;
            }
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("md") {
                continue;
            }
            let Some(commands_dir) = path.parent() else {
                continue;
            };
            if commands_dir.file_name().and_then(|n| n.to_str()) != Some("commands") {
                continue;
            }

            let plugin = plugin_name_from_path(commands_dir);
            if self.migrate_file(path, Path::new(&plugin))? {
                migrated += 1;
            }
        }
        Ok(migrated)
    }

    /// Migrate a single source file into `target_commands/<category>/`.
    ///
    /// Returns whether an output file was written.
    fn migrate_file(&self, src: &Path, category: &Path) -> Result<bool> {
        let content = match fs::read_to_string(src) {
            Ok(content) => content,
            Err(err) => {
                println!("Skipping {}: {err}", src.display());
                return Ok(false);
            }
        };

        let target_dir = self.target_commands.join(category);
        let Some(file_name) = src.file_name() else {
            return Ok(false);
        };
        let target_path = target_dir.join(Path::new(file_name).with_extension("toml"));

        if target_path.exists() && self.strategy.skips_existing() {
            tracing::debug!(target = %target_path.display(), "output exists, skipping");
            return Ok(false);
        }

        let description = description_of(&content);
        let record = toml_record(&content, &description, src, self.scope);

        fs::create_dir_all(&target_dir)?;
        fs::write(&target_path, record)?;
        println!(
            "Migrated: {}/{}",
            category.display(),
            target_path
                .file_name()
                .map(|n| n.to_string_lossy())
                .unwrap_or_default()
        );
        Ok(true)
    }
}

/// Derive the plugin name from a cache-layout commands directory.
///
/// The cache convention is `.../cache/<marketplace>/<plugin>/<version>/...`,
/// so the plugin name is the segment two levels below `cache`.  When the
/// layout doesn't hold, fall back to the commands directory's parent name.
fn plugin_name_from_path(commands_dir: &Path) -> String {
    let parts: Vec<String> = commands_dir
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();

    if let Some(idx) = parts.iter().position(|p| p == "cache")
        && let Some(name) = parts.get(idx + 2)
    {
        return name.clone();
    }

    commands_dir
        .parent()
        .and_then(|p| p.file_name())
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}
