//! `cc-migrate` — convert Claude Code markdown commands to Gemini CLI TOML.
//!
//! Reads from `~/.claude` and writes under `~/.gemini` (global scope) or
//! `./.gemini` (project scope).  The `delete` strategy removes previously
//! generated files and exits without migrating.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};

use cckit_migrate::{Migrator, Scope, Selection, Strategy};

/// Migrate Claude Code commands to the Gemini CLI command format.
#[derive(Parser)]
#[command(name = "cc-migrate", version, about)]
struct Cli {
    /// What to migrate.
    #[arg(value_enum, default_value_t = SelectionArg::All)]
    target: SelectionArg,

    /// Migration scope.
    #[arg(long, value_enum, default_value_t = ScopeArg::Global)]
    scope: ScopeArg,

    /// Migration strategy.
    #[arg(long, value_enum, default_value_t = StrategyArg::Auto)]
    strategy: StrategyArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum SelectionArg {
    All,
    Commands,
    Plugins,
}

#[derive(Clone, Copy, ValueEnum)]
enum ScopeArg {
    Global,
    Project,
}

#[derive(Clone, Copy, ValueEnum)]
enum StrategyArg {
    Force,
    Override,
    Ignore,
    Auto,
    Delete,
}

impl From<SelectionArg> for Selection {
    fn from(arg: SelectionArg) -> Self {
        match arg {
            SelectionArg::All => Self::All,
            SelectionArg::Commands => Self::Commands,
            SelectionArg::Plugins => Self::Plugins,
        }
    }
}

impl From<ScopeArg> for Scope {
    fn from(arg: ScopeArg) -> Self {
        match arg {
            ScopeArg::Global => Self::Global,
            ScopeArg::Project => Self::Project,
        }
    }
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Force => Self::Force,
            StrategyArg::Override => Self::Override,
            StrategyArg::Ignore => Self::Ignore,
            StrategyArg::Auto => Self::Auto,
            StrategyArg::Delete => Self::Delete,
        }
    }
}

fn main() -> Result<()> {
    cckit_cli::init_tracing("warn");
    let cli = Cli::parse();

    let selection = Selection::from(cli.target);
    let scope = Scope::from(cli.scope);
    let strategy = Strategy::from(cli.strategy);

    let home = dirs::home_dir().context("could not determine home directory")?;
    let source_root = home.join(".claude");
    let target_root = match scope {
        Scope::Global => home.join(".gemini"),
        Scope::Project => std::env::current_dir()
            .context("could not determine working directory")?
            .join(".gemini"),
    };

    let migrator = Migrator::new(&source_root, &target_root, scope, strategy);

    if strategy == Strategy::Delete {
        println!("Target scope: {} ({})", scope, target_root.display());
        println!("Strategy: delete (Removing previously migrated files)");
        migrator.run(selection)?;
        return Ok(());
    }

    if !source_root.exists() {
        println!(
            "Source {} not found. Nothing to migrate.",
            source_root.display()
        );
        return Ok(());
    }

    println!("Target scope: {} ({})", scope, target_root.display());
    println!("Strategy: {strategy}");
    println!("Migrating: {selection}");

    migrator.run(selection)?;
    Ok(())
}
