//! `cc-lookup` — resolve a command name across the layered search path.
//!
//! With a name, prints the full resolution result as pretty-printed JSON.
//! With no arguments or `--list`, prints every discoverable command.

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use cckit_resolver::{CommandListing, Resolver};

/// Look up a command definition across project, user, and plugin locations.
#[derive(Parser)]
#[command(name = "cc-lookup", version, about)]
struct Cli {
    /// Command name to resolve (e.g. `jira:my-issues`).
    name: Option<String>,

    /// List every discoverable command instead of resolving one.
    #[arg(long)]
    list: bool,
}

/// Output shape for list mode.
#[derive(Serialize)]
struct ListOutput {
    mode: &'static str,
    available_commands: Vec<CommandListing>,
}

fn main() -> Result<()> {
    cckit_cli::init_tracing("warn");
    let cli = Cli::parse();

    let home = dirs::home_dir().context("could not determine home directory")?;
    let cwd = std::env::current_dir().context("could not determine working directory")?;
    let resolver = Resolver::new(home, cwd);

    match cli.name {
        Some(name) if !cli.list => {
            let resolution = resolver.resolve(&name);
            println!("{}", serde_json::to_string_pretty(&resolution)?);
        }
        _ => {
            let listing = ListOutput {
                mode: "list",
                available_commands: resolver.list_available(),
            };
            println!("{}", serde_json::to_string_pretty(&listing)?);
        }
    }

    Ok(())
}
