//! Command-line interface.

pub mod generate;
pub mod map;
pub mod output;
pub mod remove;
pub mod sync;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::error::Result;

/// Warren - secrets scaffolding for multi-service monorepos.
#[derive(Parser)]
#[command(
    name = "warren",
    about = "Secrets scaffolding for multi-service monorepos",
    version,
    after_help = "Every service in its burrow. 🐇"
)]
pub struct Cli {
    /// Project root containing warren.json
    #[arg(long, global = true, default_value = ".", env = "WARREN_DIR")]
    pub dir: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Top-level commands.
#[derive(Subcommand)]
pub enum Command {
    /// Regenerate the framework file, reconcile the user file, and write the
    /// merged local file
    Generate,

    /// Reconcile the user secrets file with the current service list
    Sync,

    /// Remove a service's footprint from every secrets file
    Remove {
        /// Service name as it appears in warren.json (kebab-case)
        service: String,
    },

    /// Print the per-service variable manifest
    Map {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Execute a parsed command against the project in `dir`.
pub fn execute(command: Command, dir: PathBuf) -> Result<()> {
    match command {
        Command::Generate => generate::run(&dir),
        Command::Sync => sync::run(&dir),
        Command::Remove { service } => remove::run(&dir, &service),
        Command::Map { json } => map::run(&dir, json),
    }
}
