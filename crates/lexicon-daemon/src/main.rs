//! Lexicon CLI
//!
//! Grows a vocabulary and phrase-pattern lexicon from conversation.
//!
//! # Usage
//!
//! ```bash
//! lexicon demo [--corpus PATH]
//! lexicon absorb [TEXT...] [--source SOURCE] [--boost BOOST] [--db-path PATH]
//! lexicon inspect [--db-path PATH] [-n LIMIT]
//! ```
//!
//! # Configuration
//!
//! Configuration is loaded in order (later sources override earlier):
//! 1. Built-in defaults
//! 2. Config file (~/.config/lexicon/config.toml)
//! 3. Environment variables (LEXICON_*)
//! 4. CLI flags

use anyhow::Result;
use clap::Parser;

use lexicon_daemon::{
    init_logging, inspect_path, load_settings, run_absorb, run_demo, run_inspect, Cli, Commands,
};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let db_path_override = match &cli.command {
        Commands::Absorb { db_path, .. } => db_path.as_deref(),
        _ => None,
    };
    let settings = load_settings(
        cli.config.as_deref(),
        cli.log_level.as_deref(),
        db_path_override,
    )?;
    init_logging(&settings.log_level)?;

    match cli.command {
        Commands::Demo { corpus } => {
            run_demo(&settings, corpus.as_deref()).await?;
        }
        Commands::Absorb {
            text,
            source,
            boost,
            corpus,
            ..
        } => {
            run_absorb(&settings, text, &source, boost, corpus.as_deref()).await?;
        }
        Commands::Inspect { db_path, limit } => {
            run_inspect(&inspect_path(&settings, db_path.as_deref()), limit)?;
        }
    }

    Ok(())
}
