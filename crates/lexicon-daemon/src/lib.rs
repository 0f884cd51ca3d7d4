//! Lexicon CLI library exports.
//!
//! # Modules
//!
//! - `cli`: Command-line argument parsing with clap
//! - `commands`: Command implementations (demo, absorb, inspect)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands};
pub use commands::{
    build_lexicon, init_logging, inspect_path, load_corpus, load_settings, run_absorb, run_demo,
    run_inspect,
};
