//! CLI argument parsing for the lexicon binary.
//!
//! CLI flags override every other config source.

use clap::{Parser, Subcommand};
use lexicon_types::SOURCE_USER;

/// Dynamic lexicon growth engine
///
/// Absorbs vocabulary and phrase patterns from conversation into a
/// co-occurrence field.
#[derive(Parser, Debug)]
#[command(name = "lexicon")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to config file (overrides default ~/.config/lexicon/config.toml)
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Set log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Absorb four sample utterances and show how the lexicon grew
    Demo {
        /// Corpus file for the tokenizer and field (default: built-in corpus)
        #[arg(long)]
        corpus: Option<String>,
    },

    /// Absorb text from the arguments, or line by line from stdin
    Absorb {
        /// Text to absorb; reads stdin when empty
        text: Vec<String>,

        /// Origin tag recorded with each absorption
        #[arg(short, long, default_value = SOURCE_USER)]
        source: String,

        /// Initial weight for unseen words
        #[arg(short, long, default_value_t = 1.0)]
        boost: f64,

        /// Corpus file for the tokenizer and field (default: built-in corpus)
        #[arg(long)]
        corpus: Option<String>,

        /// Persist into this store (enables persistence)
        #[arg(long)]
        db_path: Option<String>,
    },

    /// Print the persisted state of a store
    Inspect {
        /// Store path (default from config)
        #[arg(long)]
        db_path: Option<String>,

        /// Maximum words to list
        #[arg(short = 'n', long, default_value = "20")]
        limit: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_demo() {
        let cli = Cli::parse_from(["lexicon", "demo"]);
        assert!(matches!(cli.command, Commands::Demo { corpus: None }));
    }

    #[test]
    fn test_cli_demo_with_corpus() {
        let cli = Cli::parse_from(["lexicon", "demo", "--corpus", "text.txt"]);
        match cli.command {
            Commands::Demo { corpus } => assert_eq!(corpus, Some("text.txt".to_string())),
            _ => panic!("Expected Demo command"),
        }
    }

    #[test]
    fn test_cli_absorb_defaults() {
        let cli = Cli::parse_from(["lexicon", "absorb", "hello", "there", "friend"]);
        match cli.command {
            Commands::Absorb {
                text,
                source,
                boost,
                db_path,
                ..
            } => {
                assert_eq!(text, vec!["hello", "there", "friend"]);
                assert_eq!(source, SOURCE_USER);
                assert_eq!(boost, 1.0);
                assert!(db_path.is_none());
            }
            _ => panic!("Expected Absorb command"),
        }
    }

    #[test]
    fn test_cli_absorb_overrides() {
        let cli = Cli::parse_from([
            "lexicon",
            "absorb",
            "-s",
            "self",
            "-b",
            "1.5",
            "--db-path",
            "/tmp/lex",
            "echo",
        ]);
        match cli.command {
            Commands::Absorb {
                text,
                source,
                boost,
                db_path,
                ..
            } => {
                assert_eq!(text, vec!["echo"]);
                assert_eq!(source, "self");
                assert_eq!(boost, 1.5);
                assert_eq!(db_path, Some("/tmp/lex".to_string()));
            }
            _ => panic!("Expected Absorb command"),
        }
    }

    #[test]
    fn test_cli_absorb_without_text_reads_stdin() {
        let cli = Cli::parse_from(["lexicon", "absorb"]);
        match cli.command {
            Commands::Absorb { text, .. } => assert!(text.is_empty()),
            _ => panic!("Expected Absorb command"),
        }
    }

    #[test]
    fn test_cli_inspect() {
        let cli = Cli::parse_from(["lexicon", "inspect", "--db-path", "/custom/db", "-n", "5"]);
        match cli.command {
            Commands::Inspect { db_path, limit } => {
                assert_eq!(db_path, Some("/custom/db".to_string()));
                assert_eq!(limit, 5);
            }
            _ => panic!("Expected Inspect command"),
        }
    }

    #[test]
    fn test_cli_global_flags() {
        let cli = Cli::parse_from([
            "lexicon",
            "--config",
            "/path/to/config.toml",
            "--log-level",
            "debug",
            "demo",
        ]);
        assert_eq!(cli.config, Some("/path/to/config.toml".to_string()));
        assert_eq!(cli.log_level, Some("debug".to_string()));
    }
}
