//! Configuration loading for the lexicon.
//!
//! Layered config: defaults -> config file -> env vars -> CLI flags.
//! The default config file lives at ~/.config/lexicon/config.toml.

use config::{Config, Environment, File, Map};
use directories::{BaseDirs, ProjectDirs};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::LexiconError;

/// Tuning for absorption and decay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexiconConfig {
    /// Multiplier applied to every word weight on each decay pass.
    /// Range: (0.0, 1.0], closer to 1.0 = slower forgetting.
    #[serde(default = "default_decay_rate")]
    pub decay_rate: f64,

    /// Words shorter than this (in characters) are not absorbed as words.
    /// Trigram extraction ignores this filter.
    #[serde(default = "default_min_word_length")]
    pub min_word_length: usize,

    /// Boost used when a caller passes a non-finite boost.
    #[serde(default = "default_boost")]
    pub default_boost: f64,

    /// Seconds between passes of the background decay job.
    #[serde(default = "default_decay_interval")]
    pub decay_interval_secs: u64,
}

fn default_decay_rate() -> f64 {
    0.99
}

fn default_min_word_length() -> usize {
    3
}

fn default_boost() -> f64 {
    1.0
}

fn default_decay_interval() -> u64 {
    60
}

impl Default for LexiconConfig {
    fn default() -> Self {
        Self {
            decay_rate: default_decay_rate(),
            min_word_length: default_min_word_length(),
            default_boost: default_boost(),
            decay_interval_secs: default_decay_interval(),
        }
    }
}

impl LexiconConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if !(self.decay_rate > 0.0 && self.decay_rate <= 1.0) {
            return Err(format!(
                "decay_rate must be in (0.0, 1.0], got {}",
                self.decay_rate
            ));
        }
        if self.min_word_length == 0 {
            return Err("min_word_length must be >= 1".to_string());
        }
        if !self.default_boost.is_finite() || self.default_boost <= 0.0 {
            return Err(format!(
                "default_boost must be finite and > 0, got {}",
                self.default_boost
            ));
        }
        if self.decay_interval_secs == 0 {
            return Err("decay_interval_secs must be > 0".to_string());
        }
        Ok(())
    }
}

/// Durable store settings (opt-in, disabled by default).
///
/// When disabled or when no path is set the lexicon runs fully in memory.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PersistenceSettings {
    /// MUST be explicitly set to true to enable (default: false).
    #[serde(default)]
    pub enabled: bool,

    /// Path to the RocksDB directory holding absorbed words and trigrams.
    #[serde(default)]
    pub db_path: Option<String>,
}

impl PersistenceSettings {
    /// Path to open, if persistence is enabled and a path is configured.
    pub fn active_path(&self) -> Option<PathBuf> {
        if !self.enabled {
            return None;
        }
        self.db_path.as_deref().map(expand_home)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Absorption and decay tuning
    #[serde(default)]
    pub lexicon: LexiconConfig,

    /// Durable store settings
    #[serde(default)]
    pub persistence: PersistenceSettings,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Default location for the durable store when one is enabled without a path.
pub fn default_db_path() -> String {
    ProjectDirs::from("", "", "lexicon")
        .map(|p| p.data_local_dir().join("db"))
        .unwrap_or_else(|| PathBuf::from("./data"))
        .to_string_lossy()
        .to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            lexicon: LexiconConfig::default(),
            persistence: PersistenceSettings::default(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings with layered precedence:
    /// 1. Built-in defaults
    /// 2. Config file (~/.config/lexicon/config.toml)
    /// 3. CLI-specified config file (optional)
    /// 4. Environment variables (LEXICON_*, nested keys joined with `__`)
    ///
    /// CLI flags should be applied by the caller after this returns.
    pub fn load(cli_config_path: Option<&str>) -> Result<Self, LexiconError> {
        let config_dir = ProjectDirs::from("", "", "lexicon")
            .map(|p| p.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."));
        Self::load_from(&config_dir, cli_config_path, None)
    }

    /// Same layering as [`Settings::load`], reading `config.toml` from
    /// `config_dir`. When `env` is given it replaces the process environment.
    pub fn load_from(
        config_dir: &Path,
        cli_config_path: Option<&str>,
        env: Option<Map<String, String>>,
    ) -> Result<Self, LexiconError> {
        let default_config_path = config_dir.join("config");

        let mut builder = Config::builder()
            .set_default("lexicon.decay_rate", default_decay_rate())
            .map_err(|e| LexiconError::Config(e.to_string()))?
            .set_default("lexicon.min_word_length", default_min_word_length() as i64)
            .map_err(|e| LexiconError::Config(e.to_string()))?
            .set_default("lexicon.default_boost", default_boost())
            .map_err(|e| LexiconError::Config(e.to_string()))?
            .set_default("lexicon.decay_interval_secs", default_decay_interval() as i64)
            .map_err(|e| LexiconError::Config(e.to_string()))?
            .set_default("persistence.enabled", false)
            .map_err(|e| LexiconError::Config(e.to_string()))?
            .set_default("log_level", default_log_level())
            .map_err(|e| LexiconError::Config(e.to_string()))?
            .add_source(File::with_name(&default_config_path.to_string_lossy()).required(false));

        if let Some(path) = cli_config_path {
            builder = builder.add_source(File::with_name(path).required(true));
        }

        // Format: LEXICON_LOG_LEVEL, LEXICON_LEXICON__DECAY_RATE, LEXICON_PERSISTENCE__DB_PATH
        builder = builder.add_source(
            Environment::with_prefix("LEXICON")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true)
                .source(env),
        );

        let config = builder
            .build()
            .map_err(|e| LexiconError::Config(e.to_string()))?;

        let settings: Settings = config
            .try_deserialize()
            .map_err(|e| LexiconError::Config(e.to_string()))?;

        settings.lexicon.validate().map_err(LexiconError::Config)?;
        Ok(settings)
    }
}

/// Expand a leading `~/` to the user's home directory.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(dirs) = BaseDirs::new() {
            return dirs.home_dir().join(rest);
        }
    }
    PathBuf::from(path)
}
