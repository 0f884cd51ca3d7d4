//! Command implementations for the lexicon binary.
//!
//! Handles:
//! - demo: absorb sample utterances, print stats, run one decay pass
//! - absorb: absorb text from arguments or stdin, persisting when configured
//! - inspect: print what a store holds

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use lexicon_core::{spawn_decay_job, CharTokenizer, CooccurField, SharedLexicon};
use lexicon_storage::Storage;
use lexicon_types::config::{default_db_path, expand_home};
use lexicon_types::{AbsorptionRecord, Settings, SOURCE_USER};

/// Corpus used when no `--corpus` file is given.
pub const DEFAULT_CORPUS: &str = "\
the haze drifts through the field and the field remembers.
the quick brown fox jumps over the lazy dog.
words echo, patterns return, meaning grows from resonance.
what is spoken once may fade; what is spoken again stays.
";

/// Utterances absorbed by the demo.
pub const DEMO_INPUTS: [&str; 4] = [
    "I love the way haze speaks with resonance",
    "Tell me about quantum entanglement and consciousness",
    "The fractals of meaning emerge from chaos",
    "What is the nature of emergent intelligence?",
];

/// Load settings and apply CLI overrides (highest precedence).
pub fn load_settings(
    config_path: Option<&str>,
    log_level_override: Option<&str>,
    db_path_override: Option<&str>,
) -> Result<Settings> {
    let settings = Settings::load(config_path).context("Failed to load configuration")?;
    Ok(apply_overrides(settings, log_level_override, db_path_override))
}

/// Apply CLI flags on top of loaded settings. `--db-path` enables persistence.
pub fn apply_overrides(
    mut settings: Settings,
    log_level_override: Option<&str>,
    db_path_override: Option<&str>,
) -> Settings {
    if let Some(log_level) = log_level_override {
        settings.log_level = log_level.to_string();
    }
    if let Some(db_path) = db_path_override {
        settings.persistence.enabled = true;
        settings.persistence.db_path = Some(db_path.to_string());
    }
    settings
}

/// Install the global tracing subscriber. Logs go to stderr.
pub fn init_logging(log_level: &str) -> Result<()> {
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set tracing subscriber")?;
    Ok(())
}

/// Read the corpus file, or fall back to [`DEFAULT_CORPUS`].
pub fn load_corpus(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => fs::read_to_string(expand_home(path))
            .with_context(|| format!("Failed to read corpus {}", path)),
        None => Ok(DEFAULT_CORPUS.to_string()),
    }
}

/// Build a tokenizer and field from `corpus` and wrap a fresh lexicon.
pub fn build_lexicon(settings: &Settings, corpus: &str) -> Result<SharedLexicon> {
    let tokenizer = Arc::new(CharTokenizer::from_text(corpus));
    let field = Arc::new(CooccurField::from_text(corpus, tokenizer.as_ref()));
    info!(
        corpus_chars = corpus.chars().count(),
        pairs = field.total_pair_count(),
        "Field built from corpus"
    );
    let shared = SharedLexicon::from_settings(tokenizer, field, settings)
        .context("Failed to create lexicon")?;
    Ok(shared)
}

fn print_record(text: &str, record: &AbsorptionRecord) {
    let preview: Vec<&str> = record.words.iter().take(5).map(String::as_str).collect();
    let more = if record.words.len() > 5 { "..." } else { "" };
    println!("\n>>> {}: \"{}\"", record.source, text);
    println!("    New words: {:?}{}", preview, more);
    println!("    New trigrams: {}", record.trigrams.len());
}

/// Run the growth demo.
pub async fn run_demo(settings: &Settings, corpus_path: Option<&str>) -> Result<()> {
    let corpus = load_corpus(corpus_path)?;
    let shared = build_lexicon(settings, &corpus)?;

    println!("{}", "=".repeat(60));
    println!("  LEXICON: dynamic growth demo");
    println!("{}", "=".repeat(60));

    let records = shared
        .scoped(|lex| async move {
            let mut records = Vec::with_capacity(DEMO_INPUTS.len());
            for text in DEMO_INPUTS {
                records.push((text, lex.absorb(text, SOURCE_USER, 1.0).await?));
            }
            Ok(records)
        })
        .await?;

    for (text, record) in &records {
        print_record(text, record);
    }

    println!();
    println!("{}", "-".repeat(60));
    println!("Lexicon stats: {}", shared.stats().await);
    println!("Resonant words: {:?}", shared.get_resonant_words(10).await);

    println!();
    println!("{}", "-".repeat(60));
    println!("Applying memory decay...");
    println!("Decayed patterns: {}", shared.decay().await);

    let metrics = shared.metrics().snapshot();
    println!(
        "Injections: {} applied, {} skipped",
        metrics.injections_applied, metrics.injections_skipped
    );
    Ok(())
}

/// Absorb the given text, or stdin line by line when `text` is empty.
///
/// In stdin mode the decay job runs in the background until EOF or Ctrl+C.
pub async fn run_absorb(
    settings: &Settings,
    text: Vec<String>,
    source: &str,
    boost: f64,
    corpus_path: Option<&str>,
) -> Result<()> {
    let corpus = load_corpus(corpus_path)?;
    let shared = Arc::new(build_lexicon(settings, &corpus)?);

    if !text.is_empty() {
        let text = text.join(" ");
        let record = shared
            .scoped(|lex| {
                let text = text.as_str();
                async move { lex.absorb(text, source, boost).await }
            })
            .await?;
        print_record(&text, &record);
        println!("\n{}", shared.stats().await);
        return Ok(());
    }

    let period = Duration::from_secs(settings.lexicon.decay_interval_secs);
    let stdin = BufReader::new(tokio::io::stdin());
    absorb_lines(Arc::clone(&shared), stdin, source, boost, period).await?;
    println!("\n{}", shared.stats().await);
    Ok(())
}

/// Attach, absorb every non-blank line of `reader`, then close.
///
/// The decay job runs only while the store is attached and is joined
/// before closing. Returns the number of decay passes.
pub async fn absorb_lines<R>(
    shared: Arc<SharedLexicon>,
    reader: R,
    source: &str,
    boost: f64,
    period: Duration,
) -> Result<u64>
where
    R: AsyncBufRead + Unpin,
{
    shared.attach().await?;

    let cancel = CancellationToken::new();
    let decay = spawn_decay_job(Arc::clone(&shared), period, cancel.clone());

    let result = absorb_until_eof(&shared, reader, source, boost).await;

    cancel.cancel();
    let joined = decay.await;
    let closed = shared.close().await;

    let passes = joined.context("Decay job panicked")?;
    info!(passes, "Decay job stopped");
    result?;
    closed?;
    Ok(passes)
}

async fn absorb_until_eof<R>(
    shared: &SharedLexicon,
    reader: R,
    source: &str,
    boost: f64,
) -> Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, stopping");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line.context("Failed to read input")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match shared.absorb(&line, source, boost).await {
                    Ok(record) => print_record(&line, &record),
                    // Already applied in memory; keep reading
                    Err(e) => warn!(error = %e, "Absorption not persisted"),
                }
            }
        }
    }
    Ok(())
}

/// Store path for `inspect`: override, then config, then the default.
pub fn inspect_path(settings: &Settings, db_path_override: Option<&str>) -> PathBuf {
    let path = db_path_override
        .map(str::to_string)
        .or_else(|| settings.persistence.db_path.clone())
        .unwrap_or_else(default_db_path);
    expand_home(&path)
}

/// Print persisted words (heaviest first) and trigram counts.
pub fn run_inspect(path: &Path, limit: usize) -> Result<()> {
    if !path.exists() {
        anyhow::bail!("No store at {:?}", path);
    }
    let storage = Storage::open(path).context("Failed to open storage")?;

    let stats = storage.get_stats()?;
    println!("Store: {:?}", path);
    println!("  Words:    {}", stats.word_count);
    println!("  Trigrams: {}", stats.trigram_count);
    println!("  Disk:     {} bytes", stats.disk_usage_bytes);

    let mut words = storage.list_words()?;
    words.sort_by(|a, b| b.weight.total_cmp(&a.weight).then(a.word.cmp(&b.word)));
    println!();
    for row in words.iter().take(limit) {
        println!("  {:<20} {:.3}  ({})", row.word, row.weight, row.source);
    }
    Ok(())
}
