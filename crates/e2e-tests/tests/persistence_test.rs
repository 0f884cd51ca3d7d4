//! Persistence E2E tests.
//!
//! Absorb through the wrapped lexicon with RocksDB enabled, close it, then
//! open the store directly and check what landed.

use chrono::Utc;
use pretty_assertions::assert_eq;

use e2e_tests::TestHarness;
use lexicon_core::LifecycleState;
use lexicon_types::Trigram;

#[tokio::test]
async fn test_absorb_close_reopen_shows_rows() {
    let harness = TestHarness::new();
    let lexicon = harness.lexicon();
    let before = Utc::now();

    lexicon
        .scoped(|lex| async move {
            lex.absorb("echo echo chamber", "user", 1.0).await?;
            lex.absorb("the haze remembers", "self", 1.5).await?;
            Ok(())
        })
        .await
        .unwrap();

    let storage = harness.open_storage();
    let stats = storage.get_stats().unwrap();
    assert_eq!(stats.word_count, 5);
    assert_eq!(stats.trigram_count, 2);

    // Stored with the weight it had after the whole absorption
    let echo = storage.get_word("echo").unwrap().unwrap();
    assert!((echo.weight - 1.1).abs() < 1e-9);
    assert_eq!(echo.source, "user");
    assert!(echo.timestamp >= before);

    let haze = storage.get_word("haze").unwrap().unwrap();
    assert!((haze.weight - 1.5).abs() < 1e-9);
    assert_eq!(haze.source, "self");

    let row = storage
        .get_trigram(&Trigram::new("the", "haze", "remembers"))
        .unwrap()
        .unwrap();
    assert_eq!(row.source, "self");
}

#[tokio::test]
async fn test_repeat_absorption_upserts_single_row() {
    let harness = TestHarness::new();

    // First session
    let first = harness.lexicon();
    first
        .scoped(|lex| async move {
            lex.absorb("drift slowly onward", "user", 1.0).await?;
            Ok(())
        })
        .await
        .unwrap();

    // Second session starts with empty memory, so the same words are new again
    let second = harness.lexicon();
    second
        .scoped(|lex| async move {
            lex.absorb("drift slowly onward", "user", 0.5).await?;
            Ok(())
        })
        .await
        .unwrap();

    let storage = harness.open_storage();
    let words = storage.list_words().unwrap();
    assert_eq!(words.len(), 3);
    assert!(words.iter().all(|w| (w.weight - 0.5).abs() < 1e-9));
    assert_eq!(storage.list_trigrams().unwrap().len(), 1);
}

#[tokio::test]
async fn test_nothing_new_writes_nothing() {
    let harness = TestHarness::new();
    let lexicon = harness.lexicon();

    lexicon
        .scoped(|lex| async move {
            lex.absorb("a b", "user", 1.0).await?;
            lex.absorb("", "user", 1.0).await?;
            Ok(())
        })
        .await
        .unwrap();

    assert_eq!(lexicon.state().await, LifecycleState::Closed);
    let stats = harness.open_storage().get_stats().unwrap();
    assert_eq!(stats.word_count, 0);
    assert_eq!(stats.trigram_count, 0);
}

#[tokio::test]
async fn test_disabled_persistence_never_creates_store() {
    let mut harness = TestHarness::new();
    harness.settings.persistence.enabled = false;
    let lexicon = harness.lexicon();

    lexicon
        .scoped(|lex| async move {
            lex.absorb("quiet words stay in memory", "user", 1.0).await?;
            Ok(())
        })
        .await
        .unwrap();

    assert!(!harness.db_path.exists());
    assert_eq!(lexicon.stats().await.total_words, 4);
}
