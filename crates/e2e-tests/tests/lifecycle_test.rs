//! Store lifecycle E2E tests.
//!
//! The store must be released on every exit path of a scoped session,
//! including failures inside the session.

use pretty_assertions::assert_eq;

use e2e_tests::TestHarness;
use lexicon_core::{CoreError, LifecycleState};

#[tokio::test]
async fn test_scoped_error_still_releases_store() {
    let harness = TestHarness::new();
    let lexicon = harness.lexicon();

    let result: Result<(), CoreError> = lexicon
        .scoped(|lex| async move {
            lex.absorb("persist before failing", "user", 1.0).await?;
            Err(CoreError::Lifecycle("session aborted".to_string()))
        })
        .await;

    assert!(result.is_err());
    assert_eq!(lexicon.state().await, LifecycleState::Closed);

    // RocksDB holds an exclusive lock while open; reopening proves release
    let storage = harness.open_storage();
    assert!(storage.get_word("persist").unwrap().is_some());
    assert!(storage.get_word("failing").unwrap().is_some());
}

#[tokio::test]
async fn test_closed_lexicon_cannot_reattach() {
    let harness = TestHarness::new();
    let lexicon = harness.lexicon();

    lexicon.attach().await.unwrap();
    lexicon.close().await.unwrap();

    let result = lexicon.attach().await;
    assert!(matches!(result, Err(CoreError::Lifecycle(_))));
}

#[tokio::test]
async fn test_second_instance_cannot_attach_while_first_holds_store() {
    let harness = TestHarness::new();
    let first = harness.lexicon();
    let second = harness.lexicon();

    first.attach().await.unwrap();
    assert!(matches!(second.attach().await, Err(CoreError::Storage(_))));
    assert_eq!(second.state().await, LifecycleState::Unattached);

    first.close().await.unwrap();
    second.attach().await.unwrap();
    second.close().await.unwrap();
}

#[tokio::test]
async fn test_absorb_after_close_stays_in_memory() {
    let harness = TestHarness::new();
    let lexicon = harness.lexicon();

    lexicon.attach().await.unwrap();
    lexicon.close().await.unwrap();

    let record = lexicon.absorb("late arrival here", "user", 1.0).await.unwrap();
    assert_eq!(record.count(), 4);

    let stats = harness.open_storage().get_stats().unwrap();
    assert_eq!(stats.word_count, 0);
}
