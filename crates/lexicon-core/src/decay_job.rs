//! Background decay loop.
//!
//! Runs one decay pass per period until the token is cancelled. The first
//! pass happens one full period after spawn, never immediately.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::shared::SharedLexicon;

/// Spawn the decay loop on the current runtime.
///
/// The handle resolves to the number of passes run once `cancel` fires.
pub fn spawn_decay_job(
    lexicon: Arc<SharedLexicon>,
    period: Duration,
    cancel: CancellationToken,
) -> JoinHandle<u64> {
    tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut passes = 0u64;

        info!(period_secs = period.as_secs_f64(), "Decay job started");
        loop {
            tokio::select! {
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let removed = lexicon.decay().await;
                    passes += 1;
                    debug!(pass = passes, removed, "Decay pass complete");
                }
            }
        }
        info!(passes, "Decay job cancelled");
        passes
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cooccur::CooccurField;
    use crate::lexicon::Lexicon;
    use crate::tokenizer::CharTokenizer;
    use lexicon_types::LexiconConfig;

    fn shared(decay_rate: f64) -> Arc<SharedLexicon> {
        let tokenizer = Arc::new(CharTokenizer::from_text("abcdefghijklmnopqrstuvwxyz "));
        let field = Arc::new(CooccurField::new());
        let config = LexiconConfig {
            decay_rate,
            ..Default::default()
        };
        let lexicon = Lexicon::new(tokenizer, field, config).unwrap();
        Arc::new(SharedLexicon::in_memory(lexicon))
    }

    #[tokio::test(start_paused = true)]
    async fn test_runs_one_pass_per_period() {
        let lexicon = shared(0.99);
        let cancel = CancellationToken::new();
        let handle = spawn_decay_job(Arc::clone(&lexicon), Duration::from_secs(60), cancel.clone());

        tokio::time::sleep(Duration::from_secs(181)).await;
        cancel.cancel();

        assert_eq!(handle.await.unwrap(), 3);
        assert_eq!(lexicon.metrics().snapshot().decay_passes, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_before_first_tick() {
        let lexicon = shared(0.99);
        let cancel = CancellationToken::new();
        let handle = spawn_decay_job(Arc::clone(&lexicon), Duration::from_secs(60), cancel.clone());

        tokio::time::sleep(Duration::from_secs(10)).await;
        cancel.cancel();

        assert_eq!(handle.await.unwrap(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_job_forgets_stale_words() {
        let lexicon = shared(0.5);
        lexicon.absorb("faded memory", "user", 1.0).await.unwrap();

        let cancel = CancellationToken::new();
        let handle = spawn_decay_job(Arc::clone(&lexicon), Duration::from_secs(1), cancel.clone());

        // 1.0 * 0.5^4 = 0.0625 falls under the removal threshold
        tokio::time::sleep(Duration::from_millis(4500)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(lexicon.stats().await.total_words, 0);
        assert_eq!(lexicon.stats().await.total_trigrams, 0);
    }
}
