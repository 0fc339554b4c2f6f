//! The sampling tick: fetch totals, record deltas, advance the baseline.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{watch, Mutex};
use tracing::{debug, warn};

use super::series::SeriesStore;
use super::totals::{Entity, Totals};
use crate::error::SourceError;
use crate::source::CounterSource;

/// Runs sampling ticks against a counter source and records deltas.
///
/// A tick is the sequence fetch → diff → append → overwrite-baseline.
/// Ticks are serialized by an async mutex held across the whole sequence,
/// so the interval task and request-driven ticks can never interleave,
/// even though the fetch suspends.
#[derive(Debug)]
pub struct Sampler {
    source: Box<dyn CounterSource>,
    store: Arc<SeriesStore>,
    gate: Mutex<()>,
}

impl Sampler {
    /// Create a sampler reading from `source` into `store`.
    pub fn new(source: Box<dyn CounterSource>, store: Arc<SeriesStore>) -> Self {
        Self {
            source,
            store,
            gate: Mutex::new(()),
        }
    }

    /// Shared handle to the store this sampler writes into.
    pub fn store(&self) -> &Arc<SeriesStore> {
        &self.store
    }

    /// Run one tick and return the freshly fetched totals.
    ///
    /// For every entity whose count changed since the previous tick, the
    /// absolute delta is appended to that entity's series; unchanged
    /// entities get nothing. The baseline is then overwritten with the
    /// fresh totals. A failed fetch leaves the store untouched.
    pub async fn sample(&self) -> Result<Totals, SourceError> {
        let _tick = self.gate.lock().await;

        let totals = self.source.totals().await?;
        let previous = self.store.last_observed();

        for entity in Entity::ALL {
            let delta = totals.get(entity).abs_diff(previous.get(entity));
            if delta != 0 {
                self.store.append(entity, delta);
            }
        }
        self.store.set_last_observed(totals);

        debug!(source = self.source.description(), ?totals, "sampled totals");
        Ok(totals)
    }

    /// Spawn the background sampling loop.
    ///
    /// The first tick fires immediately and establishes the baseline; the
    /// loop then fires once per `interval`. Failed ticks are logged and
    /// the loop keeps running on schedule. Stop it via the returned
    /// handle.
    pub fn start(self: Arc<Self>, interval: Duration) -> SamplerHandle {
        let (stop_tx, mut stop_rx) = watch::channel(false);

        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);

            loop {
                tokio::select! {
                    _ = ticker.tick() => {
                        if let Err(e) = self.sample().await {
                            warn!(error = %e, "sampling tick failed");
                        }
                    }
                    changed = stop_rx.changed() => {
                        if changed.is_err() || *stop_rx.borrow() {
                            break;
                        }
                    }
                }
            }
        });

        SamplerHandle { stop_tx }
    }
}

/// Handle for stopping the background sampling loop.
///
/// Call [`SamplerHandle::stop`] explicitly, or drop the handle.
#[derive(Debug)]
pub struct SamplerHandle {
    stop_tx: watch::Sender<bool>,
}

impl SamplerHandle {
    /// Stop background sampling.
    pub fn stop(self) {
        let _ = self.stop_tx.send(true);
    }
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use async_trait::async_trait;

    use super::*;

    /// Source that replays a fixed script of responses, one per tick.
    #[derive(Debug)]
    struct ScriptedSource {
        responses: std::sync::Mutex<VecDeque<Result<Totals, SourceError>>>,
        delay: Duration,
    }

    impl ScriptedSource {
        fn new(responses: Vec<Result<Totals, SourceError>>) -> Self {
            Self {
                responses: std::sync::Mutex::new(responses.into()),
                delay: Duration::ZERO,
            }
        }

        fn with_delay(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl CounterSource for ScriptedSource {
        async fn totals(&self) -> Result<Totals, SourceError> {
            if !self.delay.is_zero() {
                tokio::time::sleep(self.delay).await;
            }
            self.responses
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(SourceError::Query("script exhausted".to_string())))
        }

        fn description(&self) -> &str {
            "scripted"
        }
    }

    fn sampler_with(responses: Vec<Result<Totals, SourceError>>) -> Sampler {
        Sampler::new(
            Box::new(ScriptedSource::new(responses)),
            Arc::new(SeriesStore::new()),
        )
    }

    #[tokio::test]
    async fn first_tick_records_full_counts_as_deltas() {
        let sampler = sampler_with(vec![Ok(Totals::new(5, 2, 10, 1))]);

        let totals = sampler.sample().await.unwrap();
        assert_eq!(totals, Totals::new(5, 2, 10, 1));

        let store = sampler.store();
        assert_eq!(store.read_all(Entity::Files), vec![5]);
        assert_eq!(store.read_all(Entity::Clones), vec![2]);
        assert_eq!(store.read_all(Entity::Chunks), vec![10]);
        assert_eq!(store.last_observed(), Totals::new(5, 2, 10, 1));
    }

    #[tokio::test]
    async fn unchanged_counts_append_nothing() {
        let sampler = sampler_with(vec![
            Ok(Totals::new(5, 2, 10, 1)),
            Ok(Totals::new(5, 2, 10, 3)),
        ]);

        sampler.sample().await.unwrap();
        sampler.sample().await.unwrap();

        let store = sampler.store();
        assert_eq!(store.read_all(Entity::Files), vec![5]);
        assert_eq!(store.read_all(Entity::Clones), vec![2]);
        assert_eq!(store.read_all(Entity::Chunks), vec![10]);
        // The baseline still advances to the fresh totals.
        assert_eq!(store.last_observed(), Totals::new(5, 2, 10, 3));
    }

    #[tokio::test]
    async fn decreases_record_absolute_magnitude() {
        let sampler = sampler_with(vec![
            Ok(Totals::new(5, 2, 10, 3)),
            Ok(Totals::new(3, 2, 7, 3)),
        ]);

        sampler.sample().await.unwrap();
        sampler.sample().await.unwrap();

        let store = sampler.store();
        assert_eq!(store.read_all(Entity::Files), vec![5, 2]);
        assert_eq!(store.read_all(Entity::Chunks), vec![10, 3]);
        assert_eq!(store.read_all(Entity::Clones), vec![2]);
    }

    #[tokio::test]
    async fn candidates_are_diffed_like_other_entities() {
        let sampler = sampler_with(vec![
            Ok(Totals::new(0, 0, 0, 4)),
            Ok(Totals::new(0, 0, 0, 9)),
        ]);

        sampler.sample().await.unwrap();
        sampler.sample().await.unwrap();

        assert_eq!(sampler.store().read_all(Entity::Candidates), vec![4, 5]);
    }

    #[tokio::test]
    async fn failed_tick_leaves_store_untouched() {
        let sampler = sampler_with(vec![
            Ok(Totals::new(5, 2, 10, 1)),
            Err(SourceError::Connection("store unreachable".to_string())),
        ]);

        sampler.sample().await.unwrap();
        let err = sampler.sample().await.unwrap_err();
        assert!(matches!(err, SourceError::Connection(_)));

        let store = sampler.store();
        assert_eq!(store.read_all(Entity::Files), vec![5]);
        assert_eq!(store.read_all(Entity::Clones), vec![2]);
        assert_eq!(store.read_all(Entity::Chunks), vec![10]);
        assert_eq!(store.read_all(Entity::Candidates), vec![1]);
        assert_eq!(store.last_observed(), Totals::new(5, 2, 10, 1));
    }

    #[tokio::test]
    async fn identical_consecutive_totals_are_idempotent() {
        let sampler = sampler_with(vec![
            Ok(Totals::new(7, 7, 7, 7)),
            Ok(Totals::new(7, 7, 7, 7)),
        ]);

        sampler.sample().await.unwrap();
        let before = sampler.store().snapshot();
        sampler.sample().await.unwrap();
        let after = sampler.store().snapshot();

        for entity in Entity::ALL {
            assert_eq!(before.series(entity), after.series(entity));
        }
        assert_eq!(before.last_observed, after.last_observed);
    }

    #[tokio::test]
    async fn concurrent_ticks_are_serialized() {
        // Both ticks observe the same totals; with the gate held across
        // the fetch, the second tick must see the first one's baseline
        // and record nothing.
        let source = ScriptedSource::new(vec![
            Ok(Totals::new(10, 0, 0, 0)),
            Ok(Totals::new(10, 0, 0, 0)),
        ])
        .with_delay(Duration::from_millis(10));

        let sampler = Arc::new(Sampler::new(
            Box::new(source),
            Arc::new(SeriesStore::new()),
        ));

        let a = tokio::spawn({
            let sampler = sampler.clone();
            async move { sampler.sample().await }
        });
        let b = tokio::spawn({
            let sampler = sampler.clone();
            async move { sampler.sample().await }
        });
        a.await.unwrap().unwrap();
        b.await.unwrap().unwrap();

        assert_eq!(sampler.store().read_all(Entity::Files), vec![10]);
    }

    #[tokio::test]
    async fn background_loop_survives_failed_ticks() {
        let source = ScriptedSource::new(vec![
            Err(SourceError::Connection("store unreachable".to_string())),
            Ok(Totals::new(3, 0, 0, 0)),
        ]);
        let sampler = Arc::new(Sampler::new(
            Box::new(source),
            Arc::new(SeriesStore::new()),
        ));

        let handle = sampler.clone().start(Duration::from_millis(20));

        // First tick fails, second succeeds; wait long enough for both.
        tokio::time::sleep(Duration::from_millis(80)).await;
        handle.stop();

        assert_eq!(sampler.store().read_all(Entity::Files), vec![3]);
    }
}
