//! Delta-series storage shared between the sampler and the renderer.

use std::collections::VecDeque;

use parking_lot::Mutex;

use super::totals::{Entity, Totals};

/// Maximum number of points kept per series (oldest evicted first).
const MAX_SERIES_LEN: usize = 1440;

/// Process-wide store of recorded deltas and the last-observed totals.
///
/// One series per entity, in insertion order, plus the totals captured by
/// the most recent successful tick. All interior state sits behind a
/// single mutex so readers always see a consistent view. The sampler is
/// the only writer; the renderer consumes copies via
/// [`SeriesStore::snapshot`].
#[derive(Debug, Default)]
pub struct SeriesStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    series: [VecDeque<u64>; 4],
    last_observed: Totals,
}

impl SeriesStore {
    /// Create an empty store with a zero baseline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one delta to an entity's series.
    ///
    /// Once the cap is reached the oldest point is evicted; interior
    /// points are never dropped.
    pub fn append(&self, entity: Entity, value: u64) {
        let mut inner = self.inner.lock();
        let series = &mut inner.series[entity.index()];
        series.push_back(value);
        if series.len() > MAX_SERIES_LEN {
            series.pop_front();
        }
    }

    /// The recorded history for one entity, in insertion order.
    pub fn read_all(&self, entity: Entity) -> Vec<u64> {
        self.inner.lock().series[entity.index()]
            .iter()
            .copied()
            .collect()
    }

    /// Totals captured by the most recent successful tick.
    pub fn last_observed(&self) -> Totals {
        self.inner.lock().last_observed
    }

    /// Overwrite the baseline used for the next delta computation.
    pub fn set_last_observed(&self, totals: Totals) {
        self.inner.lock().last_observed = totals;
    }

    /// Copy all four series and the baseline under one lock acquisition.
    pub fn snapshot(&self) -> SeriesSnapshot {
        let inner = self.inner.lock();
        SeriesSnapshot {
            series: [
                inner.series[0].iter().copied().collect(),
                inner.series[1].iter().copied().collect(),
                inner.series[2].iter().copied().collect(),
                inner.series[3].iter().copied().collect(),
            ],
            last_observed: inner.last_observed,
        }
    }
}

/// An owned, consistent copy of the store contents.
#[derive(Debug, Clone, Default)]
pub struct SeriesSnapshot {
    series: [Vec<u64>; 4],
    /// Totals captured by the most recent successful tick.
    pub last_observed: Totals,
}

impl SeriesSnapshot {
    /// The copied series for one entity.
    pub fn series(&self, entity: Entity) -> &[u64] {
        &self.series[entity.index()]
    }

    /// True if no entity has any recorded point.
    pub fn is_empty(&self) -> bool {
        self.series.iter().all(|s| s.is_empty())
    }
}
