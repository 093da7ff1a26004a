use rand::Rng;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

use crate::event::{EventStatus, TrackingEvent};
use crate::feed::Feed;

/// Bounds of the synthetic response-time figure, in minutes.
pub const RESPONSE_TIME_RANGE_MIN: RangeInclusive<u32> = 5..=19;

/// Figures for the statistics card, taken over the unfiltered feed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedStatistics {
    pub active: usize,
    pub resolved: usize,
    /// Synthetic; a fresh draw per feed change, not an average of anything.
    pub response_time_min: u32,
}

impl FeedStatistics {
    pub fn compute<R: Rng + ?Sized>(events: &[TrackingEvent], rng: &mut R) -> Self {
        let (active, resolved) = count_by_status(events);
        Self {
            active,
            resolved,
            response_time_min: rng.gen_range(RESPONSE_TIME_RANGE_MIN),
        }
    }

    pub fn total(&self) -> usize {
        self.active + self.resolved
    }
}

/// `(active, resolved)`.
pub fn count_by_status(events: &[TrackingEvent]) -> (usize, usize) {
    events
        .iter()
        .fold((0, 0), |(active, resolved), e| match e.status {
            EventStatus::Active => (active + 1, resolved),
            EventStatus::Resolved => (active, resolved + 1),
        })
}

/// Keeps [`FeedStatistics`] in step with a feed.
///
/// Recomputes only when the feed version moved since the last refresh, so
/// the response-time figure is drawn once per mutation no matter how often
/// a renderer asks.
#[derive(Debug, Default)]
pub struct StatisticsAggregator {
    current: FeedStatistics,
    computed_for: Option<u64>,
    recomputations: u64,
}

impl StatisticsAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> FeedStatistics {
        self.current
    }

    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn is_stale(&self, feed: &Feed) -> bool {
        self.computed_for != Some(feed.version())
    }

    /// Returns `true` if the statistics were recomputed.
    pub fn refresh<R: Rng + ?Sized>(&mut self, feed: &Feed, rng: &mut R) -> bool {
        if !self.is_stale(feed) {
            return false;
        }
        self.current = FeedStatistics::compute(feed.events(), rng);
        self.computed_for = Some(feed.version());
        self.recomputations += 1;
        true
    }
}
