use std::collections::VecDeque;

/// A recorded state change, stamped with virtual time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub at_ms: u64,
    pub kind: &'static str,
    pub message: String,
}

/// Change log.
///
/// Unbounded by default. A bounded bus keeps only the newest `limit` events
/// and counts what it let go, so a long-running owner can keep emitting
/// without draining.
#[derive(Debug, Default)]
pub struct EventBus {
    events: VecDeque<Event>,
    limit: Option<usize>,
    dropped: u64,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bounded(limit: usize) -> Self {
        Self {
            events: VecDeque::with_capacity(limit),
            limit: Some(limit),
            dropped: 0,
        }
    }

    pub fn emit(&mut self, at_ms: u64, kind: &'static str, message: impl Into<String>) {
        if self.limit == Some(0) {
            self.dropped += 1;
            return;
        }
        self.events.push_back(Event {
            at_ms,
            kind,
            message: message.into(),
        });
        if let Some(limit) = self.limit {
            while self.events.len() > limit {
                self.events.pop_front();
                self.dropped += 1;
            }
        }
    }

    /// Oldest first.
    pub fn events(&self) -> impl DoubleEndedIterator<Item = &Event> + ExactSizeIterator {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Up to `n` of the newest events, newest first.
    pub fn recent(&self, n: usize) -> impl Iterator<Item = &Event> {
        self.events.iter().rev().take(n)
    }

    pub fn count_kind(&self, kind: &str) -> usize {
        self.events.iter().filter(|e| e.kind == kind).count()
    }

    /// Events evicted by the bound since creation.
    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    pub fn drain(&mut self) -> Vec<Event> {
        self.events.drain(..).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;

    #[test]
    fn records_events_with_time() {
        let mut bus = EventBus::new();
        bus.emit(8_000, "feed.arrive", "EVT0000001");
        assert_eq!(bus.len(), 1);
        assert_eq!(bus.events().next().map(|e| e.at_ms), Some(8_000));
        assert_eq!(bus.count_kind("feed.arrive"), 1);
        assert_eq!(bus.count_kind("feed.seed"), 0);
    }

    #[test]
    fn bounded_bus_keeps_the_newest() {
        let mut bus = EventBus::bounded(3);
        for at in 0..5u64 {
            bus.emit(at, "tick", at.to_string());
        }
        let kept: Vec<u64> = bus.events().map(|e| e.at_ms).collect();
        assert_eq!(kept, vec![2, 3, 4]);
        assert_eq!(bus.dropped(), 2);

        let recent: Vec<&str> = bus.recent(2).map(|e| e.message.as_str()).collect();
        assert_eq!(recent, vec!["4", "3"]);
    }

    #[test]
    fn zero_bound_records_nothing() {
        let mut bus = EventBus::bounded(0);
        bus.emit(1, "k", "m");
        assert!(bus.is_empty());
        assert_eq!(bus.dropped(), 1);
    }

    #[test]
    fn drain_clears_events() {
        let mut bus = EventBus::new();
        bus.emit(0, "k", "m");
        let drained = bus.drain();
        assert_eq!(drained.len(), 1);
        assert!(bus.is_empty());
    }
}
