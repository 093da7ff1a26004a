use crate::error::ConfigError;
use crate::event::{EventId, TrackingEvent};

pub const DEFAULT_FEED_CAPACITY: usize = 15;

/// Bounded, newest-first list of events.
///
/// Ordering contract:
/// - Index 0 is the most recent arrival.
/// - Retained events keep their relative order across arrivals.
/// - The only way an event leaves is by falling off the tail when an
///   arrival pushes the length past capacity.
///
/// Every mutation bumps [`Feed::version`], which derived views use to tell
/// whether they are stale.
#[derive(Debug, Clone, PartialEq)]
pub struct Feed {
    events: Vec<TrackingEvent>,
    capacity: usize,
    version: u64,
}

impl Default for Feed {
    fn default() -> Self {
        Self {
            events: Vec::with_capacity(DEFAULT_FEED_CAPACITY + 1),
            capacity: DEFAULT_FEED_CAPACITY,
            version: 0,
        }
    }
}

impl Feed {
    pub fn new(capacity: usize) -> Result<Self, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(Self {
            events: Vec::with_capacity(capacity + 1),
            capacity,
            version: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn events(&self) -> &[TrackingEvent] {
        &self.events
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrackingEvent> {
        self.events.iter()
    }

    pub fn get(&self, index: usize) -> Option<&TrackingEvent> {
        self.events.get(index)
    }

    pub fn first(&self) -> Option<&TrackingEvent> {
        self.events.first()
    }

    pub fn find(&self, id: &EventId) -> Option<&TrackingEvent> {
        self.events.iter().find(|e| &e.id == id)
    }

    pub fn contains(&self, id: &EventId) -> bool {
        self.find(id).is_some()
    }

    /// Replaces the contents. Events beyond capacity are dropped from the
    /// tail, same as if they had been pushed out by arrivals.
    pub fn seed(&mut self, mut events: Vec<TrackingEvent>) {
        events.truncate(self.capacity);
        self.events = events;
        self.version += 1;
    }

    /// Prepends `event` and returns whatever fell off the tail (oldest last).
    pub fn arrive(&mut self, event: TrackingEvent) -> Vec<TrackingEvent> {
        self.events.insert(0, event);
        let evicted = if self.events.len() > self.capacity {
            self.events.split_off(self.capacity)
        } else {
            Vec::new()
        };
        self.version += 1;
        evicted
    }
}

#[cfg(test)]
mod tests {
    use super::{DEFAULT_FEED_CAPACITY, Feed};
    use crate::error::ConfigError;
    use crate::event::{EventId, EventKind, EventStatus, TrackingEvent};
    use foundation::geo::LatLng;
    use foundation::time::ClockTime;
    use pretty_assertions::assert_eq;

    fn ev(n: u32) -> TrackingEvent {
        TrackingEvent {
            id: EventId::parse(&format!("EVT{n:07}")).unwrap(),
            title: "Routine Check".to_string(),
            description: "Multiple units deployed to incident location".to_string(),
            status: EventStatus::Active,
            kind: EventKind::Patrol,
            timestamp: ClockTime::MIDNIGHT,
            location: LatLng::new(34.0522, -118.2437),
        }
    }

    fn ids(feed: &Feed) -> Vec<String> {
        feed.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn arrivals_are_prepended() {
        let mut feed = Feed::default();
        feed.arrive(ev(1));
        feed.arrive(ev(2));
        feed.arrive(ev(3));
        assert_eq!(ids(&feed), vec!["EVT0000003", "EVT0000002", "EVT0000001"]);
    }

    #[test]
    fn capacity_evicts_oldest_and_keeps_order() {
        let mut feed = Feed::new(3).unwrap();
        feed.seed(vec![ev(3), ev(2), ev(1)]);

        let evicted = feed.arrive(ev(4));
        assert_eq!(evicted, vec![ev(1)]);
        assert_eq!(ids(&feed), vec!["EVT0000004", "EVT0000003", "EVT0000002"]);

        for n in 5..50 {
            feed.arrive(ev(n));
            assert!(feed.len() <= feed.capacity());
        }
        assert_eq!(ids(&feed), vec!["EVT0000049", "EVT0000048", "EVT0000047"]);
    }

    #[test]
    fn seed_replaces_and_truncates() {
        let mut feed = Feed::new(2).unwrap();
        feed.arrive(ev(9));
        feed.seed(vec![ev(1), ev(2), ev(3)]);
        assert_eq!(ids(&feed), vec!["EVT0000001", "EVT0000002"]);

        feed.seed(Vec::new());
        assert!(feed.is_empty());
    }

    #[test]
    fn every_mutation_bumps_version() {
        let mut feed = Feed::default();
        assert_eq!(feed.version(), 0);
        feed.seed(vec![ev(1)]);
        assert_eq!(feed.version(), 1);
        feed.arrive(ev(2));
        assert_eq!(feed.version(), 2);
        feed.seed(Vec::new());
        assert_eq!(feed.version(), 3);
    }

    #[test]
    fn lookup_by_id() {
        let mut feed = Feed::default();
        feed.seed(vec![ev(1), ev(2)]);
        let id = EventId::parse("EVT0000002").unwrap();
        assert_eq!(feed.find(&id), Some(&ev(2)));
        assert!(!feed.contains(&EventId::parse("EVT0000003").unwrap()));
    }

    #[test]
    fn rejects_zero_capacity() {
        assert_eq!(Feed::new(0).unwrap_err(), ConfigError::ZeroCapacity);
        assert_eq!(Feed::default().capacity(), DEFAULT_FEED_CAPACITY);
    }
}
