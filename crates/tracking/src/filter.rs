use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;
use crate::event::{EventStatus, TrackingEvent};
use crate::feed::Feed;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterMode {
    #[default]
    All,
    Active,
    Resolved,
}

impl FilterMode {
    pub const ALL: [FilterMode; 3] = [FilterMode::All, FilterMode::Active, FilterMode::Resolved];

    pub fn as_str(self) -> &'static str {
        match self {
            FilterMode::All => "all",
            FilterMode::Active => "active",
            FilterMode::Resolved => "resolved",
        }
    }

    /// Button text in the event log header.
    pub fn label(self) -> &'static str {
        match self {
            FilterMode::All => "All Events",
            FilterMode::Active => "Active",
            FilterMode::Resolved => "Resolved",
        }
    }

    pub fn matches(self, event: &TrackingEvent) -> bool {
        match self {
            FilterMode::All => true,
            FilterMode::Active => event.status == EventStatus::Active,
            FilterMode::Resolved => event.status == EventStatus::Resolved,
        }
    }
}

impl fmt::Display for FilterMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FilterMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        FilterMode::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ConfigError::UnknownFilter(s.to_string()))
    }
}

/// Order-preserving subsequence of `events` matching `mode`.
pub fn filter(events: &[TrackingEvent], mode: FilterMode) -> Vec<&TrackingEvent> {
    events.iter().filter(|e| mode.matches(e)).collect()
}

/// The event log's current filter. Holds only the mode; the filtered list is
/// derived from the feed on every read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FilterView {
    mode: FilterMode,
}

impl FilterView {
    pub fn new(mode: FilterMode) -> Self {
        Self { mode }
    }

    pub fn mode(&self) -> FilterMode {
        self.mode
    }

    /// Returns `true` if the mode changed.
    pub fn set_mode(&mut self, mode: FilterMode) -> bool {
        let changed = self.mode != mode;
        self.mode = mode;
        changed
    }

    pub fn apply<'a>(&self, feed: &'a Feed) -> Vec<&'a TrackingEvent> {
        filter(feed.events(), self.mode)
    }
}

#[cfg(test)]
mod tests {
    use super::{FilterMode, FilterView, filter};
    use crate::error::ConfigError;
    use crate::event::{EventId, EventKind, EventStatus, TrackingEvent};
    use crate::feed::Feed;
    use foundation::geo::LatLng;
    use foundation::time::ClockTime;
    use std::collections::HashSet;

    fn ev(n: u32, status: EventStatus) -> TrackingEvent {
        TrackingEvent {
            id: EventId::parse(&format!("EVT{n:07}")).unwrap(),
            title: "Traffic Jam".to_string(),
            description: "Traffic anomaly detected, units dispatched for investigation".to_string(),
            status,
            kind: EventKind::Incident,
            timestamp: ClockTime::MIDNIGHT,
            location: LatLng::new(34.05, -118.24),
        }
    }

    fn mixed() -> Vec<TrackingEvent> {
        vec![
            ev(1, EventStatus::Active),
            ev(2, EventStatus::Resolved),
            ev(3, EventStatus::Active),
            ev(4, EventStatus::Resolved),
            ev(5, EventStatus::Active),
        ]
    }

    fn numbers(events: &[&TrackingEvent]) -> Vec<String> {
        events.iter().map(|e| e.id.to_string()).collect()
    }

    #[test]
    fn all_is_identity() {
        let events = mixed();
        let all = filter(&events, FilterMode::All);
        assert_eq!(all.len(), events.len());
        assert!(all.iter().zip(events.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn status_filters_keep_feed_order() {
        let events = mixed();
        assert_eq!(
            numbers(&filter(&events, FilterMode::Active)),
            vec!["EVT0000001", "EVT0000003", "EVT0000005"]
        );
        assert_eq!(
            numbers(&filter(&events, FilterMode::Resolved)),
            vec!["EVT0000002", "EVT0000004"]
        );
    }

    #[test]
    fn active_and_resolved_partition_all() {
        let events = mixed();
        let active: HashSet<_> = filter(&events, FilterMode::Active)
            .into_iter()
            .map(|e| e.id.clone())
            .collect();
        let resolved: HashSet<_> = filter(&events, FilterMode::Resolved)
            .into_iter()
            .map(|e| e.id.clone())
            .collect();
        let all: HashSet<_> = filter(&events, FilterMode::All)
            .into_iter()
            .map(|e| e.id.clone())
            .collect();

        assert!(active.is_disjoint(&resolved));
        assert_eq!(&active | &resolved, all);
    }

    #[test]
    fn view_reads_through_the_current_feed() {
        let mut feed = Feed::default();
        feed.seed(mixed());
        let mut view = FilterView::default();
        assert_eq!(view.apply(&feed).len(), 5);

        assert!(view.set_mode(FilterMode::Resolved));
        assert!(!view.set_mode(FilterMode::Resolved));
        assert_eq!(view.apply(&feed).len(), 2);

        feed.arrive(ev(6, EventStatus::Resolved));
        assert_eq!(numbers(&view.apply(&feed))[0], "EVT0000006");
    }

    #[test]
    fn parses_modes() {
        assert_eq!("active".parse::<FilterMode>(), Ok(FilterMode::Active));
        assert_eq!(" Resolved ".parse::<FilterMode>(), Ok(FilterMode::Resolved));
        assert_eq!(
            "pending".parse::<FilterMode>(),
            Err(ConfigError::UnknownFilter("pending".to_string()))
        );
        for mode in FilterMode::ALL {
            assert_eq!(mode.to_string().parse::<FilterMode>(), Ok(mode));
        }
    }
}
