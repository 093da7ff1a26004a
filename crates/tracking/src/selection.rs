use crate::event::{EventId, TrackingEvent};
use crate::feed::Feed;

/// The single event shared by the list, the map and the detail panel.
///
/// The selection holds the event by value. Arrivals never touch it, so once
/// the selected event is evicted the selection is *detached*: it still shows
/// the event's last known data, but the feed no longer lists it. Callers
/// check [`Selection::is_detached`] rather than relying on feed membership.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    current: Option<TrackingEvent>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Option<&TrackingEvent> {
        self.current.as_ref()
    }

    pub fn id(&self) -> Option<&EventId> {
        self.current.as_ref().map(|e| &e.id)
    }

    pub fn is_empty(&self) -> bool {
        self.current.is_none()
    }

    pub fn is_selected(&self, id: &EventId) -> bool {
        self.id() == Some(id)
    }

    /// Replaces the selection unconditionally.
    ///
    /// The event is not checked against any feed: selection is opaque, and an
    /// event the feed has never seen is accepted like any other. Returns
    /// `true` if the selected id changed.
    pub fn select(&mut self, event: TrackingEvent) -> bool {
        let changed = !self.is_selected(&event.id);
        self.current = Some(event);
        changed
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    /// Reconciles after the feed was reseeded: first event, or nothing.
    pub fn on_seed(&mut self, feed: &Feed) {
        self.current = feed.first().cloned();
    }

    /// True when something is selected but the feed no longer holds it.
    pub fn is_detached(&self, feed: &Feed) -> bool {
        self.id().is_some_and(|id| !feed.contains(id))
    }
}

#[cfg(test)]
mod tests {
    use super::Selection;
    use crate::event::{EventId, EventKind, EventStatus, TrackingEvent};
    use crate::feed::Feed;
    use foundation::geo::LatLng;
    use foundation::time::ClockTime;

    fn ev(n: u32) -> TrackingEvent {
        TrackingEvent {
            id: EventId::parse(&format!("EVT{n:07}")).unwrap(),
            title: "Urban Chase".to_string(),
            description: "Target moving at high speed on main arterial road, exceeding speed limit"
                .to_string(),
            status: EventStatus::Active,
            kind: EventKind::Pursuit,
            timestamp: ClockTime::MIDNIGHT,
            location: LatLng::new(34.05, -118.24),
        }
    }

    #[test]
    fn seed_selects_first_or_nothing() {
        let mut feed = Feed::default();
        let mut sel = Selection::new();

        feed.seed(vec![ev(1), ev(2)]);
        sel.on_seed(&feed);
        assert_eq!(sel.get(), Some(&ev(1)));

        feed.seed(Vec::new());
        sel.on_seed(&feed);
        assert!(sel.is_empty());
    }

    #[test]
    fn select_replaces_and_reports_change() {
        let mut sel = Selection::new();
        assert!(sel.select(ev(1)));
        assert!(!sel.select(ev(1)));
        assert!(sel.select(ev(2)));
        assert!(sel.is_selected(&ev(2).id));
        sel.clear();
        assert!(sel.get().is_none());
    }

    #[test]
    fn eviction_detaches_without_clearing() {
        let mut feed = Feed::new(2).unwrap();
        feed.seed(vec![ev(2), ev(1)]);
        let mut sel = Selection::new();
        sel.select(ev(1));
        assert!(!sel.is_detached(&feed));

        feed.arrive(ev(3));
        assert!(sel.is_detached(&feed));
        assert_eq!(sel.get(), Some(&ev(1)));
    }

    #[test]
    fn empty_selection_is_never_detached() {
        let feed = Feed::default();
        assert!(!Selection::new().is_detached(&feed));
    }

    #[test]
    fn accepts_events_outside_the_feed() {
        let mut feed = Feed::default();
        feed.seed(vec![ev(1)]);
        let mut sel = Selection::new();
        sel.select(ev(42));
        assert!(sel.is_detached(&feed));
    }
}
