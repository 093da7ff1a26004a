use foundation::geo::LatLng;
use foundation::time::ClockTime;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Event identifier: `EVT` followed by seven characters from `[0-9A-Z]`.
///
/// Randomly drawn, so uniqueness inside a feed is probabilistic only.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub const PREFIX: &'static str = "EVT";
    pub const SUFFIX_LEN: usize = 7;
    const ALPHABET: &'static [u8] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let mut s = String::with_capacity(Self::PREFIX.len() + Self::SUFFIX_LEN);
        s.push_str(Self::PREFIX);
        for _ in 0..Self::SUFFIX_LEN {
            let idx = rng.gen_range(0..Self::ALPHABET.len());
            s.push(Self::ALPHABET[idx] as char);
        }
        EventId(s)
    }

    /// Accepts only well-formed ids.
    pub fn parse(s: &str) -> Option<Self> {
        let suffix = s.strip_prefix(Self::PREFIX)?;
        let well_formed = suffix.len() == Self::SUFFIX_LEN
            && suffix
                .bytes()
                .all(|b| b.is_ascii_digit() || b.is_ascii_uppercase());
        well_formed.then(|| EventId(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Resolved,
}

impl EventStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            EventStatus::Active => "active",
            EventStatus::Resolved => "resolved",
        }
    }

    /// Badge text shown next to an event.
    pub fn label(self) -> &'static str {
        match self {
            EventStatus::Active => "In Progress",
            EventStatus::Resolved => "Resolved",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Pursuit,
    Incident,
    Alert,
    Patrol,
}

impl EventKind {
    pub const ALL: [EventKind; 4] = [
        EventKind::Pursuit,
        EventKind::Incident,
        EventKind::Alert,
        EventKind::Patrol,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Pursuit => "pursuit",
            EventKind::Incident => "incident",
            EventKind::Alert => "alert",
            EventKind::Patrol => "patrol",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic tracking event. Never mutated after generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TrackingEvent {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub status: EventStatus,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub timestamp: ClockTime,
    pub location: LatLng,
}

impl TrackingEvent {
    pub fn is_active(&self) -> bool {
        self.status == EventStatus::Active
    }
}
