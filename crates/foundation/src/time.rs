use chrono::Timelike;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

const MINUTES_PER_DAY: u32 = 24 * 60;

/// Wall-clock time of day with minute resolution.
///
/// Renders as `HH:MM`. Arithmetic wraps around midnight.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClockTime {
    hour: u8,
    minute: u8,
}

impl ClockTime {
    pub const MIDNIGHT: ClockTime = ClockTime { hour: 0, minute: 0 };

    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then_some(Self { hour, minute })
    }

    pub fn hour(self) -> u8 {
        self.hour
    }

    pub fn minute(self) -> u8 {
        self.minute
    }

    pub fn minutes_since_midnight(self) -> u32 {
        self.hour as u32 * 60 + self.minute as u32
    }

    fn from_minutes_since_midnight(total: u32) -> Self {
        let total = total % MINUTES_PER_DAY;
        Self {
            hour: (total / 60) as u8,
            minute: (total % 60) as u8,
        }
    }

    /// Steps back `minutes`, borrowing from the hour (and from 00 into 23).
    pub fn minus_minutes(self, minutes: u32) -> Self {
        let back = minutes % MINUTES_PER_DAY;
        let now = self.minutes_since_midnight();
        Self::from_minutes_since_midnight(now + MINUTES_PER_DAY - back)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseClockTimeError(pub String);

impl fmt::Display for ParseClockTimeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid time of day `{}` (expected HH:MM)", self.0)
    }
}

impl std::error::Error for ParseClockTimeError {}

impl FromStr for ClockTime {
    type Err = ParseClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseClockTimeError(s.to_string());
        let (h, m) = s.split_once(':').ok_or_else(err)?;
        if h.len() != 2 || m.len() != 2 {
            return Err(err());
        }
        let hour: u8 = h.parse().map_err(|_| err())?;
        let minute: u8 = m.parse().map_err(|_| err())?;
        ClockTime::new(hour, minute).ok_or_else(err)
    }
}

impl Serialize for ClockTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ClockTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Source of the current time of day.
pub trait WallClock {
    fn now(&self) -> ClockTime;
}

/// Local time from the operating system.
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemWallClock;

impl WallClock for SystemWallClock {
    fn now(&self) -> ClockTime {
        let now = chrono::Local::now();
        ClockTime::from_minutes_since_midnight(now.hour() * 60 + now.minute())
    }
}

/// Always reports the same time. Used for replay and tests.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FixedWallClock(pub ClockTime);

impl WallClock for FixedWallClock {
    fn now(&self) -> ClockTime {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::{ClockTime, FixedWallClock, WallClock};

    fn t(h: u8, m: u8) -> ClockTime {
        ClockTime::new(h, m).unwrap()
    }

    #[test]
    fn formats_zero_padded() {
        assert_eq!(t(7, 5).to_string(), "07:05");
        assert_eq!(t(23, 59).to_string(), "23:59");
    }

    #[test]
    fn minus_minutes_within_hour() {
        assert_eq!(t(14, 40).minus_minutes(15), t(14, 25));
        assert_eq!(t(14, 40).minus_minutes(0), t(14, 40));
    }

    #[test]
    fn minus_minutes_borrows_from_previous_hour() {
        assert_eq!(t(14, 10).minus_minutes(25), t(13, 45));
        assert_eq!(t(14, 0).minus_minutes(59), t(13, 1));
    }

    #[test]
    fn minus_minutes_wraps_past_midnight() {
        assert_eq!(t(0, 5).minus_minutes(10), t(23, 55));
        assert_eq!(ClockTime::MIDNIGHT.minus_minutes(24 * 60), ClockTime::MIDNIGHT);
    }

    #[test]
    fn rejects_out_of_range_components() {
        assert!(ClockTime::new(24, 0).is_none());
        assert!(ClockTime::new(0, 60).is_none());
    }

    #[test]
    fn parses_and_serializes_as_text() {
        let parsed: ClockTime = "09:07".parse().unwrap();
        assert_eq!(parsed, t(9, 7));
        assert!("9:07".parse::<ClockTime>().is_err());
        assert!("25:00".parse::<ClockTime>().is_err());

        let json = serde_json::to_string(&parsed).unwrap();
        assert_eq!(json, "\"09:07\"");
        let back: ClockTime = serde_json::from_str(&json).unwrap();
        assert_eq!(back, parsed);
    }

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedWallClock(t(12, 30));
        assert_eq!(clock.now(), clock.now());
    }
}
