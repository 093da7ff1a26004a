use foundation::geo::LatLng;
use runtime::scheduler::InvalidPeriod;
use thiserror::Error;

use crate::event::EventKind;

/// Rejected configuration, reported before anything is generated.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("area center is not a valid coordinate: {0:?}")]
    CenterOutOfRange(LatLng),

    #[error("area radii must be finite and non-negative (lat {lat}, lng {lng})")]
    InvalidRadius { lat: f64, lng: f64 },

    #[error("active probability must lie within [0, 1], got {0}")]
    InvalidProbability(f64),

    #[error("timestamp age must be below one day, got {0} minutes")]
    InvalidMaxAge(u32),

    #[error("catalog has no categories")]
    EmptyCatalog,

    #[error("category `{0}` has no titles")]
    EmptyTitles(EventKind),

    #[error("catalog has no descriptions")]
    EmptyDescriptions,

    #[error("feed capacity must be at least 1")]
    ZeroCapacity,

    #[error("unknown filter mode `{0}` (expected all, active, or resolved)")]
    UnknownFilter(String),
}

/// Simulation errors.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Schedule(#[from] InvalidPeriod),

    /// An event source failed to produce events.
    #[error("event generation failed: {0}")]
    Generation(String),
}
