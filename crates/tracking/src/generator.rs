use foundation::geo::{GeoBounds, LatLng};
use foundation::time::{ClockTime, SystemWallClock, WallClock};
use rand::{Rng, RngCore};

use crate::catalog::Catalog;
use crate::error::{ConfigError, SimError};
use crate::event::{EventId, EventStatus, TrackingEvent};

/// Downtown Los Angeles, ±0.025° on both axes.
pub const DEFAULT_AREA: GeoBounds = GeoBounds::new(LatLng::new(34.0522, -118.2437), 0.025, 0.025);
pub const DEFAULT_ACTIVE_PROBABILITY: f64 = 0.7;
pub const DEFAULT_MAX_AGE_MINUTES: u32 = 59;

#[derive(Clone, Debug, PartialEq)]
pub struct GeneratorConfig {
    /// Every generated location falls inside this box.
    pub area: GeoBounds,
    /// Chance that a fresh event is active rather than resolved.
    pub active_probability: f64,
    /// Timestamps are drawn from `now - [0, max_age_minutes]`.
    pub max_age_minutes: u32,
    pub catalog: Catalog,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            area: DEFAULT_AREA,
            active_probability: DEFAULT_ACTIVE_PROBABILITY,
            max_age_minutes: DEFAULT_MAX_AGE_MINUTES,
            catalog: Catalog::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.area.center.is_valid() {
            return Err(ConfigError::CenterOutOfRange(self.area.center));
        }
        if !self.area.is_valid() {
            return Err(ConfigError::InvalidRadius {
                lat: self.area.radius_lat,
                lng: self.area.radius_lng,
            });
        }
        if !(0.0..=1.0).contains(&self.active_probability) {
            return Err(ConfigError::InvalidProbability(self.active_probability));
        }
        if self.max_age_minutes >= 24 * 60 {
            return Err(ConfigError::InvalidMaxAge(self.max_age_minutes));
        }
        self.catalog.validate()
    }
}

/// Anything that can hand the simulation fresh events.
///
/// Sources may fail; the simulation treats a failure as "nothing arrived
/// this cycle" rather than stopping.
pub trait EventSource {
    fn try_generate(
        &mut self,
        rng: &mut dyn RngCore,
        count: usize,
    ) -> Result<Vec<TrackingEvent>, SimError>;
}

/// Random event generator over a validated [`GeneratorConfig`].
pub struct EventGenerator {
    config: GeneratorConfig,
    clock: Box<dyn WallClock + Send>,
}

impl std::fmt::Debug for EventGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventGenerator")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl EventGenerator {
    /// Generator stamping events with the local system time.
    pub fn new(config: GeneratorConfig) -> Result<Self, ConfigError> {
        Self::with_clock(config, SystemWallClock)
    }

    pub fn with_clock(
        config: GeneratorConfig,
        clock: impl WallClock + Send + 'static,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            clock: Box::new(clock),
        })
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Returns exactly `count` fresh events, each sampled independently.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Vec<TrackingEvent> {
        let now = self.clock.now();
        (0..count).map(|_| self.sample(rng, now)).collect()
    }

    fn sample<R: Rng + ?Sized>(&self, rng: &mut R, now: ClockTime) -> TrackingEvent {
        // Pools are non-empty and the area stays on the globe: checked in `with_clock`.
        let categories = self.config.catalog.categories();
        let category = &categories[rng.gen_range(0..categories.len())];
        let title = category.titles[rng.gen_range(0..category.titles.len())].clone();

        let descriptions = self.config.catalog.descriptions();
        let description = descriptions[rng.gen_range(0..descriptions.len())].clone();

        let status = if rng.gen_bool(self.config.active_probability) {
            EventStatus::Active
        } else {
            EventStatus::Resolved
        };

        let area = &self.config.area;
        let location = LatLng::new(
            rng.gen_range(area.lat_range()),
            rng.gen_range(area.lng_range()),
        );

        let age = rng.gen_range(0..=self.config.max_age_minutes);

        TrackingEvent {
            id: EventId::random(rng),
            title,
            description,
            status,
            kind: category.kind,
            timestamp: now.minus_minutes(age),
            location,
        }
    }
}

impl EventSource for EventGenerator {
    fn try_generate(
        &mut self,
        rng: &mut dyn RngCore,
        count: usize,
    ) -> Result<Vec<TrackingEvent>, SimError> {
        Ok(self.generate(rng, count))
    }
}
