use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use runtime::event_bus::EventBus;
use runtime::metrics::Metrics;
use runtime::scheduler::{Scheduler, Tick, TickerId};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::error::{ConfigError, SimError};
use crate::event::{EventId, TrackingEvent};
use crate::feed::{DEFAULT_FEED_CAPACITY, Feed};
use crate::filter::{FilterMode, FilterView};
use crate::generator::{EventGenerator, EventSource, GeneratorConfig};
use crate::selection::Selection;
use crate::statistics::{FeedStatistics, StatisticsAggregator};

pub const ARRIVAL_TICKER: &str = "arrival";
pub const PULSE_TICKER: &str = "pulse";

pub const DEFAULT_ARRIVAL_PERIOD_MS: u64 = 8_000;
pub const DEFAULT_PULSE_PERIOD_MS: u64 = 1_000;
pub const DEFAULT_SEED_COUNT: usize = 8;

// Change-log kinds.
pub const KIND_SEED: &str = "feed.seed";
pub const KIND_ARRIVE: &str = "feed.arrive";
pub const KIND_EVICT: &str = "feed.evict";
pub const KIND_SELECT: &str = "selection";
pub const KIND_FILTER: &str = "filter";
pub const KIND_GENERATION_FAILED: &str = "generation.failed";

/// Changes kept in the log before the oldest are dropped.
pub const CHANGE_LOG_LIMIT: usize = 256;

// Metric names.
pub const METRIC_ARRIVALS: &str = "arrivals";
pub const METRIC_EVICTIONS: &str = "evictions";
pub const METRIC_GENERATION_FAILURES: &str = "generation_failures";
pub const METRIC_FEED_LEN: &str = "feed_len";
pub const METRIC_RESPONSE_TIME: &str = "response_time_min";

#[derive(Clone, Debug, PartialEq)]
pub struct SimulationConfig {
    pub generator: GeneratorConfig,
    pub capacity: usize,
    /// Events generated at startup.
    pub seed_count: usize,
    pub arrival_period_ms: u64,
    pub pulse_period_ms: u64,
    /// Fixed seed for replayable runs; `None` seeds from OS entropy.
    pub rng_seed: Option<u64>,
    pub filter: FilterMode,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            generator: GeneratorConfig::default(),
            capacity: DEFAULT_FEED_CAPACITY,
            seed_count: DEFAULT_SEED_COUNT,
            arrival_period_ms: DEFAULT_ARRIVAL_PERIOD_MS,
            pulse_period_ms: DEFAULT_PULSE_PERIOD_MS,
            rng_seed: None,
            filter: FilterMode::All,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.generator.validate()?;
        if self.capacity == 0 {
            return Err(ConfigError::ZeroCapacity);
        }
        Ok(())
    }
}

/// What a single tick did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Arrived { evicted: usize },
    /// The source failed; nothing arrived this cycle.
    ArrivalSkipped,
    Pulsed { on: bool },
    /// Not one of ours, or the simulation was stopped.
    Ignored,
}

/// Read model handed to renderers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub version: u64,
    pub filter: FilterMode,
    pub events: Vec<TrackingEvent>,
    pub visible: Vec<EventId>,
    pub selected: Option<TrackingEvent>,
    pub selection_detached: bool,
    pub statistics: FeedStatistics,
    pub pulse: bool,
}

/// Owns the feed and everything derived from it.
///
/// All state changes go through `seed`, `arrive`, `select` and `set_filter`.
/// Statistics are refreshed right after each feed mutation. Timers are not
/// owned here: [`Simulation::start`] registers tickers on a caller-supplied
/// [`Scheduler`], and the caller feeds due ticks back via
/// [`Simulation::on_tick`].
pub struct Simulation {
    source: Box<dyn EventSource + Send>,
    rng: ChaCha8Rng,
    feed: Feed,
    selection: Selection,
    filter: FilterView,
    stats: StatisticsAggregator,
    arrival_period_ms: u64,
    pulse_period_ms: u64,
    arrival_ticker: Option<TickerId>,
    pulse_ticker: Option<TickerId>,
    pulse: bool,
    now_ms: u64,
    changes: EventBus,
    metrics: Metrics,
}

impl Simulation {
    /// Simulation over the random [`EventGenerator`], stamped with local time.
    pub fn new(config: SimulationConfig) -> Result<Self, SimError> {
        let generator = EventGenerator::new(config.generator.clone())?;
        Self::with_source(config, generator)
    }

    /// Simulation over any event source. The initial seed is drawn from it
    /// immediately, so a failing source fails construction.
    pub fn with_source(
        config: SimulationConfig,
        source: impl EventSource + Send + 'static,
    ) -> Result<Self, SimError> {
        config.validate()?;
        let rng = match config.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };

        let mut sim = Self {
            source: Box::new(source),
            rng,
            feed: Feed::new(config.capacity)?,
            selection: Selection::new(),
            filter: FilterView::new(config.filter),
            stats: StatisticsAggregator::new(),
            arrival_period_ms: config.arrival_period_ms,
            pulse_period_ms: config.pulse_period_ms,
            arrival_ticker: None,
            pulse_ticker: None,
            pulse: false,
            now_ms: 0,
            changes: EventBus::bounded(CHANGE_LOG_LIMIT),
            metrics: Metrics::new(),
        };
        sim.seed(config.seed_count)?;
        Ok(sim)
    }

    /// Replaces the feed with `count` fresh events and selects the first.
    pub fn seed(&mut self, count: usize) -> Result<(), SimError> {
        let events = self.source.try_generate(&mut self.rng, count)?;
        self.feed.seed(events);
        self.selection.on_seed(&self.feed);
        self.after_feed_change();

        info!(
            requested = count,
            len = self.feed.len(),
            selected = ?self.selection.id(),
            "feed seeded"
        );
        self.changes.emit(
            self.now_ms,
            KIND_SEED,
            format!("{} events", self.feed.len()),
        );
        Ok(())
    }

    /// Prepends `event`, trimming the oldest beyond capacity. The selection
    /// is left alone even if its event is among the evicted.
    pub fn arrive(&mut self, event: TrackingEvent) -> Vec<TrackingEvent> {
        let id = event.id.clone();
        let evicted = self.feed.arrive(event);
        self.after_feed_change();

        self.metrics.inc(METRIC_ARRIVALS);
        self.metrics.inc_by(METRIC_EVICTIONS, evicted.len() as u64);
        self.changes.emit(self.now_ms, KIND_ARRIVE, id.to_string());
        for gone in &evicted {
            self.changes.emit(self.now_ms, KIND_EVICT, gone.id.to_string());
        }
        if self.selection.is_detached(&self.feed) {
            debug!(selected = ?self.selection.id(), "selected event no longer in feed");
        }
        debug!(%id, evicted = evicted.len(), len = self.feed.len(), "event arrived");
        evicted
    }

    /// Selects `event` unconditionally; see [`Selection::select`].
    pub fn select(&mut self, event: TrackingEvent) {
        let id = event.id.clone();
        if self.selection.select(event) {
            self.changes.emit(self.now_ms, KIND_SELECT, id.to_string());
        }
    }

    /// Selects the feed event with `id`. Returns `false` (and leaves the
    /// selection alone) when the feed does not hold it.
    pub fn select_id(&mut self, id: &EventId) -> bool {
        let Some(event) = self.feed.find(id).cloned() else {
            return false;
        };
        self.select(event);
        true
    }

    pub fn clear_selection(&mut self) {
        if !self.selection.is_empty() {
            self.selection.clear();
            self.changes.emit(self.now_ms, KIND_SELECT, "none");
        }
    }

    pub fn set_filter(&mut self, mode: FilterMode) {
        if self.filter.set_mode(mode) {
            self.changes.emit(self.now_ms, KIND_FILTER, mode.as_str());
        }
    }

    /// Registers the arrival and pulse tickers. Calling it again while
    /// running is a no-op.
    pub fn start(&mut self, scheduler: &mut Scheduler) -> Result<(), SimError> {
        if self.is_running() {
            return Ok(());
        }
        let arrival = scheduler.schedule_every(ARRIVAL_TICKER, self.arrival_period_ms)?;
        let pulse = match scheduler.schedule_every(PULSE_TICKER, self.pulse_period_ms) {
            Ok(id) => id,
            Err(err) => {
                scheduler.cancel(arrival);
                return Err(err.into());
            }
        };
        self.arrival_ticker = Some(arrival);
        self.pulse_ticker = Some(pulse);
        info!(
            arrival_ms = self.arrival_period_ms,
            pulse_ms = self.pulse_period_ms,
            "simulation started"
        );
        Ok(())
    }

    /// Cancels both tickers. Ticks already collected from the scheduler but
    /// not yet dispatched are ignored by [`Simulation::on_tick`].
    pub fn stop(&mut self, scheduler: &mut Scheduler) {
        let was_running = self.is_running();
        for id in [self.arrival_ticker.take(), self.pulse_ticker.take()]
            .into_iter()
            .flatten()
        {
            scheduler.cancel(id);
        }
        if was_running {
            info!(
                arrivals = self.metrics.counter(METRIC_ARRIVALS),
                "simulation stopped"
            );
        }
    }

    pub fn is_running(&self) -> bool {
        self.arrival_ticker.is_some()
    }

    pub fn on_tick(&mut self, tick: &Tick) -> TickOutcome {
        if Some(tick.ticker) == self.arrival_ticker {
            self.now_ms = tick.due_ms;
            self.on_arrival_tick()
        } else if Some(tick.ticker) == self.pulse_ticker {
            self.now_ms = tick.due_ms;
            self.pulse = !self.pulse;
            TickOutcome::Pulsed { on: self.pulse }
        } else {
            TickOutcome::Ignored
        }
    }

    fn on_arrival_tick(&mut self) -> TickOutcome {
        let generated = self.source.try_generate(&mut self.rng, 1);
        match generated.map(|mut events| events.pop()) {
            Ok(Some(event)) => {
                let evicted = self.arrive(event);
                TickOutcome::Arrived {
                    evicted: evicted.len(),
                }
            }
            Ok(None) => self.skip_arrival("source returned no event"),
            Err(err) => self.skip_arrival(&err.to_string()),
        }
    }

    fn skip_arrival(&mut self, reason: &str) -> TickOutcome {
        warn!(reason, "arrival skipped");
        self.metrics.inc(METRIC_GENERATION_FAILURES);
        self.changes
            .emit(self.now_ms, KIND_GENERATION_FAILED, reason.to_string());
        TickOutcome::ArrivalSkipped
    }

    fn after_feed_change(&mut self) {
        if self.stats.refresh(&self.feed, &mut self.rng) {
            self.metrics.record(
                METRIC_RESPONSE_TIME,
                self.stats.current().response_time_min as i64,
            );
        }
        self.metrics
            .set_gauge(METRIC_FEED_LEN, self.feed.len() as i64);
    }

    pub fn feed(&self) -> &Feed {
        &self.feed
    }

    /// The feed through the current filter.
    pub fn visible(&self) -> Vec<&TrackingEvent> {
        self.filter.apply(&self.feed)
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn selected(&self) -> Option<&TrackingEvent> {
        self.selection.get()
    }

    pub fn is_selection_detached(&self) -> bool {
        self.selection.is_detached(&self.feed)
    }

    pub fn filter_mode(&self) -> FilterMode {
        self.filter.mode()
    }

    pub fn statistics(&self) -> FeedStatistics {
        self.stats.current()
    }

    pub fn statistics_recomputations(&self) -> u64 {
        self.stats.recomputations()
    }

    pub fn pulse(&self) -> bool {
        self.pulse
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn changes(&self) -> &EventBus {
        &self.changes
    }

    pub fn changes_mut(&mut self) -> &mut EventBus {
        &mut self.changes
    }

    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            version: self.feed.version(),
            filter: self.filter.mode(),
            events: self.feed.events().to_vec(),
            visible: self.visible().into_iter().map(|e| e.id.clone()).collect(),
            selected: self.selection.get().cloned(),
            selection_detached: self.is_selection_detached(),
            statistics: self.stats.current(),
            pulse: self.pulse,
        }
    }
}
