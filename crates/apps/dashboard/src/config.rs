use std::env::{self, VarError};

use clap::Parser;
use tracking::{
    DEFAULT_ARRIVAL_PERIOD_MS, DEFAULT_FEED_CAPACITY, DEFAULT_PULSE_PERIOD_MS, DEFAULT_SEED_COUNT,
    FilterMode, SimulationConfig,
};

pub const SEED_ENV: &str = "DASHBOARD_SEED";

#[derive(Parser, Debug)]
#[command(author, version, about = "Terminal dashboard over a simulated tracking-event feed")]
pub struct Args {
    /// RNG seed for a replayable run (falls back to DASHBOARD_SEED, then OS entropy)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Events generated at startup
    #[arg(long, default_value_t = DEFAULT_SEED_COUNT)]
    pub initial_events: usize,

    /// Maximum events kept in the feed
    #[arg(long, default_value_t = DEFAULT_FEED_CAPACITY)]
    pub capacity: usize,

    /// Milliseconds between event arrivals
    #[arg(long, default_value_t = DEFAULT_ARRIVAL_PERIOD_MS)]
    pub arrival_ms: u64,

    /// Milliseconds between signal-bar pulses
    #[arg(long, default_value_t = DEFAULT_PULSE_PERIOD_MS)]
    pub pulse_ms: u64,

    /// Frame length of the driving loop, in milliseconds
    #[arg(long, default_value_t = 250)]
    pub frame_ms: u64,

    /// Stop after this many seconds instead of waiting for Ctrl-C
    #[arg(long)]
    pub run_for_secs: Option<u64>,

    /// Event log filter: all, active or resolved
    #[arg(long, default_value = "all")]
    pub filter: FilterMode,

    /// Print one JSON snapshot per feed change instead of text panels
    #[arg(long)]
    pub json: bool,
}

impl Args {
    /// The `--seed` flag, else `DASHBOARD_SEED`. A set but malformed
    /// variable is an error rather than a silent fall back to entropy.
    pub fn seed(&self) -> Result<Option<u64>, String> {
        if self.seed.is_some() {
            return Ok(self.seed);
        }
        match env::var(SEED_ENV) {
            Ok(raw) => parse_seed(&raw).map(Some),
            Err(VarError::NotPresent) => Ok(None),
            Err(err) => Err(format!("{SEED_ENV}: {err}")),
        }
    }

    pub fn simulation_config(&self) -> Result<SimulationConfig, String> {
        Ok(SimulationConfig {
            capacity: self.capacity,
            seed_count: self.initial_events,
            arrival_period_ms: self.arrival_ms,
            pulse_period_ms: self.pulse_ms,
            rng_seed: self.seed()?,
            filter: self.filter,
            ..SimulationConfig::default()
        })
    }

    /// Frame length clamped to at least one millisecond.
    pub fn frame_ms(&self) -> u64 {
        self.frame_ms.max(1)
    }
}

fn parse_seed(raw: &str) -> Result<u64, String> {
    raw.trim()
        .parse()
        .map_err(|err| format!("{SEED_ENV}={raw:?} is not a valid seed: {err}"))
}
