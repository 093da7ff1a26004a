use std::fmt;

use crate::frame::Frame;

/// Handle to a periodic ticker registered with a [`Scheduler`].
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TickerId(u64);

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct InvalidPeriod {
    pub name: &'static str,
}

impl fmt::Display for InvalidPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ticker `{}` needs a period greater than zero", self.name)
    }
}

impl std::error::Error for InvalidPeriod {}

/// One firing of a ticker.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Tick {
    pub ticker: TickerId,
    pub name: &'static str,
    /// Virtual time the tick was due at.
    pub due_ms: u64,
    /// 1-based firing count for this ticker.
    pub sequence: u64,
}

#[derive(Debug)]
struct Ticker {
    id: TickerId,
    name: &'static str,
    period_ms: u64,
    next_due_ms: u64,
    fired: u64,
}

/// Virtual-time scheduler for periodic tickers.
///
/// Nothing here reads a real clock: time only moves when the owner calls
/// [`Scheduler::advance_to`] (or one of its wrappers). Due ticks are returned
/// rather than dispatched, ordered by `(due_ms, ticker id)`, so the owner
/// decides what to run and replays stay deterministic.
///
/// A ticker registered at time `t` with period `p` is first due at `t + p`,
/// then every `p` after that. Advancing past several periods yields every
/// missed tick.
#[derive(Debug, Default)]
pub struct Scheduler {
    now_ms: u64,
    next_id: u64,
    tickers: Vec<Ticker>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    pub fn schedule_every(
        &mut self,
        name: &'static str,
        period_ms: u64,
    ) -> Result<TickerId, InvalidPeriod> {
        if period_ms == 0 {
            return Err(InvalidPeriod { name });
        }
        let id = TickerId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.tickers.push(Ticker {
            id,
            name,
            period_ms,
            next_due_ms: self.now_ms.saturating_add(period_ms),
            fired: 0,
        });
        Ok(id)
    }

    /// Removes the ticker. Returns `true` if it was still registered.
    pub fn cancel(&mut self, id: TickerId) -> bool {
        let before = self.tickers.len();
        self.tickers.retain(|t| t.id != id);
        self.tickers.len() != before
    }

    pub fn is_active(&self, id: TickerId) -> bool {
        self.tickers.iter().any(|t| t.id == id)
    }

    pub fn active_count(&self) -> usize {
        self.tickers.len()
    }

    /// Earliest pending due time across all tickers.
    pub fn next_due_ms(&self) -> Option<u64> {
        self.tickers.iter().map(|t| t.next_due_ms).min()
    }

    pub fn advance_by(&mut self, elapsed_ms: u64) -> Vec<Tick> {
        self.advance_to(self.now_ms.saturating_add(elapsed_ms))
    }

    /// Moves virtual time forward to `target_ms` and collects every tick due
    /// at or before it. Time never moves backwards; an earlier target is a
    /// no-op.
    pub fn advance_to(&mut self, target_ms: u64) -> Vec<Tick> {
        if target_ms <= self.now_ms {
            return Vec::new();
        }

        let mut due = Vec::new();
        let mut exhausted = Vec::new();
        for ticker in &mut self.tickers {
            while ticker.next_due_ms <= target_ms {
                ticker.fired += 1;
                due.push(Tick {
                    ticker: ticker.id,
                    name: ticker.name,
                    due_ms: ticker.next_due_ms,
                    sequence: ticker.fired,
                });
                match ticker.next_due_ms.checked_add(ticker.period_ms) {
                    Some(next) => ticker.next_due_ms = next,
                    None => {
                        exhausted.push(ticker.id);
                        break;
                    }
                }
            }
        }
        // A ticker whose next firing is past the end of time is retired.
        self.tickers.retain(|t| !exhausted.contains(&t.id));

        due.sort_by(|a, b| {
            a.due_ms
                .cmp(&b.due_ms)
                .then_with(|| a.ticker.cmp(&b.ticker))
        });
        self.now_ms = target_ms;
        due
    }

    /// Advances to the start of `frame`.
    pub fn run_frame(&mut self, frame: Frame) -> Vec<Tick> {
        self.advance_to(frame.time_ms)
    }
}
