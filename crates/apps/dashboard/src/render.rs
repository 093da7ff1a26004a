//! Text panels for the dashboard: event log, area map and detail card.

use std::fmt::Write as _;

use foundation::geo::GeoBounds;
use foundation::math::LocalProjection;
use tracking::{EventStatus, FeedStatistics, Simulation, TrackingEvent};

pub const MAP_COLS: usize = 41;
pub const MAP_ROWS: usize = 15;

pub const RECENT_CHANGES: usize = 5;

const SIGNAL_BARS: usize = 5;

/// Character grid covering `area`, north up.
#[derive(Debug, Clone)]
pub struct MapGrid {
    area: GeoBounds,
    projection: LocalProjection,
    cols: usize,
    rows: usize,
    cells: Vec<char>,
}

impl MapGrid {
    pub fn new(area: GeoBounds, cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            area,
            projection: LocalProjection::new(area.center, 1.0),
            cols,
            rows,
            cells: vec!['.'; cols * rows],
        }
    }

    /// `(col, row)` of the cell holding `event`. Locations outside the
    /// area are clamped onto its border.
    pub fn cell_of(&self, event: &TrackingEvent) -> (usize, usize) {
        let p = self.projection.project(event.location);
        let col = scale(p.east, self.area.radius_lng, self.cols);
        let row = self.rows - 1 - scale(p.north, self.area.radius_lat, self.rows);
        (col, row)
    }

    pub fn plot(&mut self, event: &TrackingEvent, marker: char) {
        let (col, row) = self.cell_of(event);
        self.cells[row * self.cols + col] = marker;
    }

    pub fn get(&self, col: usize, row: usize) -> Option<char> {
        (col < self.cols && row < self.rows).then(|| self.cells[row * self.cols + col])
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.cells.chunks(self.cols).map(|row| row.iter().collect())
    }
}

/// Maps an offset in `-radius..=radius` onto `0..cells`.
fn scale(offset: f64, radius: f64, cells: usize) -> usize {
    if radius <= 0.0 || cells == 1 {
        return cells / 2;
    }
    let t = ((offset + radius) / (2.0 * radius)).clamp(0.0, 1.0);
    (t * (cells - 1) as f64).round() as usize
}

pub fn marker(event: &TrackingEvent, selected: bool) -> char {
    match (selected, event.status) {
        (true, _) => '@',
        (false, EventStatus::Active) => '*',
        (false, EventStatus::Resolved) => 'o',
    }
}

pub fn render_map(sim: &Simulation, area: GeoBounds) -> String {
    let mut grid = MapGrid::new(area, MAP_COLS, MAP_ROWS);
    let selected = sim.selection().id();

    // Resolved first so active markers win shared cells; the selection last.
    let mut events: Vec<&TrackingEvent> = sim.feed().iter().collect();
    events.sort_by_key(|e| e.is_active());
    for event in events {
        grid.plot(event, marker(event, false));
    }
    if let Some(event) = sim.selected().filter(|e| sim.feed().contains(&e.id)) {
        grid.plot(event, marker(event, true));
    }

    let mut out = String::new();
    let _ = writeln!(out, "Map ({} events)", sim.feed().len());
    for line in grid.lines() {
        let _ = writeln!(out, "  {line}");
    }
    let _ = writeln!(
        out,
        "  @ selected  * active  o resolved{}",
        if selected.is_some() && sim.is_selection_detached() {
            "  (selected event off the feed)"
        } else {
            ""
        }
    );
    out
}

pub fn render_log(sim: &Simulation) -> String {
    let visible = sim.visible();
    let selected = sim.selection().id();

    let mut out = String::new();
    let _ = writeln!(
        out,
        "Event Log [{}] {}/{} ({} shown)",
        sim.filter_mode().label(),
        sim.feed().len(),
        sim.feed().capacity(),
        visible.len()
    );
    if visible.is_empty() {
        let _ = writeln!(out, "  (no events)");
    }
    for event in visible {
        let cursor = if Some(&event.id) == selected { '>' } else { ' ' };
        let _ = writeln!(
            out,
            "{cursor} {}  {}  {:<11}  {:<8}  {}",
            event.id,
            event.timestamp,
            event.status.label(),
            event.kind.as_str().to_uppercase(),
            event.title
        );
    }
    out
}

pub fn render_statistics(stats: FeedStatistics) -> String {
    format!(
        "Active: {}  Resolved: {}  Avg Response: {}m\n",
        stats.active, stats.resolved, stats.response_time_min
    )
}

/// Signal strength bar; alternates with the pulse.
pub fn signal_bar(pulse: bool) -> String {
    let lit = if pulse { SIGNAL_BARS } else { SIGNAL_BARS - 2 };
    format!("[{}{}]", "#".repeat(lit), " ".repeat(SIGNAL_BARS - lit))
}

pub fn render_detail(sim: &Simulation) -> String {
    let mut out = render_statistics(sim.statistics());
    let Some(event) = sim.selected() else {
        out.push_str("Select an event to view details\n");
        return out;
    };

    let _ = writeln!(out, "{} ({})", event.title, event.id);
    let _ = writeln!(
        out,
        "  Status: {}  Type: {}  Time: {}",
        event.status.label(),
        event.kind,
        event.timestamp
    );
    let _ = writeln!(out, "  {}", event.description);
    let _ = writeln!(
        out,
        "  Location: {:.4}, {:.4}",
        event.location.lat, event.location.lng
    );
    if sim.is_selection_detached() {
        let _ = writeln!(out, "  (no longer in the feed)");
    }
    if event.is_active() {
        let _ = writeln!(out, "Live Tracking Data {}", signal_bar(sim.pulse()));
    }
    out
}

/// Newest changes first, stamped with virtual seconds.
pub fn render_changes(sim: &Simulation, n: usize) -> String {
    let mut out = String::from("Recent changes\n");
    for change in sim.changes().recent(n) {
        let _ = writeln!(
            out,
            "  {:>7.1}s  {:<17} {}",
            change.at_ms as f64 / 1_000.0,
            change.kind,
            change.message
        );
    }
    out
}

pub fn render(sim: &Simulation, area: GeoBounds) -> String {
    let mut out = String::new();
    out.push_str(&render_log(sim));
    out.push('\n');
    out.push_str(&render_map(sim, area));
    out.push('\n');
    out.push_str(&render_detail(sim));
    out.push('\n');
    out.push_str(&render_changes(sim, RECENT_CHANGES));
    out
}

pub fn render_json(sim: &Simulation) -> serde_json::Result<String> {
    serde_json::to_string(&sim.snapshot())
}
