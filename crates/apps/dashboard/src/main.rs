mod config;
mod render;

use std::io::{self, Write};
use std::time::Duration;

use clap::Parser;
use foundation::geo::GeoBounds;
use runtime::frame::Frame;
use runtime::scheduler::{Scheduler, Tick};
use tokio::time::{Instant, MissedTickBehavior};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;
use tracking::{METRIC_RESPONSE_TIME, Simulation, TickOutcome};

use crate::config::Args;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Logs go to stderr so stdout stays a clean panel or JSON stream.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let args = Args::parse();
    let config = args.simulation_config()?;
    let area = config.generator.area;
    info!(seed = ?config.rng_seed, capacity = config.capacity, "starting dashboard");

    let mut sim = Simulation::new(config)?;
    let mut scheduler = Scheduler::new();
    sim.start(&mut scheduler)?;
    present(&sim, area, args.json)?;

    let frame_ms = args.frame_ms();
    let mut frame = Frame::new(0, frame_ms);
    let mut interval = tokio::time::interval(Duration::from_millis(frame_ms));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let deadline = args
        .run_for_secs
        .map(|secs| Instant::now() + Duration::from_secs(secs));
    let run_out = async move {
        match deadline {
            Some(at) => tokio::time::sleep_until(at).await,
            None => std::future::pending().await,
        }
    };
    tokio::pin!(run_out);
    let interrupt = tokio::signal::ctrl_c();
    tokio::pin!(interrupt);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                frame = frame.next();
                let ticks = scheduler.run_frame(frame);
                if dispatch(&mut sim, &ticks, args.json) {
                    present(&sim, area, args.json)?;
                }
            }
            res = &mut interrupt => {
                if let Err(err) = res {
                    warn!(%err, "failed to listen for ctrl-c");
                }
                info!("interrupted");
                break;
            }
            _ = &mut run_out => {
                info!("run time elapsed");
                break;
            }
        }
    }

    sim.stop(&mut scheduler);
    let metrics = sim.metrics().snapshot();
    info!(
        counters = ?metrics.counters,
        gauges = ?metrics.gauges,
        response_time_mean = ?sim
            .metrics()
            .histogram(METRIC_RESPONSE_TIME)
            .and_then(|h| h.mean()),
        dropped_changes = sim.changes().dropped(),
        "final metrics"
    );
    Ok(())
}

/// Feeds due ticks to the simulation. Returns `true` when the view changed:
/// any arrival, or a pulse while drawing text panels.
fn dispatch(sim: &mut Simulation, ticks: &[Tick], json: bool) -> bool {
    let mut redraw = false;
    for tick in ticks {
        match sim.on_tick(tick) {
            TickOutcome::Arrived { .. } => redraw = true,
            TickOutcome::Pulsed { .. } => redraw |= !json,
            TickOutcome::ArrivalSkipped | TickOutcome::Ignored => {}
        }
    }
    redraw
}

fn present(
    sim: &Simulation,
    area: GeoBounds,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", render::render_json(sim)?)?;
    } else {
        write!(out, "{CLEAR_SCREEN}{}", render::render(sim, area))?;
    }
    out.flush()?;
    Ok(())
}
