//! Simulation runners and result recording.

use crate::error::{SimError, SimResult};
use crate::pacing::Pacer;
use crate::report::{StatusLine, StatusSink};
use crate::solar_loop::SolarLoop;

/// Record of a batch run: one status per tick boundary.
#[derive(Clone, Debug, Default)]
pub struct SimRecord {
    /// Time points (seconds)
    pub t: Vec<f64>,
    /// Status at each time point
    pub x: Vec<StatusLine>,
}

impl SimRecord {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    /// Index and status of the coldest recorded panel temperature.
    pub fn min_panel(&self) -> Option<(usize, &StatusLine)> {
        self.x
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.panel_temp_k.total_cmp(&b.panel_temp_k))
    }

    pub fn last(&self) -> Option<&StatusLine> {
        self.x.last()
    }
}

/// Run `ticks` ticks without pacing and record the state at every tick boundary.
///
/// The record holds `ticks + 1` entries: the state before the first tick and
/// after each one.
pub fn run_sim(sim: &mut SolarLoop, ticks: usize) -> SimResult<SimRecord> {
    if ticks == 0 {
        return Err(SimError::InvalidArg {
            what: "ticks must be positive",
        });
    }

    let mut record = SimRecord {
        t: Vec::with_capacity(ticks + 1),
        x: Vec::with_capacity(ticks + 1),
    };
    record.t.push(sim.time_s());
    record.x.push(sim.status());

    for _ in 0..ticks {
        sim.run_tick();
        record.t.push(sim.time_s());
        record.x.push(sim.status());
    }

    tracing::info!(
        ticks,
        steps = sim.steps(),
        sim_time_s = sim.time_s(),
        "batch run finished"
    );
    Ok(record)
}

/// Report, step, pause and advance the clock, tick after tick.
///
/// With `max_ticks = None` this only returns on a sink error; the process is
/// expected to be interrupted. Returns the number of ticks completed.
pub fn run_live<S, P>(
    sim: &mut SolarLoop,
    sink: &mut S,
    pacer: &mut P,
    max_ticks: Option<usize>,
) -> SimResult<usize>
where
    S: StatusSink + ?Sized,
    P: Pacer + ?Sized,
{
    let delay_s = sim.options().tick_delay_s;
    tracing::info!(
        ?max_ticks,
        tick_s = sim.options().tick_s(),
        delay_s,
        "live run started"
    );

    let mut ticks = 0;
    while max_ticks.is_none_or(|max| ticks < max) {
        sink.emit(&sim.status())?;
        sim.step_tick();
        pacer.pause(delay_s);
        sim.advance_clock();
        ticks += 1;
    }

    tracing::info!(ticks, sim_time_s = sim.time_s(), "live run stopped");
    Ok(ticks)
}
