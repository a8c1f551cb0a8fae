//! The collector loop: a panel and a tank joined by a pumped water circuit.

use crate::error::{SimError, SimResult};
use crate::panel::Panel;
use crate::report::StatusLine;
use crate::tank::Tank;
use sl_core::constants::SECONDS_PER_MINUTE;
use sl_core::units::{Time, VolumeRate, lps, s};
use sl_core::{ensure_non_negative, ensure_positive};

/// Options for the loop driver.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOptions {
    /// Pump flow rate (L/s)
    pub flow_rate_lps: f64,
    /// Fixed sub-step (seconds)
    pub dt_s: f64,
    /// Sub-steps between status reports
    pub steps_per_tick: usize,
    /// Wall-clock pause after each tick (seconds)
    pub tick_delay_s: f64,
}

impl Default for SimOptions {
    fn default() -> Self {
        Self {
            flow_rate_lps: 0.25,
            dt_s: 0.1,
            steps_per_tick: 600,
            tick_delay_s: 1.0,
        }
    }
}

impl SimOptions {
    /// Check the options against a tank of `tank_volume_l` liters.
    ///
    /// A zero flow rate would divide by zero in the panel's outlet
    /// temperature, and pumping more than the tank volume in one sub-step
    /// would make the mixing ratio non-physical. Both are refused here.
    pub fn validate(&self, tank_volume_l: f64) -> SimResult<()> {
        ensure_positive(self.flow_rate_lps, "flow_rate_lps must be positive")?;
        ensure_positive(self.dt_s, "dt_s must be positive")?;
        ensure_non_negative(self.tick_delay_s, "tick_delay_s must be non-negative")?;
        if self.steps_per_tick == 0 {
            return Err(SimError::InvalidArg {
                what: "steps_per_tick must be positive",
            });
        }
        if self.flow_rate_lps * self.dt_s > tank_volume_l {
            return Err(SimError::NonPhysical {
                what: "volume pumped per sub-step exceeds tank volume",
            });
        }
        Ok(())
    }

    /// Simulated seconds covered by one tick.
    pub fn tick_s(&self) -> f64 {
        self.dt_s * self.steps_per_tick as f64
    }

    pub fn flow_rate(&self) -> VolumeRate {
        lps(self.flow_rate_lps)
    }
}

/// Driver state: owns the panel and the tank and the simulated clock.
///
/// Building a `SolarLoop` only validates and stores state. Nothing runs until
/// [`SolarLoop::advance_one_step`], [`SolarLoop::run_tick`] or one of the
/// runners in [`crate::sim`] is called.
#[derive(Clone, Debug)]
pub struct SolarLoop {
    panel: Panel,
    tank: Tank,
    opts: SimOptions,
    time_s: f64,
    steps: u64,
}

impl SolarLoop {
    pub fn new(panel: Panel, tank: Tank, opts: SimOptions) -> SimResult<Self> {
        opts.validate(tank.volume_l)?;
        tracing::debug!(
            flow_rate_lps = opts.flow_rate_lps,
            dt_s = opts.dt_s,
            steps_per_tick = opts.steps_per_tick,
            tick_delay_s = opts.tick_delay_s,
            "solar loop built"
        );
        Ok(Self {
            panel,
            tank,
            opts,
            time_s: 0.0,
            steps: 0,
        })
    }

    /// Reference panel and tank with the given options.
    pub fn with_options(opts: SimOptions) -> SimResult<Self> {
        Self::new(Panel::default(), Tank::default(), opts)
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn tank(&self) -> &Tank {
        &self.tank
    }

    pub fn options(&self) -> &SimOptions {
        &self.opts
    }

    /// Elapsed simulated time (seconds). Advances once per completed tick.
    pub fn time_s(&self) -> f64 {
        self.time_s
    }

    pub fn elapsed(&self) -> Time {
        s(self.time_s)
    }

    /// Total sub-steps taken.
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// One coupled sub-step.
    ///
    /// Both inflows are read before either body is updated: the tank mixes in
    /// the panel's outlet from the previous sub-step, and the panel sees the
    /// tank temperature from the previous sub-step.
    pub fn advance_one_step(&mut self) {
        let water_to_panel_k = self.tank.temp_k;
        let water_to_tank_k = self.panel.water_out_temp_k;

        self.tank
            .advance(water_to_tank_k, self.opts.flow_rate_lps, self.opts.dt_s);
        self.panel
            .advance(self.opts.dt_s, water_to_panel_k, self.opts.flow_rate_lps);
        self.steps += 1;
    }

    /// Run the sub-steps of one tick without moving the clock.
    pub fn step_tick(&mut self) {
        let tank_before_k = self.tank.temp_k;
        for _ in 0..self.opts.steps_per_tick {
            self.advance_one_step();
        }
        tracing::debug!(
            steps = self.steps,
            panel_temp_k = self.panel.temp_k,
            tank_temp_k = self.tank.temp_k,
            tank_heat_gained_j = self.tank.heat_gained_j(tank_before_k),
            "tick stepped"
        );
    }

    /// Move the simulated clock forward by one tick.
    pub fn advance_clock(&mut self) {
        self.time_s += self.opts.tick_s();
    }

    /// Step a full tick and advance the clock.
    pub fn run_tick(&mut self) {
        self.step_tick();
        self.advance_clock();
    }

    /// Snapshot for reporting.
    pub fn status(&self) -> StatusLine {
        StatusLine {
            elapsed_min: self.time_s / SECONDS_PER_MINUTE,
            panel_temp_k: self.panel.temp_k,
            tank_temp_k: self.tank.temp_k,
            water_in_temp_k: self.panel.water_in_temp_k,
            water_out_temp_k: self.panel.water_out_temp_k,
        }
    }
}
