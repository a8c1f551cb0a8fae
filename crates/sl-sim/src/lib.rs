//! Lumped-parameter simulation of a solar collector loop.
//!
//! Provides:
//! - `Panel`: collector heated by the sun, cooled by air and circulating water
//! - `Tank`: fully mixed, insulated storage tank
//! - `SolarLoop`: driver that couples both with a one-step lag and keeps the clock
//! - Status lines, output sinks and wall-clock pacing
//! - Batch (`run_sim`) and live (`run_live`) runners

pub mod error;
pub mod pacing;
pub mod panel;
pub mod report;
pub mod sim;
pub mod solar_loop;
pub mod tank;

// Re-exports for public API
pub use error::{SimError, SimResult};
pub use pacing::{NoDelay, Pacer, WallClock};
pub use panel::{Panel, PanelParams};
pub use report::{FnSink, StatusLine, StatusSink, TraceSink, WriterSink};
pub use sim::{SimRecord, run_live, run_sim};
pub use solar_loop::{SimOptions, SolarLoop};
pub use tank::{Tank, TankParams};
