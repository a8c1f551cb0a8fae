//! Wall-clock pacing between reporting ticks.
//!
//! Pacing only shapes how fast output appears; simulated time advances the
//! same way whichever pacer is used.

use std::time::Duration;

/// Decides how to wait between ticks.
pub trait Pacer {
    fn pause(&mut self, delay_s: f64);
}

/// Sleep the current thread for the requested delay.
#[derive(Clone, Copy, Debug, Default)]
pub struct WallClock;

impl Pacer for WallClock {
    fn pause(&mut self, delay_s: f64) {
        // Negative or non-finite delays do not sleep.
        let delay = Duration::try_from_secs_f64(delay_s).unwrap_or_default();
        if !delay.is_zero() {
            std::thread::sleep(delay);
        }
    }
}

/// Never wait; used for batch runs and tests.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&mut self, _delay_s: f64) {}
}
