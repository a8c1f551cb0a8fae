//! Lightweight wall-clock timing for simulation runs.
//!
//! Timing is always measured; whether it is reported is up to the caller.
//! `stop_and_log` emits a `tracing` debug event so it stays silent unless
//! the subscriber enables it.

use std::time::Instant;

/// A simple timer that measures elapsed wall-clock time.
pub struct Timer {
    label: &'static str,
    start: Instant,
}

impl Timer {
    /// Create and start a new timer with the given label.
    pub fn start(label: &'static str) -> Self {
        Self {
            label,
            start: Instant::now(),
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Elapsed time in seconds without stopping.
    pub fn elapsed_s(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }

    /// Stop the timer and return elapsed time in seconds.
    pub fn stop(self) -> f64 {
        self.elapsed_s()
    }

    /// Stop the timer and log the result.
    pub fn stop_and_log(self) -> f64 {
        let label = self.label;
        let elapsed = self.stop();
        tracing::debug!(label, elapsed_s = elapsed, "timer stopped");
        elapsed
    }
}

/// Average wall-clock cost of a repeated unit of work.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Throughput {
    pub total_s: f64,
    pub count: u64,
}

impl Throughput {
    pub fn new(total_s: f64, count: u64) -> Self {
        Self { total_s, count }
    }

    /// Units completed per wall-clock second.
    pub fn per_second(&self) -> f64 {
        if self.total_s > 0.0 {
            self.count as f64 / self.total_s
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timer_measures_non_negative_time() {
        let timer = Timer::start("test");
        assert_eq!(timer.label(), "test");
        assert!(timer.elapsed_s() >= 0.0);
        assert!(timer.stop_and_log() >= 0.0);
    }

    #[test]
    fn throughput_per_second() {
        let t = Throughput::new(2.0, 4);
        assert!((t.per_second() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn throughput_empty_is_zero() {
        let t = Throughput::default();
        assert_eq!(t.count, 0);
        assert_eq!(t.per_second(), 0.0);
    }
}
