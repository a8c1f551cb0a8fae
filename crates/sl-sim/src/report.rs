//! Status lines and the sinks that receive them.

use std::fmt;
use std::io::Write;

use crate::error::SimResult;
use sl_core::round_to;

/// One report of the loop state, taken at the start of a tick.
///
/// Temperatures are kept unrounded; `Display` rounds them to two decimals.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct StatusLine {
    /// Elapsed simulated time (minutes)
    pub elapsed_min: f64,
    /// Panel temperature (K)
    pub panel_temp_k: f64,
    /// Tank temperature (K)
    pub tank_temp_k: f64,
    /// Water entering the panel (K)
    ///
    /// This is the tank temperature from the previous sub-step.
    pub water_in_temp_k: f64,
    /// Water leaving the panel (K)
    pub water_out_temp_k: f64,
}

impl fmt::Display for StatusLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}min Panel Temp: {}, Tank Temp: {}, Water to/from panel: {}/{}",
            Decimal(self.elapsed_min),
            Decimal(round_to(self.panel_temp_k, 2)),
            Decimal(round_to(self.tank_temp_k, 2)),
            Decimal(round_to(self.water_in_temp_k, 2)),
            Decimal(round_to(self.water_out_temp_k, 2)),
        )
    }
}

/// Shortest round-trip rendering that keeps a trailing `.0` on whole numbers.
///
/// Magnitudes below 1e-4 or from 1e16 up switch to exponent form with a signed
/// exponent of at least two digits (`1.5e-07`, `1e+16`).
struct Decimal(f64);

impl fmt::Display for Decimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let v = self.0;
        if v.is_nan() {
            f.write_str("nan")
        } else if v.is_infinite() {
            f.write_str(if v > 0.0 { "inf" } else { "-inf" })
        } else if v != 0.0 && (v.abs() < 1e-4 || v.abs() >= 1e16) {
            let sci = format!("{v:e}");
            let (mantissa, exp) = sci.split_once('e').unwrap_or((&sci, "0"));
            let exp: i32 = exp.parse().unwrap_or(0);
            let sign = if exp < 0 { '-' } else { '+' };
            write!(f, "{mantissa}e{sign}{:02}", exp.unsigned_abs())
        } else if v.fract() == 0.0 && v.abs() < 1e16 {
            write!(f, "{v:.1}")
        } else {
            write!(f, "{v}")
        }
    }
}

/// Receiver of status lines.
pub trait StatusSink {
    fn emit(&mut self, line: &StatusLine) -> SimResult<()>;
}

/// Collect every line in memory.
impl StatusSink for Vec<StatusLine> {
    fn emit(&mut self, line: &StatusLine) -> SimResult<()> {
        self.push(line.clone());
        Ok(())
    }
}

/// Adapt a closure into a sink.
pub struct FnSink<F>(pub F);

impl<F: FnMut(&StatusLine)> StatusSink for FnSink<F> {
    fn emit(&mut self, line: &StatusLine) -> SimResult<()> {
        (self.0)(line);
        Ok(())
    }
}

/// Write one line per status to any `io::Write`.
pub struct WriterSink<W> {
    out: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> StatusSink for WriterSink<W> {
    fn emit(&mut self, line: &StatusLine) -> SimResult<()> {
        writeln!(self.out, "{line}")?;
        self.out.flush()?;
        Ok(())
    }
}

/// Emit each status line as a `tracing` info event.
#[derive(Clone, Copy, Debug, Default)]
pub struct TraceSink;

impl StatusSink for TraceSink {
    fn emit(&mut self, line: &StatusLine) -> SimResult<()> {
        tracing::info!(
            elapsed_min = line.elapsed_min,
            panel_temp_k = line.panel_temp_k,
            tank_temp_k = line.tank_temp_k,
            "{line}"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reference_line() -> StatusLine {
        StatusLine {
            elapsed_min: 0.0,
            panel_temp_k: 320.0,
            tank_temp_k: 295.0,
            water_in_temp_k: 295.0,
            water_out_temp_k: 296.0,
        }
    }

    #[test]
    fn initial_line_text() {
        assert_eq!(
            reference_line().to_string(),
            "0.0min Panel Temp: 320.0, Tank Temp: 295.0, Water to/from panel: 295.0/296.0"
        );
    }

    #[test]
    fn temperatures_round_to_two_places() {
        let line = StatusLine {
            elapsed_min: 1.0,
            panel_temp_k: 313.799_871,
            tank_temp_k: 295.099_8,
            water_in_temp_k: 295.099_6,
            water_out_temp_k: 296.001_2,
        };
        assert_eq!(
            line.to_string(),
            "1.0min Panel Temp: 313.8, Tank Temp: 295.1, Water to/from panel: 295.1/296.0"
        );
    }

    #[test]
    fn elapsed_minutes_are_not_rounded() {
        let line = StatusLine {
            elapsed_min: 0.1 / 60.0,
            ..reference_line()
        };
        assert!(line.to_string().starts_with("0.0016666666666666668min"));
    }

    #[test]
    fn tiny_and_huge_minutes_use_exponent_form() {
        let tiny = StatusLine {
            elapsed_min: 1e-5 / 60.0,
            ..reference_line()
        };
        assert!(tiny.to_string().starts_with("1.6666666666666668e-07min "));

        assert_eq!(Decimal(1e-4).to_string(), "0.0001");
        assert_eq!(Decimal(5e-5).to_string(), "5e-05");
        assert_eq!(Decimal(1e16).to_string(), "1e+16");
        assert_eq!(Decimal(-2.5e120).to_string(), "-2.5e+120");
        assert_eq!(Decimal(9.5e15).to_string(), "9500000000000000.0");
        assert_eq!(Decimal(0.0).to_string(), "0.0");
    }

    #[test]
    fn non_finite_values_render() {
        let line = StatusLine {
            water_out_temp_k: f64::INFINITY,
            panel_temp_k: f64::NAN,
            ..reference_line()
        };
        let text = line.to_string();
        assert!(text.contains("Panel Temp: nan"));
        assert!(text.ends_with("/inf"));
    }

    #[test]
    fn writer_sink_writes_lines() {
        let mut sink = WriterSink::new(Vec::new());
        sink.emit(&reference_line()).unwrap();
        sink.emit(&reference_line()).unwrap();
        let text = String::from_utf8(sink.into_inner()).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with("0.0min Panel Temp: 320.0"));
    }

    #[test]
    fn fn_sink_and_vec_sink() {
        let mut seen = 0;
        let mut sink = FnSink(|_: &StatusLine| seen += 1);
        sink.emit(&reference_line()).unwrap();
        sink.emit(&reference_line()).unwrap();
        drop(sink);
        assert_eq!(seen, 2);

        let mut lines: Vec<StatusLine> = Vec::new();
        lines.emit(&reference_line()).unwrap();
        assert_eq!(lines, vec![reference_line()]);

        assert!(TraceSink.emit(&reference_line()).is_ok());
    }
}
