//! sl-core: shared foundation for solarloop.
//!
//! Contains:
//! - units (uom SI types, constructors and physical constants)
//! - numeric (float guards and decimal rounding)
//! - error (shared error type)
//! - timing (wall-clock timer for runs)

pub mod error;
pub mod numeric;
pub mod timing;
pub mod units;

pub use error::{SlError, SlResult};
pub use numeric::*;
pub use units::*;
