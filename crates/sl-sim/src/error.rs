//! Error types for simulation operations.

use thiserror::Error;

/// Errors encountered while building or running the collector loop.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Non-physical condition: {what}")]
    NonPhysical { what: &'static str },

    #[error("Status sink failed: {0}")]
    Report(#[from] std::io::Error),

    #[error("Backend error: {message}")]
    Backend { message: String },
}

pub type SimResult<T> = Result<T, SimError>;

impl From<sl_core::SlError> for SimError {
    fn from(e: sl_core::SlError) -> Self {
        match e {
            sl_core::SlError::InvalidArg { what, .. } => SimError::InvalidArg { what },
            sl_core::SlError::NonFinite { what, .. } => SimError::NonPhysical { what },
        }
    }
}
