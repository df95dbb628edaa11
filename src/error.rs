// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the pricers and their reporting helpers
#[derive(Debug, Error)]
pub enum PricingError {
    /// A contract field is out of its admissible domain
    #[error("Invalid contract parameter '{parameter}' = {value}: {constraint}")]
    InvalidContract {
        parameter: String,
        value: f64,
        constraint: String,
    },

    /// Requested sample count cannot be simulated
    #[error("Invalid sample count {requested}: {reason}")]
    InvalidSampleCount { requested: i64, reason: String },

    /// A computed quantity left the finite range
    #[error("Numerical instability in {method}: {reason}")]
    NumericalInstability { method: String, reason: String },

    /// Invalid analysis configuration (histogram bins, size lists, ...)
    #[error("Invalid configuration for '{field}': {reason}")]
    InvalidConfiguration { field: String, reason: String },

    /// Report could not be written
    #[error("Failed to write '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Validation utilities
pub mod validation {
    use super::{PricingError, PricingResult};

    /// Upper bound on a single simulation's sample count
    pub const MAX_SAMPLE_COUNT: i64 = 1_000_000_000;

    /// Validate that a contract parameter is finite and strictly positive
    pub fn validate_positive(name: &str, value: f64) -> PricingResult<()> {
        validate_finite(name, value)?;
        if value <= 0.0 {
            Err(PricingError::InvalidContract {
                parameter: name.to_string(),
                value,
                constraint: "must be positive (> 0)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate that a contract parameter is finite and not NaN
    pub fn validate_finite(name: &str, value: f64) -> PricingResult<()> {
        if !value.is_finite() {
            Err(PricingError::InvalidContract {
                parameter: name.to_string(),
                value,
                constraint: "must be finite (not NaN or infinite)".to_string(),
            })
        } else {
            Ok(())
        }
    }

    /// Validate a sample count and convert it to a buffer length
    pub fn validate_sample_count(requested: i64) -> PricingResult<usize> {
        if requested <= 0 {
            Err(PricingError::InvalidSampleCount {
                requested,
                reason: "must be greater than 0".to_string(),
            })
        } else if requested > MAX_SAMPLE_COUNT {
            Err(PricingError::InvalidSampleCount {
                requested,
                reason: format!("exceeds maximum allowed ({})", MAX_SAMPLE_COUNT),
            })
        } else {
            usize::try_from(requested).map_err(|_| PricingError::InvalidSampleCount {
                requested,
                reason: "does not fit in the platform's address space".to_string(),
            })
        }
    }
}
