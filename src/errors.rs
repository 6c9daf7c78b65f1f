// src/errors.rs

// error handling for the leaky limiter type

// dependencies
use std::error::Error;
use std::fmt;

use crate::clock::ClockError;

/// Error type for LeakyLimiter configuration and clock issues.
#[non_exhaustive]
#[derive(Debug)]
pub enum LeakyLimiterError {
    InvalidBoost,           // for boost factors below 1.0, NaN or infinite
    ClockError(ClockError), // error variant for issues with the clock
}

// implement the Display trait for the LeakyLimiterError type
impl fmt::Display for LeakyLimiterError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LeakyLimiterError::InvalidBoost => {
                write!(f, "Boost factor must be a finite number of at least 1.0")
            }
            LeakyLimiterError::ClockError(e) => write!(f, "Clock error occurred: {}", e),
        }
    }
}

// implement the Error trait for the LeakyLimiterError type
impl Error for LeakyLimiterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            LeakyLimiterError::ClockError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ClockError> for LeakyLimiterError {
    fn from(e: ClockError) -> Self {
        LeakyLimiterError::ClockError(e)
    }
}
