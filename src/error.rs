//! Error types for the retry execution engine
//!
//! This module defines the errors a retried operation can surface to its
//! caller: exhaustion of the attempt budget, or a reset hook failure that
//! aborted the sequence.

use std::error::Error;
use std::fmt;
use std::time::Duration;

/// Errors that can occur during retry execution
///
/// The error type is generic over `E`, the underlying error type from the
/// operation being retried.
#[derive(Debug)]
pub enum RetryError<E> {
    /// All retry attempts have been exhausted
    ///
    /// Returned when the attempt budget has been spent and the operation
    /// still failed. `last_error` is `None` only when the budget was zero,
    /// in which case the operation was never invoked.
    Exhausted {
        /// Number of attempts made before giving up
        attempts: u32,
        /// The error from the final attempt, if any attempt was made
        last_error: Option<E>,
        /// Total duration spent across all attempts
        total_duration: Duration,
    },

    /// The reset hook failed between attempts
    ///
    /// The hook's error is carried unmodified; no further attempts were
    /// made after the failure.
    ResetFailed {
        /// The attempt after which the hook ran and failed
        attempt: u32,
        /// The error returned by the hook
        source: E,
    },
}

impl<E: fmt::Display> fmt::Display for RetryError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryError::Exhausted {
                attempts,
                last_error,
                total_duration,
            } => {
                if let Some(err) = last_error {
                    write!(
                        f,
                        "retry exhausted after {} attempts over {:.2}s: {}",
                        attempts,
                        total_duration.as_secs_f64(),
                        err
                    )
                } else {
                    write!(f, "retry exhausted after {} attempts", attempts)
                }
            }
            RetryError::ResetFailed { attempt, source } => {
                write!(f, "reset hook failed after attempt {}: {}", attempt, source)
            }
        }
    }
}

impl<E: Error + 'static> Error for RetryError<E> {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            RetryError::Exhausted {
                last_error: Some(err),
                ..
            } => Some(err),
            RetryError::ResetFailed { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl<E> RetryError<E> {
    /// Create a new exhausted error
    pub fn exhausted(attempts: u32, last_error: Option<E>, total_duration: Duration) -> Self {
        RetryError::Exhausted {
            attempts,
            last_error,
            total_duration,
        }
    }

    /// Create a new reset failure error
    pub fn reset_failed(attempt: u32, source: E) -> Self {
        RetryError::ResetFailed { attempt, source }
    }

    /// Get the number of attempts made
    pub fn attempts(&self) -> u32 {
        match self {
            RetryError::Exhausted { attempts, .. } => *attempts,
            RetryError::ResetFailed { attempt, .. } => *attempt,
        }
    }

    /// Check if this error indicates all attempts were exhausted
    pub fn is_exhausted(&self) -> bool {
        matches!(self, RetryError::Exhausted { .. })
    }

    /// Check if this error indicates a reset hook failure
    pub fn is_reset_failed(&self) -> bool {
        matches!(self, RetryError::ResetFailed { .. })
    }

    /// Get the underlying error, consuming this error
    pub fn into_source(self) -> Option<E> {
        match self {
            RetryError::Exhausted { last_error, .. } => last_error,
            RetryError::ResetFailed { source, .. } => Some(source),
        }
    }

    /// Get a reference to the underlying error
    pub fn source_ref(&self) -> Option<&E> {
        match self {
            RetryError::Exhausted { last_error, .. } => last_error.as_ref(),
            RetryError::ResetFailed { source, .. } => Some(source),
        }
    }

    /// Map the error type using a closure
    pub fn map_err<F, E2>(self, f: F) -> RetryError<E2>
    where
        F: FnOnce(E) -> E2,
    {
        match self {
            RetryError::Exhausted {
                attempts,
                last_error,
                total_duration,
            } => RetryError::Exhausted {
                attempts,
                last_error: last_error.map(f),
                total_duration,
            },
            RetryError::ResetFailed { attempt, source } => RetryError::ResetFailed {
                attempt,
                source: f(source),
            },
        }
    }
}
