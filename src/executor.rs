//! Retry execution engine
//!
//! This module provides the core retry execution logic with configurable
//! policies, reset hooks, and observers.

use std::error::Error;
use std::time::Instant;

use crate::error::RetryError;
use crate::observer::{NoOpObserver, RetryObserver};
use crate::policy::RetryPolicy;
use crate::reset::{ClosureReset, NoReset, ResetHook};

/// Execute an operation with retry logic based on a policy
///
/// This is a convenience function for simple retry scenarios. For more
/// control, use `RetryExecutorBuilder`.
///
/// # Arguments
///
/// * `policy` - The retry policy to use
/// * `op` - A closure representing the operation; arguments are captured
///   by the closure and reused identically on every attempt
///
/// # Returns
///
/// The result of the operation, or a `RetryError` if all attempts fail.
///
/// # Example
///
/// ```rust,no_run
/// use retry_harness::{retry_with_policy, RetryPolicy};
///
/// fn example() {
///     let policy = RetryPolicy::new(3);
///
///     let result = retry_with_policy(&policy, || {
///         // Simulated operation that might fail
///         Ok::<_, std::io::Error>("success")
///     });
/// }
/// ```
pub fn retry_with_policy<F, T, E>(policy: &RetryPolicy, op: F) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
    E: Error + Send + 'static,
{
    RetryExecutor::new(policy.clone()).execute(op)
}

/// Execute an operation with retry logic and a reset hook
///
/// The hook runs after each failed attempt while attempts remain; its
/// failure aborts the sequence with `RetryError::ResetFailed`.
///
/// # Example
///
/// ```rust,no_run
/// use retry_harness::{retry_with_reset, RetryPolicy};
///
/// fn example() {
///     let policy = RetryPolicy::new(3);
///
///     let result = retry_with_reset(
///         &policy,
///         || Ok::<_, std::io::Error>("success"),
///         || {
///             // Cleanup before the next attempt
///             Ok(())
///         },
///     );
/// }
/// ```
pub fn retry_with_reset<F, R, T, E>(
    policy: &RetryPolicy,
    op: F,
    reset: R,
) -> Result<T, RetryError<E>>
where
    F: FnMut() -> Result<T, E>,
    R: Fn() -> Result<(), E> + Send + Sync,
    E: Error + Send + 'static,
{
    RetryExecutorBuilder::new()
        .with_policy(policy.clone())
        .with_reset(ClosureReset::new(reset))
        .build()
        .execute(op)
}

/// Builder for configuring a `RetryExecutor`
///
/// # Example
///
/// ```rust
/// use retry_harness::{RetryExecutorBuilder, RetryPolicy, TracingObserver};
///
/// let executor = RetryExecutorBuilder::new()
///     .with_policy(RetryPolicy::new(3))
///     .with_observer(TracingObserver::new("download"))
///     .build();
/// ```
pub struct RetryExecutorBuilder<R = NoReset, O = NoOpObserver> {
    policy: RetryPolicy,
    reset: R,
    observer: O,
}

impl Default for RetryExecutorBuilder<NoReset, NoOpObserver> {
    fn default() -> Self {
        Self::new()
    }
}

impl RetryExecutorBuilder<NoReset, NoOpObserver> {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self {
            policy: RetryPolicy::default(),
            reset: NoReset,
            observer: NoOpObserver,
        }
    }
}

impl<R, O> RetryExecutorBuilder<R, O> {
    /// Set the retry policy
    pub fn with_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the attempt budget, keeping the rest of the policy
    pub fn with_attempts(mut self, max_attempts: u32) -> Self {
        self.policy.max_attempts = max_attempts;
        self
    }

    /// Set the reset hook
    ///
    /// The hook runs between a failed attempt and the next retry.
    pub fn with_reset<R2>(self, reset: R2) -> RetryExecutorBuilder<R2, O> {
        RetryExecutorBuilder {
            policy: self.policy,
            reset,
            observer: self.observer,
        }
    }

    /// Set the observer
    ///
    /// The observer receives callbacks during retry execution.
    pub fn with_observer<O2>(self, observer: O2) -> RetryExecutorBuilder<R, O2> {
        RetryExecutorBuilder {
            policy: self.policy,
            reset: self.reset,
            observer,
        }
    }

    /// Build the executor
    pub fn build(self) -> RetryExecutor<R, O> {
        RetryExecutor {
            policy: self.policy,
            reset: self.reset,
            observer: self.observer,
        }
    }
}

/// A retry executor with configurable policy, reset hook, and observer
///
/// Use `RetryExecutorBuilder` to create a customized instance.
pub struct RetryExecutor<R = NoReset, O = NoOpObserver> {
    policy: RetryPolicy,
    reset: R,
    observer: O,
}

impl RetryExecutor<NoReset, NoOpObserver> {
    /// Create an executor with the given policy, no reset hook, and no
    /// observation
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy,
            reset: NoReset,
            observer: NoOpObserver,
        }
    }
}

impl<R, O> RetryExecutor<R, O>
where
    O: RetryObserver,
{
    /// Execute an operation with retry logic
    ///
    /// The operation runs up to `max_attempts` times; the first normal
    /// return wins. Each call to `execute` starts its attempt counter
    /// fresh; no state is shared across calls.
    ///
    /// # Returns
    ///
    /// The result of the operation, `RetryError::Exhausted` when the
    /// attempt budget is spent, or `RetryError::ResetFailed` when the
    /// reset hook errors between attempts.
    pub fn execute<F, T, E>(&self, mut op: F) -> Result<T, RetryError<E>>
    where
        F: FnMut() -> Result<T, E>,
        E: Error + Send + 'static,
        R: ResetHook<E>,
    {
        let start = Instant::now();
        let mut last_error: Option<E> = None;

        for attempt in 1..=self.policy.max_attempts {
            self.observer
                .on_attempt_start(attempt, self.policy.max_attempts);

            match op() {
                Ok(result) => {
                    self.observer.on_success(attempt, start.elapsed());
                    return Ok(result);
                }
                Err(err) => {
                    // Every failed attempt is reported, the final one included
                    self.observer.on_attempt_failed(attempt, &err);

                    // The hook never runs after the final attempt
                    if attempt < self.policy.max_attempts {
                        if let Err(reset_err) = self.reset.reset() {
                            self.observer.on_reset_failed(attempt, &reset_err);
                            return Err(RetryError::reset_failed(attempt, reset_err));
                        }
                    }

                    last_error = Some(err);
                }
            }
        }

        self.observer.on_exhausted(
            self.policy.max_attempts,
            last_error.as_ref().map(|e| e as &dyn Error),
        );

        Err(RetryError::exhausted(
            self.policy.max_attempts,
            last_error,
            start.elapsed(),
        ))
    }
}

/// Extension trait adding retry execution directly to fallible closures
///
/// # Example
///
/// ```rust,no_run
/// use retry_harness::{Retryable, RetryPolicy};
///
/// fn example() {
///     let policy = RetryPolicy::new(3);
///
///     let result = (|| Ok::<_, std::io::Error>("success")).retry(&policy);
/// }
/// ```
pub trait Retryable<T, E> {
    /// Run the closure under the given policy
    fn retry(self, policy: &RetryPolicy) -> Result<T, RetryError<E>>;
}

impl<F, T, E> Retryable<T, E> for F
where
    F: FnMut() -> Result<T, E>,
    E: Error + Send + 'static,
{
    fn retry(self, policy: &RetryPolicy) -> Result<T, RetryError<E>> {
        retry_with_policy(policy, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::observer::StatsObserver;
    use std::io;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_immediate_success() {
        let observer = Arc::new(StatsObserver::new());

        let result: Result<&str, RetryError<io::Error>> = RetryExecutorBuilder::new()
            .with_attempts(3)
            .with_observer(observer.clone())
            .build()
            .execute(|| Ok("success"));

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "success");
        assert_eq!(observer.attempt_starts(), 1);
        assert_eq!(observer.successes(), 1);
        assert_eq!(observer.failures(), 0);
    }

    #[test]
    fn test_success_after_retry() {
        let observer = Arc::new(StatsObserver::new());
        let attempts = AtomicU32::new(0);

        let result: Result<&str, RetryError<io::Error>> = RetryExecutorBuilder::new()
            .with_attempts(3)
            .with_observer(observer.clone())
            .build()
            .execute(|| {
                let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
                if attempt < 2 {
                    Err(io::Error::new(io::ErrorKind::TimedOut, "timeout"))
                } else {
                    Ok("success")
                }
            });

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "success");
        assert_eq!(observer.attempt_starts(), 2);
        assert_eq!(observer.failures(), 1);
        assert_eq!(observer.successes(), 1);
    }

    #[test]
    fn test_all_attempts_exhausted() {
        let observer = Arc::new(StatsObserver::new());

        let result: Result<&str, RetryError<io::Error>> = RetryExecutorBuilder::new()
            .with_attempts(3)
            .with_observer(observer.clone())
            .build()
            .execute(|| Err(io::Error::new(io::ErrorKind::TimedOut, "always fails")));

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(err.attempts(), 3);
        assert_eq!(observer.attempt_starts(), 3);
        assert_eq!(observer.failures(), 3); // Every failed attempt is reported
        assert_eq!(observer.exhaustions(), 1);
    }

    #[test]
    fn test_reset_hook_runs_between_attempts() {
        let resets = Arc::new(AtomicU32::new(0));
        let resets_clone = resets.clone();

        let result: Result<&str, RetryError<io::Error>> = RetryExecutorBuilder::new()
            .with_attempts(3)
            .with_reset(ClosureReset::new(move || {
                resets_clone.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }))
            .build()
            .execute(|| Err(io::Error::new(io::ErrorKind::Other, "always fails")));

        assert!(result.is_err());
        // Never after the final attempt
        assert_eq!(resets.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_reset_hook_failure_aborts() {
        let observer = Arc::new(StatsObserver::new());
        let attempts = AtomicU32::new(0);

        let result: Result<&str, RetryError<io::Error>> = RetryExecutorBuilder::new()
            .with_attempts(3)
            .with_reset(ClosureReset::new(|| {
                Err(io::Error::new(io::ErrorKind::Other, "cleanup failed"))
            }))
            .with_observer(observer.clone())
            .build()
            .execute(|| {
                attempts.fetch_add(1, Ordering::SeqCst);
                Err(io::Error::new(io::ErrorKind::Other, "op failed"))
            });

        let err = result.unwrap_err();
        assert!(err.is_reset_failed());
        assert_eq!(err.attempts(), 1);
        assert_eq!(attempts.load(Ordering::SeqCst), 1);
        assert_eq!(observer.reset_failures(), 1);
        assert_eq!(observer.exhaustions(), 0);
    }

    #[test]
    fn test_retry_with_policy_convenience() {
        let policy = RetryPolicy::new(3);
        let attempts = AtomicU32::new(0);

        let result = retry_with_policy(&policy, || {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt < 2 {
                Err(io::Error::new(io::ErrorKind::TimedOut, "timeout"))
            } else {
                Ok("success")
            }
        });

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), "success");
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_zero_max_attempts() {
        let policy = RetryPolicy::new(0);
        let calls = AtomicU32::new(0);

        let result: Result<&str, RetryError<io::Error>> = retry_with_policy(&policy, || {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(io::Error::new(io::ErrorKind::Other, "error"))
        });

        // With a zero budget, the operation is never invoked
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let err = result.unwrap_err();
        assert!(err.is_exhausted());
        assert_eq!(err.attempts(), 0);
        assert!(err.into_source().is_none());
    }

    #[test]
    fn test_single_attempt() {
        let observer = Arc::new(StatsObserver::new());

        let result: Result<&str, RetryError<io::Error>> = RetryExecutorBuilder::new()
            .with_policy(RetryPolicy::default())
            .with_observer(observer.clone())
            .build()
            .execute(|| Err(io::Error::new(io::ErrorKind::Other, "error")));

        assert!(result.is_err());
        assert!(result.unwrap_err().is_exhausted());
        assert_eq!(observer.attempt_starts(), 1);
        assert_eq!(observer.failures(), 1);
        assert_eq!(observer.exhaustions(), 1);
    }

    #[test]
    fn test_retryable_extension() {
        let policy = RetryPolicy::new(2);
        let attempts = AtomicU32::new(0);

        let result = (|| {
            let attempt = attempts.fetch_add(1, Ordering::SeqCst) + 1;
            if attempt == 1 {
                Err(io::Error::new(io::ErrorKind::Other, "first failure"))
            } else {
                Ok(42)
            }
        })
        .retry(&policy);

        assert_eq!(result.unwrap(), 42);
        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }
}
