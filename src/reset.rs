//! Reset hooks run between failed attempts
//!
//! A reset hook performs caller-supplied cleanup or validation after a
//! failed attempt, before the next one starts. It never runs after the
//! final attempt, and its failure aborts the retry sequence.

/// A hook invoked between a failed attempt and the next retry
///
/// Any state the hook needs is captured by its closure, the same
/// convention as the target operation itself.
///
/// # Example
///
/// ```rust
/// use retry_harness::ResetHook;
///
/// struct ReopenConnection {
///     // Your connection handle here
/// }
///
/// impl ResetHook<std::io::Error> for ReopenConnection {
///     fn reset(&self) -> Result<(), std::io::Error> {
///         // Tear down and re-establish state before the next attempt
///         Ok(())
///     }
/// }
/// ```
pub trait ResetHook<E>: Send + Sync {
    /// Run the hook before the next attempt
    ///
    /// An `Err` aborts the retry sequence; the error is surfaced to the
    /// caller unmodified.
    fn reset(&self) -> Result<(), E>;
}

/// A hook that does nothing (the default: no cleanup between attempts)
#[derive(Debug, Clone, Copy, Default)]
pub struct NoReset;

impl<E> ResetHook<E> for NoReset {
    fn reset(&self) -> Result<(), E> {
        Ok(())
    }
}

/// A hook backed by a closure
pub struct ClosureReset<F> {
    hook: F,
}

impl<F> ClosureReset<F> {
    /// Create a new closure-based reset hook
    pub fn new(hook: F) -> Self {
        Self { hook }
    }
}

impl<E, F> ResetHook<E> for ClosureReset<F>
where
    F: Fn() -> Result<(), E> + Send + Sync,
{
    fn reset(&self) -> Result<(), E> {
        (self.hook)()
    }
}
