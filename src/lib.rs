//! # retry-harness
//!
//! Synchronous retry execution engine with policy-based configuration.
//!
//! Wraps any fallible operation with an attempt budget, reports each failed
//! attempt through an observer, optionally runs a reset hook between
//! attempts, and surfaces exhaustion as a typed error instead of a silent
//! absent value.
//!
//! # Features
//!
//! - Attempt budget via [`RetryPolicy`] (default: a single attempt)
//! - Observable retry attempts via the [`RetryObserver`] trait
//! - Built-in [`TracingObserver`] for logging
//! - Reset hooks run between failed attempts via the [`ResetHook`] trait
//! - Builder pattern for flexible executor configuration
//! - Thread-safe with Send + Sync bounds
//!
//! # Example
//!
//! ```rust,no_run
//! use retry_harness::{retry_with_policy, RetryError, RetryPolicy};
//!
//! fn example() -> Result<String, RetryError<std::io::Error>> {
//!     let policy = RetryPolicy::new(3);
//!
//!     retry_with_policy(&policy, || {
//!         // Your fallible operation here
//!         Ok("success".to_string())
//!     })
//! }
//! ```

pub mod error;
pub mod executor;
pub mod observer;
pub mod policy;
pub mod reset;

pub use error::RetryError;
pub use executor::{
    retry_with_policy, retry_with_reset, RetryExecutor, RetryExecutorBuilder, Retryable,
};
pub use observer::{NoOpObserver, RetryObserver, StatsObserver, TracingObserver};
pub use policy::RetryPolicy;
pub use reset::{ClosureReset, NoReset, ResetHook};
