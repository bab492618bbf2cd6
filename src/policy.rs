//! Retry policy configuration

use serde::{Deserialize, Serialize};

/// Retry policy for an operation
///
/// The policy carries the attempt budget: the total number of invocations
/// of the target operation, including the initial one. A budget of zero is
/// permitted and results in an immediate exhaustion without invoking the
/// operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct RetryPolicy {
    /// Maximum number of invocation attempts before giving up
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,
}

impl RetryPolicy {
    /// Create a policy with the given attempt budget
    pub fn new(max_attempts: u32) -> Self {
        Self { max_attempts }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
        }
    }
}

fn default_max_attempts() -> u32 {
    1
}
