//! Bounded retry policy shared by session acquisition and output polling.

use std::time::Duration;

/// An attempt budget with a fixed pause between attempts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Maximum number of attempts before giving up.
    pub max_attempts: u32,
    /// Pause inserted after a failed attempt.
    pub delay: Duration,
}

impl RetryPolicy {
    /// Create a policy with the given budget and pause.
    pub const fn new(max_attempts: u32, delay: Duration) -> Self {
        Self { max_attempts, delay }
    }

    /// A policy that never pauses — for tests and in-memory transports.
    pub const fn immediate(max_attempts: u32) -> Self {
        Self::new(max_attempts, Duration::ZERO)
    }

    /// Block for the configured delay.
    pub fn pause(&self) {
        if !self.delay.is_zero() {
            std::thread::sleep(self.delay);
        }
    }
}

impl Default for RetryPolicy {
    /// Five attempts, five seconds apart — the session acquisition budget.
    fn default() -> Self {
        Self::new(crate::session::MAX_SESSION_RETRIES, Duration::from_secs(5))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_attempts, 5);
        assert_eq!(policy.delay, Duration::from_secs(5));
    }

    #[test]
    fn test_immediate_policy() {
        let policy = RetryPolicy::immediate(3);
        assert_eq!(policy.max_attempts, 3);
        assert!(policy.delay.is_zero());
    }

    #[test]
    fn test_pause_with_zero_delay_returns() {
        // Must not block the test run.
        RetryPolicy::immediate(1).pause();
    }
}
