use std::time::Duration;

use crate::config::EnrollmentConfig;

pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000);
pub const DEFAULT_SUCCESS_AUTO_CLOSE: Duration = Duration::from_millis(2000);

/// Timing rules for one enrollment session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnrollmentPolicy {
    /// Maximum number of status queries before `TimedOut`.
    pub max_attempts: u32,
    /// Fixed delay between the end of one poll and the next.
    pub poll_interval: Duration,
    /// How long the success panel stays up before the view closes itself.
    pub success_auto_close: Duration,
}

impl Default for EnrollmentPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            poll_interval: DEFAULT_POLL_INTERVAL,
            success_auto_close: DEFAULT_SUCCESS_AUTO_CLOSE,
        }
    }
}

impl EnrollmentPolicy {
    /// Resolve policy from the raw config section; zero means "not configured".
    pub fn from_config(config: &EnrollmentConfig) -> Self {
        let defaults = Self::default();
        Self {
            max_attempts: if config.max_attempts == 0 {
                defaults.max_attempts
            } else {
                config.max_attempts
            },
            poll_interval: if config.poll_interval_ms == 0 {
                defaults.poll_interval
            } else {
                Duration::from_millis(config.poll_interval_ms)
            },
            success_auto_close: if config.success_auto_close_ms == 0 {
                defaults.success_auto_close
            } else {
                Duration::from_millis(config.success_auto_close_ms)
            },
        }
    }

    /// Client-side timeout: the whole attempt budget.
    pub fn budget(&self) -> Duration {
        self.poll_interval.saturating_mul(self.max_attempts)
    }
}
