use std::time::Duration;

use crate::enrollment::EnrollmentOutcome;
use crate::ids::{DeviceToken, UserId};

/// Side effects produced by state transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentAction {
    /// Ask the store to open a session.
    BeginEnrollment {
        user_id: UserId,
        device_token: DeviceToken,
    },
    /// Arm the single poll timer.
    SchedulePoll { delay: Duration },
    /// Issue one status query.
    QueryEnrollment {
        user_id: UserId,
        device_token: DeviceToken,
    },
    /// Disarm the poll timer if armed.
    ClearPollTimer,
    /// The roster shows stale fingerprint status for this account.
    RequestRosterRefresh { user_id: UserId },
    /// Publish the terminal outcome.
    NotifyFinished(EnrollmentOutcome),
}
