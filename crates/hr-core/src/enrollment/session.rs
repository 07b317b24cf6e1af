use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{EnrollmentPolicy, EnrollmentState, StartFailure};
use crate::ids::{DeviceToken, EnrollmentSessionId, UserId};

/// Snapshot of the enrollment flow for one account.
///
/// Only [`super::EnrollmentStateMachine`] mutates it. `user_id` is fixed when
/// the view opens; `session_id` and `device_token` are written once on start
/// and cleared again by cancel or retry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentSession {
    user_id: UserId,
    session_id: Option<EnrollmentSessionId>,
    device_token: Option<DeviceToken>,
    state: EnrollmentState,
    attempts_made: u32,
    max_attempts: u32,
    poll_interval_ms: u64,
    started_at: Option<DateTime<Utc>>,
    failure_reason: Option<String>,
    start_failure: Option<StartFailure>,
}

impl EnrollmentSession {
    pub fn idle(user_id: UserId, policy: &EnrollmentPolicy) -> Self {
        Self {
            user_id,
            session_id: None,
            device_token: None,
            state: EnrollmentState::Idle,
            attempts_made: 0,
            max_attempts: policy.max_attempts,
            poll_interval_ms: policy.poll_interval.as_millis().min(u64::MAX as u128) as u64,
            started_at: None,
            failure_reason: None,
            start_failure: None,
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn session_id(&self) -> Option<&EnrollmentSessionId> {
        self.session_id.as_ref()
    }

    pub fn device_token(&self) -> Option<&DeviceToken> {
        self.device_token.as_ref()
    }

    pub fn state(&self) -> EnrollmentState {
        self.state
    }

    pub fn attempts_made(&self) -> u32 {
        self.attempts_made
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Populated only in `Failed`.
    pub fn failure_reason(&self) -> Option<&str> {
        self.failure_reason.as_deref()
    }

    /// Populated only in `Error`.
    pub fn start_failure(&self) -> Option<&StartFailure> {
        self.start_failure.as_ref()
    }

    pub fn attempts_remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts_made)
    }

    /// Whether `session_id` is the live session instance.
    pub fn is_current(&self, session_id: &EnrollmentSessionId) -> bool {
        self.session_id.as_ref() == Some(session_id)
    }

    pub(crate) fn begin(
        &mut self,
        session_id: EnrollmentSessionId,
        device_token: DeviceToken,
        now: DateTime<Utc>,
    ) {
        self.session_id = Some(session_id);
        self.device_token = Some(device_token);
        self.state = EnrollmentState::Starting;
        self.attempts_made = 0;
        self.started_at = Some(now);
        self.failure_reason = None;
        self.start_failure = None;
    }

    pub(crate) fn set_state(&mut self, state: EnrollmentState) {
        self.state = state;
    }

    pub(crate) fn record_attempt(&mut self) {
        self.attempts_made = self.attempts_made.saturating_add(1).min(self.max_attempts);
    }

    pub(crate) fn fail(&mut self, reason: String) {
        self.state = EnrollmentState::Failed;
        self.failure_reason = Some(reason);
    }

    pub(crate) fn error(&mut self, cause: StartFailure) {
        self.state = EnrollmentState::Error;
        self.start_failure = Some(cause);
    }

    /// Back to the form; the session instance and its token are discarded.
    pub(crate) fn reset(&mut self) {
        self.session_id = None;
        self.device_token = None;
        self.state = EnrollmentState::Idle;
        self.attempts_made = 0;
        self.started_at = None;
        self.failure_reason = None;
        self.start_failure = None;
    }
}
