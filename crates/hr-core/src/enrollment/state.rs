use serde::{Deserialize, Serialize};

/// Enrollment flow state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentState {
    /// No session; the form is shown.
    Idle,
    /// BeginEnrollment has been sent, no answer yet.
    Starting,
    /// Session accepted, polling the store.
    Waiting,
    /// Store reported `completed` (terminal).
    Succeeded,
    /// Store reported `failed`, usually the wrong finger (terminal).
    Failed,
    /// Attempt budget exhausted while the store still reported `waiting` (terminal).
    TimedOut,
    /// Store-side TTL elapsed (terminal).
    Expired,
    /// BeginEnrollment was rejected or could not be delivered (terminal).
    Error,
}

impl EnrollmentState {
    /// A session is in flight while starting or waiting.
    pub fn is_in_flight(self) -> bool {
        matches!(self, Self::Starting | Self::Waiting)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Succeeded | Self::Failed | Self::TimedOut | Self::Expired | Self::Error
        )
    }

    /// Terminal states from which `retry` returns to `Idle`.
    pub fn is_retryable(self) -> bool {
        matches!(
            self,
            Self::Failed | Self::TimedOut | Self::Expired | Self::Error
        )
    }
}

impl std::fmt::Display for EnrollmentState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Starting => "starting",
            Self::Waiting => "waiting",
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::TimedOut => "timed_out",
            Self::Expired => "expired",
            Self::Error => "error",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::EnrollmentState;

    #[test]
    fn success_is_terminal_but_not_retryable() {
        assert!(EnrollmentState::Succeeded.is_terminal());
        assert!(!EnrollmentState::Succeeded.is_retryable());
    }

    #[test]
    fn in_flight_states_are_never_terminal() {
        for state in [EnrollmentState::Starting, EnrollmentState::Waiting] {
            assert!(state.is_in_flight());
            assert!(!state.is_terminal());
        }
        assert!(!EnrollmentState::Idle.is_in_flight());
    }
}
