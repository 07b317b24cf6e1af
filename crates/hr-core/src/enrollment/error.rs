use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::EnrollmentState;
use crate::ids::UserId;

/// Why an operator command was refused before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InvalidInputReason {
    EmptyDeviceToken,
    EmptyUserId,
    UnknownAccount { user_id: UserId },
    AccountMismatch { expected: UserId, actual: UserId },
}

impl std::fmt::Display for InvalidInputReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyDeviceToken => write!(f, "fingerprint ID is required"),
            Self::EmptyUserId => write!(f, "user ID is required"),
            Self::UnknownAccount { user_id } => write!(f, "unknown account {user_id}"),
            Self::AccountMismatch { expected, actual } => {
                write!(f, "enrollment is open for {expected}, not {actual}")
            }
        }
    }
}

/// Enrollment error taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentError {
    #[error("invalid input: {0}")]
    InvalidInput(InvalidInputReason),

    #[error("an enrollment session is already in progress")]
    SessionInFlight,

    #[error("cannot start from state {state}")]
    NotIdle { state: EnrollmentState },

    #[error("cannot retry from state {state}")]
    NotRetryable { state: EnrollmentState },

    #[error("enrollment rejected: {reason}")]
    RejectedStart { reason: String },

    #[error("enrollment service unreachable: {0}")]
    TransportFailure(String),

    #[error("fingerprint mismatch: {reason}")]
    DeviceMismatch { reason: String },

    #[error("enrollment session expired on the server")]
    Expired,

    #[error("no scan result before the attempt budget ran out")]
    TimedOut,
}

impl EnrollmentError {
    pub fn invalid(reason: InvalidInputReason) -> Self {
        Self::InvalidInput(reason)
    }
}
