use serde::{Deserialize, Serialize};

use super::{EnrollmentError, EnrollmentState};

/// Why a session ended in `Error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StartFailure {
    /// The backend refused to open the session.
    Rejected { reason: String },
    /// The backend could not be reached.
    Transport { message: String },
}

/// Final result of one enrollment session, published exactly once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EnrollmentOutcome {
    Succeeded,
    Failed { reason: String },
    TimedOut,
    Expired,
    Error { cause: StartFailure },
}

impl EnrollmentOutcome {
    pub fn state(&self) -> EnrollmentState {
        match self {
            Self::Succeeded => EnrollmentState::Succeeded,
            Self::Failed { .. } => EnrollmentState::Failed,
            Self::TimedOut => EnrollmentState::TimedOut,
            Self::Expired => EnrollmentState::Expired,
            Self::Error { .. } => EnrollmentState::Error,
        }
    }

    /// Error taxonomy entry for non-success outcomes.
    pub fn as_error(&self) -> Option<EnrollmentError> {
        match self {
            Self::Succeeded => None,
            Self::Failed { reason } => Some(EnrollmentError::DeviceMismatch {
                reason: reason.clone(),
            }),
            Self::TimedOut => Some(EnrollmentError::TimedOut),
            Self::Expired => Some(EnrollmentError::Expired),
            Self::Error {
                cause: StartFailure::Rejected { reason },
            } => Some(EnrollmentError::RejectedStart {
                reason: reason.clone(),
            }),
            Self::Error {
                cause: StartFailure::Transport { message },
            } => Some(EnrollmentError::TransportFailure(message.clone())),
        }
    }
}
