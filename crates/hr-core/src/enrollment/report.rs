use serde::{Deserialize, Serialize};

/// Store-side session status, mapped from the backend's strings at the adapter boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentStoreStatus {
    Waiting,
    Completed,
    Failed,
    Expired,
}

/// Answer to `QueryEnrollment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrollmentReport {
    pub status: EnrollmentStoreStatus,
    pub message: Option<String>,
}

impl EnrollmentReport {
    pub fn new(status: EnrollmentStoreStatus) -> Self {
        Self {
            status,
            message: None,
        }
    }

    pub fn with_message(status: EnrollmentStoreStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: Some(message.into()),
        }
    }
}

/// Answer to `BeginEnrollment`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BeginOutcome {
    Accepted,
    Rejected { reason: String },
}
