use crate::enrollment::EnrollmentReport;
use crate::ids::{DeviceToken, EnrollmentSessionId};

/// Inputs that drive the enrollment state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnrollmentEvent {
    // Operator
    Start {
        session_id: EnrollmentSessionId,
        device_token: DeviceToken,
    },
    Cancel,
    Retry,

    // BeginEnrollment result
    StartAccepted,
    StartRejected { reason: String },
    StartTransportFailed { error: String },

    // Poll timer fired
    PollDue,

    // QueryEnrollment result
    PollReported(EnrollmentReport),
    PollTransportFailed { error: String },
}

impl EnrollmentEvent {
    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Start { .. } => "start",
            Self::Cancel => "cancel",
            Self::Retry => "retry",
            Self::StartAccepted => "start_accepted",
            Self::StartRejected { .. } => "start_rejected",
            Self::StartTransportFailed { .. } => "start_transport_failed",
            Self::PollDue => "poll_due",
            Self::PollReported(_) => "poll_reported",
            Self::PollTransportFailed { .. } => "poll_transport_failed",
        }
    }
}
