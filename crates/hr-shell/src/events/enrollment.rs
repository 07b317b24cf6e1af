use serde::{Deserialize, Serialize};

use hr_app::EnrollmentDomainEvent;
use hr_core::enrollment::{EnrollmentOutcome, EnrollmentState, StartFailure};

use super::{EventEmitter, ENROLLMENT_CLOSED, ENROLLMENT_FINISHED};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentFinishedEvent {
    pub session_id: String,
    pub user_id: String,
    pub state: EnrollmentState,
    /// Backend message for `failed`, the refusal or transport error for `error`.
    pub message: Option<String>,
    pub attempts_made: u32,
}

impl From<&EnrollmentDomainEvent> for EnrollmentFinishedEvent {
    fn from(event: &EnrollmentDomainEvent) -> Self {
        let EnrollmentDomainEvent::Finished {
            session_id,
            user_id,
            outcome,
            attempts_made,
        } = event;
        let message = match outcome {
            EnrollmentOutcome::Failed { reason } => Some(reason.clone()),
            EnrollmentOutcome::Error {
                cause: StartFailure::Rejected { reason },
            } => Some(reason.clone()),
            EnrollmentOutcome::Error {
                cause: StartFailure::Transport { message },
            } => Some(message.clone()),
            _ => None,
        };
        Self {
            session_id: session_id.to_string(),
            user_id: user_id.to_string(),
            state: outcome.state(),
            message,
            attempts_made: *attempts_made,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentClosedEvent {
    pub user_id: String,
    /// True when the view closed itself after a success.
    pub auto_closed: bool,
}

pub fn forward_enrollment_finished(
    emitter: &dyn EventEmitter,
    event: &EnrollmentDomainEvent,
) -> anyhow::Result<()> {
    let payload = serde_json::to_value(EnrollmentFinishedEvent::from(event))?;
    emitter.emit(ENROLLMENT_FINISHED, payload)
}

pub fn forward_enrollment_closed(
    emitter: &dyn EventEmitter,
    user_id: &str,
    auto_closed: bool,
) -> anyhow::Result<()> {
    let payload = serde_json::to_value(EnrollmentClosedEvent {
        user_id: user_id.to_string(),
        auto_closed,
    })?;
    emitter.emit(ENROLLMENT_CLOSED, payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_core::ids::{EnrollmentSessionId, UserId};

    #[test]
    fn finished_event_serializes_in_camel_case() {
        let event = EnrollmentDomainEvent::Finished {
            session_id: EnrollmentSessionId::from("s-1"),
            user_id: UserId::from("U1"),
            outcome: EnrollmentOutcome::Failed {
                reason: "mismatch".into(),
            },
            attempts_made: 3,
        };

        let value = serde_json::to_value(EnrollmentFinishedEvent::from(&event)).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "sessionId": "s-1",
                "userId": "U1",
                "state": "failed",
                "message": "mismatch",
                "attemptsMade": 3
            })
        );
    }

    #[test]
    fn timeout_carries_no_message() {
        let event = EnrollmentDomainEvent::Finished {
            session_id: EnrollmentSessionId::from("s-2"),
            user_id: UserId::from("U1"),
            outcome: EnrollmentOutcome::TimedOut,
            attempts_made: 30,
        };

        let payload = EnrollmentFinishedEvent::from(&event);

        assert_eq!(payload.state, EnrollmentState::TimedOut);
        assert!(payload.message.is_none());
    }
}
