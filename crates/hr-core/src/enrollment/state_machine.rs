//! Enrollment state machine.
//!
//! Pure transition function `(session, event) -> (session, actions)`. It never
//! performs I/O; the controller executes the returned actions.
//!
//! ```text
//! Idle --start--> Starting --accepted--> Waiting
//! Starting --rejected--> Error
//! Waiting --poll:completed--> Succeeded
//! Waiting --poll:failed--> Failed
//! Waiting --poll:expired--> Expired
//! Waiting --poll:waiting & attempts<max--> Waiting
//! Waiting --poll:waiting & attempts>=max--> TimedOut
//! {Starting,Waiting} --cancel--> Idle
//! {Failed,TimedOut,Expired,Error} --retry--> Idle
//! ```

use chrono::{DateTime, Utc};

use crate::enrollment::{
    EnrollmentAction, EnrollmentEvent, EnrollmentOutcome, EnrollmentReport, EnrollmentSession,
    EnrollmentState, EnrollmentStoreStatus, StartFailure,
};

/// Reason shown when the store reports `failed` without a message.
pub const DEFAULT_FAILURE_REASON: &str = "wrong fingerprint scanned, try again";

pub struct EnrollmentStateMachine;

impl EnrollmentStateMachine {
    pub fn transition(
        session: EnrollmentSession,
        event: EnrollmentEvent,
    ) -> (EnrollmentSession, Vec<EnrollmentAction>) {
        Self::transition_at(session, event, Utc::now())
    }

    pub fn transition_at(
        mut session: EnrollmentSession,
        event: EnrollmentEvent,
        now: DateTime<Utc>,
    ) -> (EnrollmentSession, Vec<EnrollmentAction>) {
        let from = session.state();
        let actions = match (from, event) {
            // ===== Start =====
            (
                EnrollmentState::Idle,
                EnrollmentEvent::Start {
                    session_id,
                    device_token,
                },
            ) => {
                let user_id = session.user_id().clone();
                session.begin(session_id, device_token.clone(), now);
                vec![EnrollmentAction::BeginEnrollment {
                    user_id,
                    device_token,
                }]
            }
            (EnrollmentState::Starting, EnrollmentEvent::StartAccepted) => {
                session.set_state(EnrollmentState::Waiting);
                vec![EnrollmentAction::SchedulePoll {
                    delay: session.poll_interval(),
                }]
            }
            (EnrollmentState::Starting, EnrollmentEvent::StartRejected { reason }) => {
                let cause = StartFailure::Rejected { reason };
                session.error(cause.clone());
                vec![EnrollmentAction::NotifyFinished(EnrollmentOutcome::Error {
                    cause,
                })]
            }
            (EnrollmentState::Starting, EnrollmentEvent::StartTransportFailed { error }) => {
                let cause = StartFailure::Transport { message: error };
                session.error(cause.clone());
                vec![EnrollmentAction::NotifyFinished(EnrollmentOutcome::Error {
                    cause,
                })]
            }

            // ===== Polling =====
            (EnrollmentState::Waiting, EnrollmentEvent::PollDue) => {
                if session.attempts_made() >= session.max_attempts() {
                    Self::time_out(&mut session)
                } else {
                    session.record_attempt();
                    match session.device_token().cloned() {
                        Some(device_token) => vec![EnrollmentAction::QueryEnrollment {
                            user_id: session.user_id().clone(),
                            device_token,
                        }],
                        None => Vec::new(),
                    }
                }
            }
            (EnrollmentState::Waiting, EnrollmentEvent::PollReported(report)) => {
                Self::apply_report(&mut session, report)
            }
            (EnrollmentState::Waiting, EnrollmentEvent::PollTransportFailed { .. }) => {
                Self::keep_waiting(&mut session)
            }

            // ===== Cancel / Retry =====
            (EnrollmentState::Starting | EnrollmentState::Waiting, EnrollmentEvent::Cancel) => {
                session.reset();
                vec![EnrollmentAction::ClearPollTimer]
            }
            (state, EnrollmentEvent::Retry) if state.is_retryable() => {
                session.reset();
                Vec::new()
            }

            (state, event) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    state = %state,
                    event = event.name(),
                    "enrollment event ignored in current state"
                );
                #[cfg(not(feature = "tracing"))]
                let _ = (state, event);
                Vec::new()
            }
        };

        #[cfg(feature = "tracing")]
        if from != session.state() {
            tracing::debug!(
                user_id = %session.user_id(),
                from = %from,
                to = %session.state(),
                attempts = session.attempts_made(),
                "enrollment transition"
            );
        }

        (session, actions)
    }

    fn apply_report(
        session: &mut EnrollmentSession,
        report: EnrollmentReport,
    ) -> Vec<EnrollmentAction> {
        match report.status {
            EnrollmentStoreStatus::Completed => {
                session.set_state(EnrollmentState::Succeeded);
                vec![
                    EnrollmentAction::ClearPollTimer,
                    EnrollmentAction::RequestRosterRefresh {
                        user_id: session.user_id().clone(),
                    },
                    EnrollmentAction::NotifyFinished(EnrollmentOutcome::Succeeded),
                ]
            }
            EnrollmentStoreStatus::Failed => {
                let reason = report
                    .message
                    .map(|m| m.trim().to_string())
                    .filter(|m| !m.is_empty())
                    .unwrap_or_else(|| DEFAULT_FAILURE_REASON.to_string());
                session.fail(reason.clone());
                vec![
                    EnrollmentAction::ClearPollTimer,
                    EnrollmentAction::NotifyFinished(EnrollmentOutcome::Failed { reason }),
                ]
            }
            EnrollmentStoreStatus::Expired => {
                session.set_state(EnrollmentState::Expired);
                vec![
                    EnrollmentAction::ClearPollTimer,
                    EnrollmentAction::NotifyFinished(EnrollmentOutcome::Expired),
                ]
            }
            EnrollmentStoreStatus::Waiting => Self::keep_waiting(session),
        }
    }

    /// A `waiting` answer, or a poll that never got an answer.
    fn keep_waiting(session: &mut EnrollmentSession) -> Vec<EnrollmentAction> {
        if session.attempts_made() < session.max_attempts() {
            vec![EnrollmentAction::SchedulePoll {
                delay: session.poll_interval(),
            }]
        } else {
            Self::time_out(session)
        }
    }

    fn time_out(session: &mut EnrollmentSession) -> Vec<EnrollmentAction> {
        session.set_state(EnrollmentState::TimedOut);
        vec![
            EnrollmentAction::ClearPollTimer,
            EnrollmentAction::NotifyFinished(EnrollmentOutcome::TimedOut),
        ]
    }
}
