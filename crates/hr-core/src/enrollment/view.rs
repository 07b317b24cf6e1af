//! Enrollment panel mapping.
//!
//! The view is a pure function of the session snapshot plus the operator's
//! draft token. It owns no timers.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::{EnrollmentSession, EnrollmentState, StartFailure};

/// The panel rendered for a state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrollmentPanel {
    /// Fingerprint ID input.
    Form,
    /// Spinner while starting or waiting for the scanner.
    Waiting,
    Success,
    Failed,
    /// Timed out, expired, or could not start.
    Error,
}

/// Operator actions a panel offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewCommand {
    Submit,
    Cancel,
    Retry,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollmentViewModel {
    pub user_id: String,
    pub state: EnrollmentState,
    pub panel: EnrollmentPanel,
    pub commands: Vec<ViewCommand>,
    /// "Start Registration" is enabled.
    pub submit_enabled: bool,
    pub draft_token: String,
    pub message: Option<String>,
    pub attempts_made: u32,
    pub max_attempts: u32,
    /// Set only on success.
    pub auto_close_after_ms: Option<u64>,
}

impl EnrollmentViewModel {
    pub fn offers(&self, command: ViewCommand) -> bool {
        self.commands.contains(&command)
    }
}

pub fn render_view(
    session: &EnrollmentSession,
    draft_token: &str,
    success_auto_close: Duration,
) -> EnrollmentViewModel {
    let state = session.state();
    let (panel, commands) = match state {
        EnrollmentState::Idle => (
            EnrollmentPanel::Form,
            vec![ViewCommand::Submit, ViewCommand::Cancel],
        ),
        EnrollmentState::Starting | EnrollmentState::Waiting => {
            (EnrollmentPanel::Waiting, vec![ViewCommand::Cancel])
        }
        EnrollmentState::Succeeded => (EnrollmentPanel::Success, vec![ViewCommand::Close]),
        EnrollmentState::Failed => (
            EnrollmentPanel::Failed,
            vec![ViewCommand::Retry, ViewCommand::Close],
        ),
        EnrollmentState::TimedOut | EnrollmentState::Expired | EnrollmentState::Error => (
            EnrollmentPanel::Error,
            vec![ViewCommand::Retry, ViewCommand::Close],
        ),
    };

    EnrollmentViewModel {
        user_id: session.user_id().to_string(),
        state,
        panel,
        commands,
        submit_enabled: state == EnrollmentState::Idle && !draft_token.trim().is_empty(),
        draft_token: draft_token.to_string(),
        message: message_for(session),
        attempts_made: session.attempts_made(),
        max_attempts: session.max_attempts(),
        auto_close_after_ms: (state == EnrollmentState::Succeeded)
            .then(|| success_auto_close.as_millis().min(u64::MAX as u128) as u64),
    }
}

fn message_for(session: &EnrollmentSession) -> Option<String> {
    match session.state() {
        EnrollmentState::Idle => None,
        EnrollmentState::Starting => Some("Opening enrollment session...".to_string()),
        EnrollmentState::Waiting => Some(format!(
            "Waiting for the scanner (check {} of {})",
            session.attempts_made(),
            session.max_attempts()
        )),
        EnrollmentState::Succeeded => Some("Fingerprint registered.".to_string()),
        EnrollmentState::Failed => session.failure_reason().map(str::to_string),
        EnrollmentState::TimedOut => {
            let budget = session
                .poll_interval()
                .saturating_mul(session.max_attempts())
                .as_secs();
            Some(format!(
                "No scan result within {budget} seconds. Scan again and retry."
            ))
        }
        EnrollmentState::Expired => Some(
            "The enrollment window closed on the server. Start a new registration.".to_string(),
        ),
        EnrollmentState::Error => match session.start_failure() {
            Some(StartFailure::Rejected { reason }) => {
                Some(format!("Registration was refused: {reason}"))
            }
            Some(StartFailure::Transport { message }) => Some(format!(
                "Could not reach the enrollment service: {message}"
            )),
            None => Some("Registration could not be started.".to_string()),
        },
    }
}
