use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::mpsc;

use hr_core::enrollment::EnrollmentOutcome;
use hr_core::ids::{EnrollmentSessionId, UserId};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnrollmentDomainEvent {
    /// Fired once per session, on entry to a terminal state.
    Finished {
        session_id: EnrollmentSessionId,
        user_id: UserId,
        outcome: EnrollmentOutcome,
        attempts_made: u32,
    },
}

#[async_trait]
pub trait EnrollmentEventPort: Send + Sync {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<EnrollmentDomainEvent>>;
}
