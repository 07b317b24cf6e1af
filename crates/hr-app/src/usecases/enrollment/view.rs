//! Enrollment view
//!
//! Holds the operator's draft token for one opened account and forwards
//! commands to its controller. Rendering is delegated to
//! [`hr_core::enrollment::render_view`].

use tokio::sync::{mpsc, Mutex};

use hr_core::enrollment::{
    render_view, EnrollmentError, EnrollmentState, EnrollmentViewModel, InvalidInputReason,
};
use hr_core::ids::UserId;
use hr_core::roster::AccountFingerprintStatus;

use super::{
    EnrollmentController, EnrollmentControllerFactory, EnrollmentDomainEvent, EnrollmentEventPort,
};
use crate::usecases::roster::RosterDirectory;

pub struct EnrollmentView {
    account: AccountFingerprintStatus,
    controller: EnrollmentController,
    draft_token: Mutex<String>,
}

impl EnrollmentView {
    /// Open the view for an account known to the roster.
    pub async fn open(
        roster: &RosterDirectory,
        factory: &EnrollmentControllerFactory,
        user_id: &UserId,
    ) -> Result<Self, EnrollmentError> {
        if user_id.is_blank() {
            return Err(EnrollmentError::invalid(InvalidInputReason::EmptyUserId));
        }
        let account = roster
            .find(user_id)
            .await
            .map_err(|e| EnrollmentError::TransportFailure(e.to_string()))?
            .ok_or_else(|| {
                EnrollmentError::invalid(InvalidInputReason::UnknownAccount {
                    user_id: user_id.clone(),
                })
            })?;

        tracing::info!(user_id = %user_id, status = ?account.status, "enrollment view opened");
        Ok(Self {
            controller: factory.create(account.user_id.clone()),
            account,
            draft_token: Mutex::new(String::new()),
        })
    }

    pub fn account(&self) -> &AccountFingerprintStatus {
        &self.account
    }

    pub fn controller(&self) -> &EnrollmentController {
        &self.controller
    }

    pub async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<EnrollmentDomainEvent>> {
        self.controller.subscribe().await
    }

    pub async fn set_draft_token(&self, raw: &str) -> EnrollmentViewModel {
        *self.draft_token.lock().await = raw.to_string();
        self.render().await
    }

    pub async fn render(&self) -> EnrollmentViewModel {
        let session = self.controller.snapshot().await;
        let draft = self.draft_token.lock().await.clone();
        render_view(
            &session,
            &draft,
            self.controller.policy().success_auto_close,
        )
    }

    /// "Start Registration".
    pub async fn submit(&self) -> Result<EnrollmentViewModel, EnrollmentError> {
        let draft = self.draft_token.lock().await.clone();
        self.controller.start(&self.account.user_id, &draft).await?;
        Ok(self.render().await)
    }

    pub async fn cancel(&self) -> EnrollmentViewModel {
        self.controller.cancel().await;
        self.render().await
    }

    /// Back to the form with an empty draft.
    pub async fn retry(&self) -> Result<EnrollmentViewModel, EnrollmentError> {
        self.controller.retry().await?;
        self.draft_token.lock().await.clear();
        Ok(self.render().await)
    }

    /// Cancel any in-flight session before the view is discarded.
    pub async fn close(&self) -> EnrollmentState {
        let session = self.controller.cancel().await;
        tracing::info!(
            user_id = %self.account.user_id,
            state = %session.state(),
            "enrollment view closed"
        );
        session.state()
    }
}
