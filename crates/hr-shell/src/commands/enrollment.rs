//! Enrollment commands
//!
//! All commands except `open_enrollment` act on the view currently open.

use std::sync::Arc;

use tracing::{info_span, Instrument};

use hr_app::EnrollmentView;
use hr_core::enrollment::EnrollmentViewModel;
use hr_core::ids::UserId;

use super::error::map_err;
use crate::bootstrap::AppRuntime;

const NO_VIEW_OPEN: &str = "No enrollment view is open";

async fn open_view(runtime: &AppRuntime) -> Result<Arc<EnrollmentView>, String> {
    runtime.current_view().await.ok_or_else(|| {
        tracing::warn!("{}", NO_VIEW_OPEN);
        NO_VIEW_OPEN.to_string()
    })
}

/// Open the enrollment view for an account.
pub async fn open_enrollment(
    runtime: &AppRuntime,
    user_id: String,
) -> Result<EnrollmentViewModel, String> {
    let span = info_span!("command.enrollment.open", user_id = %user_id);
    async {
        let view = runtime
            .open_view(&UserId::from(user_id.as_str()))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to open enrollment view");
                map_err(e.into())
            })?;
        Ok(view.render().await)
    }
    .instrument(span)
    .await
}

/// Update the fingerprint ID draft.
pub async fn set_enrollment_token(
    runtime: &AppRuntime,
    token: String,
) -> Result<EnrollmentViewModel, String> {
    let view = open_view(runtime).await?;
    Ok(view.set_draft_token(&token).await)
}

/// "Start Registration".
pub async fn start_enrollment(runtime: &AppRuntime) -> Result<EnrollmentViewModel, String> {
    let view = open_view(runtime).await?;
    let span = info_span!("command.enrollment.start", user_id = %view.account().user_id);
    async {
        view.submit().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to start enrollment");
            map_err(e.into())
        })
    }
    .instrument(span)
    .await
}

pub async fn cancel_enrollment(runtime: &AppRuntime) -> Result<EnrollmentViewModel, String> {
    let view = open_view(runtime).await?;
    let span = info_span!("command.enrollment.cancel", user_id = %view.account().user_id);
    async { Ok(view.cancel().await) }.instrument(span).await
}

pub async fn retry_enrollment(runtime: &AppRuntime) -> Result<EnrollmentViewModel, String> {
    let view = open_view(runtime).await?;
    let span = info_span!("command.enrollment.retry", user_id = %view.account().user_id);
    async {
        view.retry().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to retry enrollment");
            map_err(e.into())
        })
    }
    .instrument(span)
    .await
}

/// Close the view; closing when nothing is open is a no-op.
pub async fn close_enrollment(runtime: &AppRuntime) -> Result<(), String> {
    let span = info_span!("command.enrollment.close");
    async {
        runtime.close_view().await;
        Ok(())
    }
    .instrument(span)
    .await
}

pub async fn get_enrollment_view(runtime: &AppRuntime) -> Result<EnrollmentViewModel, String> {
    let view = open_view(runtime).await?;
    Ok(view.render().await)
}
