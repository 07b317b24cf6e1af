//! Roster commands

use tracing::{info_span, Instrument};

use hr_core::ids::UserId;

use super::dto::AccountRowDto;
use super::error::map_err;
use crate::bootstrap::AppRuntime;

/// List every account with its fingerprint status.
pub async fn list_accounts(runtime: &AppRuntime) -> Result<Vec<AccountRowDto>, String> {
    let span = info_span!("command.roster.list");
    async {
        let uc = runtime.usecases().list_accounts();
        let accounts = uc.execute().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to list accounts");
            map_err(e)
        })?;
        Ok(accounts.into_iter().map(AccountRowDto::from).collect())
    }
    .instrument(span)
    .await
}

/// Remove an account's fingerprint and return the refreshed roster.
pub async fn unregister_fingerprint(
    runtime: &AppRuntime,
    user_id: String,
) -> Result<Vec<AccountRowDto>, String> {
    let span = info_span!("command.roster.unregister", user_id = %user_id);
    async {
        let uc = runtime.usecases().unregister_fingerprint();
        uc.execute(&UserId::from(user_id.as_str()))
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Failed to unregister fingerprint");
                map_err(e)
            })?;
        Ok(runtime
            .roster()
            .accounts()
            .await
            .into_iter()
            .map(AccountRowDto::from)
            .collect())
    }
    .instrument(span)
    .await
}
