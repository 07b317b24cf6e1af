use anyhow::Result;
use std::sync::Arc;

use hr_core::roster::AccountFingerprintStatus;

use super::RosterDirectory;

/// Use case for listing every account with its fingerprint status
pub struct ListAccounts {
    directory: Arc<RosterDirectory>,
}

impl ListAccounts {
    pub fn new(directory: Arc<RosterDirectory>) -> Self {
        Self { directory }
    }

    /// Reads the roster from the backend, sorted by display name.
    pub async fn execute(&self) -> Result<Vec<AccountFingerprintStatus>> {
        let mut accounts = self.directory.reload().await?;
        accounts.sort_by(|a, b| {
            a.display_name
                .to_lowercase()
                .cmp(&b.display_name.to_lowercase())
        });
        Ok(accounts)
    }
}
