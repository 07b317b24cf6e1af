use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use tokio::sync::RwLock;

use hr_core::ids::UserId;
use hr_core::ports::RosterPort;
use hr_core::roster::{AccountFingerprintStatus, RosterAction};

/// Re-reads the roster after a fingerprint was bound or removed.
#[async_trait]
pub trait RosterRefresher: Send + Sync {
    async fn refresh(&self) -> Result<()>;
}

/// Cached copy of the backend roster.
///
/// The backend owns the data; this only mirrors the last successful read.
pub struct RosterDirectory {
    roster: Arc<dyn RosterPort>,
    accounts: RwLock<Vec<AccountFingerprintStatus>>,
}

impl RosterDirectory {
    pub fn new(roster: Arc<dyn RosterPort>) -> Self {
        Self {
            roster,
            accounts: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the roster and replace the cache.
    ///
    /// On failure the previous cache is kept.
    pub async fn reload(&self) -> Result<Vec<AccountFingerprintStatus>> {
        let accounts = self
            .roster
            .list_accounts()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;
        tracing::debug!(count = accounts.len(), "roster reloaded");
        *self.accounts.write().await = accounts.clone();
        Ok(accounts)
    }

    pub async fn accounts(&self) -> Vec<AccountFingerprintStatus> {
        self.accounts.read().await.clone()
    }

    /// Look up one account, reloading once if it is not cached.
    pub async fn find(&self, user_id: &UserId) -> Result<Option<AccountFingerprintStatus>> {
        if let Some(account) = self.cached(user_id).await {
            return Ok(Some(account));
        }
        self.reload().await?;
        Ok(self.cached(user_id).await)
    }

    /// Register or unregister, depending on what the account currently has.
    pub async fn offered_action(&self, user_id: &UserId) -> Option<RosterAction> {
        self.cached(user_id)
            .await
            .map(|account| account.offered_action())
    }

    /// Remove the bound fingerprint on the backend, then reload.
    pub async fn unregister(&self, user_id: &UserId) -> Result<()> {
        self.roster
            .unregister_fingerprint(user_id)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to unregister fingerprint: {}", e))?;
        tracing::info!(user_id = %user_id, "fingerprint unregistered");
        self.reload().await?;
        Ok(())
    }

    async fn cached(&self, user_id: &UserId) -> Option<AccountFingerprintStatus> {
        self.accounts
            .read()
            .await
            .iter()
            .find(|account| &account.user_id == user_id)
            .cloned()
    }
}

#[async_trait]
impl RosterRefresher for RosterDirectory {
    async fn refresh(&self) -> Result<()> {
        self.reload().await.map(|_| ())
    }
}
