use async_trait::async_trait;

use crate::ids::UserId;
use crate::ports::RosterError;
use crate::roster::AccountFingerprintStatus;

/// Backend account directory.
#[async_trait]
pub trait RosterPort: Send + Sync {
    async fn list_accounts(&self) -> Result<Vec<AccountFingerprintStatus>, RosterError>;

    /// Remove the fingerprint bound to `user_id`.
    async fn unregister_fingerprint(&self, user_id: &UserId) -> Result<(), RosterError>;
}
