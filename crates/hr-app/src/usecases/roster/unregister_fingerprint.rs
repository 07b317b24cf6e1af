use anyhow::Result;
use std::sync::Arc;

use hr_core::ids::UserId;
use hr_core::roster::RosterAction;

use super::RosterDirectory;

/// Use case for removing an account's bound fingerprint
pub struct UnregisterFingerprint {
    directory: Arc<RosterDirectory>,
}

impl UnregisterFingerprint {
    pub fn new(directory: Arc<RosterDirectory>) -> Self {
        Self { directory }
    }

    /// Only accounts that currently have a fingerprint can be unregistered.
    pub async fn execute(&self, user_id: &UserId) -> Result<()> {
        let account = self
            .directory
            .find(user_id)
            .await?
            .ok_or_else(|| anyhow::anyhow!("Unknown account: {}", user_id))?;

        if account.offered_action() != RosterAction::Unregister {
            return Err(anyhow::anyhow!(
                "Account {} has no registered fingerprint",
                user_id
            ));
        }

        self.directory.unregister(user_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use hr_core::ports::{RosterError, RosterPort};
    use hr_core::roster::{AccountFingerprintStatus, ConsoleRole};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRoster {
        fingerprint: Option<String>,
        unregisters: AtomicUsize,
    }

    #[async_trait]
    impl RosterPort for CountingRoster {
        async fn list_accounts(&self) -> Result<Vec<AccountFingerprintStatus>, RosterError> {
            Ok(vec![AccountFingerprintStatus::new(
                UserId::from("U1"),
                "Ada",
                None,
                ConsoleRole::Accountant,
                self.fingerprint.clone(),
            )])
        }

        async fn unregister_fingerprint(&self, _user_id: &UserId) -> Result<(), RosterError> {
            self.unregisters.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn usecase(fingerprint: Option<&str>) -> (UnregisterFingerprint, Arc<CountingRoster>) {
        let roster = Arc::new(CountingRoster {
            fingerprint: fingerprint.map(str::to_string),
            unregisters: AtomicUsize::new(0),
        });
        let directory = Arc::new(RosterDirectory::new(roster.clone()));
        (UnregisterFingerprint::new(directory), roster)
    }

    #[tokio::test]
    async fn unregisters_registered_account() {
        let (usecase, roster) = usecase(Some("FP-7"));

        usecase.execute(&UserId::from("U1")).await.unwrap();

        assert_eq!(roster.unregisters.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn refuses_account_without_fingerprint() {
        let (usecase, roster) = usecase(None);

        let err = usecase.execute(&UserId::from("U1")).await.unwrap_err();

        assert!(err.to_string().contains("no registered fingerprint"));
        assert_eq!(roster.unregisters.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn refuses_unknown_account() {
        let (usecase, _roster) = usecase(None);

        let err = usecase.execute(&UserId::from("nobody")).await.unwrap_err();

        assert!(err.to_string().contains("Unknown account"));
    }
}
