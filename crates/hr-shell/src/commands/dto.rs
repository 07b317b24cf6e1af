use serde::{Deserialize, Serialize};

use hr_core::roster::{AccountFingerprintStatus, ConsoleRole, FingerprintStatus, RosterAction};

/// One roster row as the account table shows it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRowDto {
    pub user_id: String,
    pub display_name: String,
    pub email: Option<String>,
    pub role: ConsoleRole,
    pub fingerprint_identifier: Option<String>,
    pub status: FingerprintStatus,
    /// The button the row offers: register or unregister.
    pub offered_action: RosterAction,
}

impl From<AccountFingerprintStatus> for AccountRowDto {
    fn from(account: AccountFingerprintStatus) -> Self {
        let offered_action = account.offered_action();
        Self {
            user_id: account.user_id.into_inner(),
            display_name: account.display_name,
            email: account.email,
            role: account.role,
            fingerprint_identifier: account.fingerprint_identifier,
            status: account.status,
            offered_action,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hr_core::ids::UserId;

    #[test]
    fn row_serializes_in_camel_case_with_offered_action() {
        let row = AccountRowDto::from(AccountFingerprintStatus::new(
            UserId::from("7"),
            "Ada",
            None,
            ConsoleRole::Hr,
            Some("FP-1".into()),
        ));

        let value = serde_json::to_value(&row).unwrap();

        assert_eq!(value["userId"], "7");
        assert_eq!(value["displayName"], "Ada");
        assert_eq!(value["status"], "registered");
        assert_eq!(value["offeredAction"], "unregister");
        assert_eq!(value["fingerprintIdentifier"], "FP-1");
    }
}
