use serde::{Deserialize, Serialize};

use crate::ids::UserId;

/// Dashboard role of an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsoleRole {
    Admin,
    Hr,
    Accountant,
    Employee,
    Applicant,
    Supervisor,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FingerprintStatus {
    Registered,
    NotRegistered,
}

/// What the roster row offers for an account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RosterAction {
    Register,
    Unregister,
}

/// Roster row, owned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountFingerprintStatus {
    pub user_id: UserId,
    pub display_name: String,
    pub email: Option<String>,
    pub role: ConsoleRole,
    pub fingerprint_identifier: Option<String>,
    pub status: FingerprintStatus,
}

impl AccountFingerprintStatus {
    /// Build a row; the status follows from whether an identifier is bound.
    pub fn new(
        user_id: UserId,
        display_name: impl Into<String>,
        email: Option<String>,
        role: ConsoleRole,
        fingerprint_identifier: Option<String>,
    ) -> Self {
        let fingerprint_identifier = fingerprint_identifier.filter(|id| !id.trim().is_empty());
        let status = if fingerprint_identifier.is_some() {
            FingerprintStatus::Registered
        } else {
            FingerprintStatus::NotRegistered
        };
        Self {
            user_id,
            display_name: display_name.into(),
            email,
            role,
            fingerprint_identifier,
            status,
        }
    }

    pub fn is_registered(&self) -> bool {
        self.status == FingerprintStatus::Registered
    }

    pub fn offered_action(&self) -> RosterAction {
        match self.status {
            FingerprintStatus::Registered => RosterAction::Unregister,
            FingerprintStatus::NotRegistered => RosterAction::Register,
        }
    }
}
