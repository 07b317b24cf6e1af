use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identifier minted for every enrollment attempt.
///
/// Results that arrive for an identifier other than the live one belong to a
/// discarded session and are dropped.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EnrollmentSessionId(String);

impl_id!(EnrollmentSessionId);

impl EnrollmentSessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for EnrollmentSessionId {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_ids_are_unique() {
        assert_ne!(EnrollmentSessionId::new(), EnrollmentSessionId::new());
    }
}
