use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Operator-supplied identifier of a physical scan result.
///
/// Always trimmed and never empty once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DeviceToken(String);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DeviceTokenError {
    #[error("device token is empty")]
    Empty,
}

impl DeviceToken {
    pub fn parse(raw: &str) -> Result<Self, DeviceTokenError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(DeviceTokenError::Empty);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for DeviceToken {
    type Error = DeviceTokenError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DeviceToken> for String {
    fn from(token: DeviceToken) -> Self {
        token.0
    }
}

impl std::fmt::Display for DeviceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
