use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Account identifier as issued by the HR backend.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(String);

impl_id!(UserId);

impl UserId {
    /// Whether the identifier carries any non-whitespace content.
    pub fn is_blank(&self) -> bool {
        self.0.trim().is_empty()
    }
}
