use async_trait::async_trait;

use crate::enrollment::{BeginOutcome, EnrollmentReport};
use crate::ids::{DeviceToken, UserId};
use crate::ports::EnrollmentStoreError;

/// Server-side enrollment session store.
#[async_trait]
pub trait EnrollmentStorePort: Send + Sync {
    /// Open a session binding `device_token` to `user_id`.
    ///
    /// Error semantics:
    /// - `Ok(Rejected)`: the backend refused (e.g. token already in use)
    /// - `Err(_)`       : the request could not be completed
    async fn begin_enrollment(
        &self,
        user_id: &UserId,
        device_token: &DeviceToken,
    ) -> Result<BeginOutcome, EnrollmentStoreError>;

    /// Read the current status of the session. Must not mutate it.
    async fn query_enrollment(
        &self,
        user_id: &UserId,
        device_token: &DeviceToken,
    ) -> Result<EnrollmentReport, EnrollmentStoreError>;
}
