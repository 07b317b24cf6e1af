//! Fingerprint enrollment session store over HTTP.
//!
//! | operation | request |
//! |---|---|
//! | begin | `POST /fingerprint/enrollments` |
//! | query | `GET /fingerprint/enrollments/status?user_id=&fingerprint_id=` |

use async_trait::async_trait;
use reqwest::Method;
use serde::{Deserialize, Serialize};

use hr_core::enrollment::{BeginOutcome, EnrollmentReport, EnrollmentStoreStatus};
use hr_core::ids::{DeviceToken, UserId};
use hr_core::ports::{EnrollmentStoreError, EnrollmentStorePort};

use super::{ApiClient, HttpError};

const ENROLLMENTS_PATH: &str = "/fingerprint/enrollments";
const STATUS_PATH: &str = "/fingerprint/enrollments/status";

#[derive(Debug, Serialize)]
struct BeginRequest<'a> {
    user_id: &'a str,
    fingerprint_id: &'a str,
}

#[derive(Debug, Deserialize)]
struct BeginResponse {
    accepted: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StatusResponse {
    status: String,
    #[serde(default)]
    message: Option<String>,
}

pub struct HttpEnrollmentStore {
    client: ApiClient,
}

impl HttpEnrollmentStore {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl EnrollmentStorePort for HttpEnrollmentStore {
    async fn begin_enrollment(
        &self,
        user_id: &UserId,
        device_token: &DeviceToken,
    ) -> Result<BeginOutcome, EnrollmentStoreError> {
        let request = self
            .client
            .request(Method::POST, ENROLLMENTS_PATH)
            .json(&BeginRequest {
                user_id: user_id.as_str(),
                fingerprint_id: device_token.as_str(),
            });

        let response = match self.client.send(request).await {
            Ok(response) => response,
            Err(HttpError::Refused { message, .. }) => {
                return Ok(BeginOutcome::Rejected { reason: message });
            }
            Err(err) => return Err(store_error(err)),
        };
        let body: BeginResponse = response
            .json()
            .await
            .map_err(|e| store_error(HttpError::from(e)))?;

        if body.accepted {
            Ok(BeginOutcome::Accepted)
        } else {
            let reason = body
                .message
                .map(|m| m.trim().to_string())
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| "enrollment refused".to_string());
            Ok(BeginOutcome::Rejected { reason })
        }
    }

    async fn query_enrollment(
        &self,
        user_id: &UserId,
        device_token: &DeviceToken,
    ) -> Result<EnrollmentReport, EnrollmentStoreError> {
        let request = self.client.request(Method::GET, STATUS_PATH).query(&[
            ("user_id", user_id.as_str()),
            ("fingerprint_id", device_token.as_str()),
        ]);
        let response = self.client.send(request).await.map_err(store_error)?;
        let body: StatusResponse = response
            .json()
            .await
            .map_err(|e| store_error(HttpError::from(e)))?;

        let status = parse_status(&body.status)?;
        Ok(EnrollmentReport {
            status,
            message: body.message,
        })
    }
}

/// Closed mapping; `pending` is what older backends send for `waiting`.
fn parse_status(raw: &str) -> Result<EnrollmentStoreStatus, EnrollmentStoreError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "waiting" | "pending" => Ok(EnrollmentStoreStatus::Waiting),
        "completed" => Ok(EnrollmentStoreStatus::Completed),
        "failed" => Ok(EnrollmentStoreStatus::Failed),
        "expired" => Ok(EnrollmentStoreStatus::Expired),
        other => Err(EnrollmentStoreError::Protocol(format!(
            "unknown enrollment status: {other:?}"
        ))),
    }
}

fn store_error(err: HttpError) -> EnrollmentStoreError {
    match err {
        HttpError::Decode(msg) => EnrollmentStoreError::Protocol(msg),
        other => EnrollmentStoreError::Transport(other.to_string()),
    }
}
