use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::Deserialize;

use hr_core::ids::UserId;
use hr_core::ports::{RosterError, RosterPort};
use hr_core::roster::{AccountFingerprintStatus, ConsoleRole};

use super::{ApiClient, HttpError};

const USERS_PATH: &str = "/users";

/// Backend ids are numeric in some deployments and strings in others.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(i64),
    Text(String),
}

impl RawId {
    fn into_user_id(self) -> UserId {
        match self {
            RawId::Number(n) => UserId::from(n.to_string()),
            RawId::Text(s) => UserId::from(s),
        }
    }
}

#[derive(Debug, Deserialize)]
struct UserDto {
    id: RawId,
    name: String,
    #[serde(default)]
    email: Option<String>,
    role: String,
    #[serde(default)]
    fingerprint_id: Option<String>,
}

pub struct HttpRosterClient {
    client: ApiClient,
}

impl HttpRosterClient {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RosterPort for HttpRosterClient {
    async fn list_accounts(&self) -> Result<Vec<AccountFingerprintStatus>, RosterError> {
        let request = self.client.request(Method::GET, USERS_PATH);
        let response = self.client.send(request).await.map_err(roster_error)?;
        let users: Vec<UserDto> = response
            .json()
            .await
            .map_err(|e| roster_error(HttpError::from(e)))?;

        let total = users.len();
        let accounts: Vec<_> = users.into_iter().filter_map(into_account).collect();
        if accounts.len() < total {
            tracing::warn!(skipped = total - accounts.len(), total, "roster rows skipped");
        }
        Ok(accounts)
    }

    async fn unregister_fingerprint(&self, user_id: &UserId) -> Result<(), RosterError> {
        let path = format!(
            "{USERS_PATH}/{}/fingerprint",
            urlencoding::encode(user_id.as_str())
        );
        let request = self.client.request(Method::DELETE, &path);
        match self.client.send(request).await {
            Ok(_) => Ok(()),
            Err(HttpError::Refused { status, .. }) if status == StatusCode::NOT_FOUND => {
                Err(RosterError::NotFound(user_id.clone()))
            }
            Err(err) => Err(roster_error(err)),
        }
    }
}

/// A row with an unrecognised role is dropped; the rest of the roster stays usable.
fn into_account(user: UserDto) -> Option<AccountFingerprintStatus> {
    let user_id = user.id.into_user_id();
    let role = match parse_role(&user.role) {
        Ok(role) => role,
        Err(err) => {
            tracing::warn!(
                user_id = %user_id,
                role = %user.role,
                error = %err,
                "skipping roster row"
            );
            return None;
        }
    };
    let email = user.email.filter(|e| !e.trim().is_empty());
    Some(AccountFingerprintStatus::new(
        user_id,
        user.name,
        email,
        role,
        user.fingerprint_id,
    ))
}

fn parse_role(raw: &str) -> Result<ConsoleRole, RosterError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "admin" => Ok(ConsoleRole::Admin),
        "hr" => Ok(ConsoleRole::Hr),
        "accountant" => Ok(ConsoleRole::Accountant),
        "employee" => Ok(ConsoleRole::Employee),
        "applicant" => Ok(ConsoleRole::Applicant),
        "supervisor" => Ok(ConsoleRole::Supervisor),
        other => Err(RosterError::Protocol(format!("unknown role: {other:?}"))),
    }
}

fn roster_error(err: HttpError) -> RosterError {
    match err {
        HttpError::Decode(msg) => RosterError::Protocol(msg),
        other => RosterError::Transport(other.to_string()),
    }
}
