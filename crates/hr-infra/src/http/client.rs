use std::time::Duration;

use anyhow::Context;
use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use hr_core::config::ApiConfig;

pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("request timed out")]
    Timeout,

    #[error("network error: {0}")]
    Network(String),

    #[error("server error: {0}")]
    Server(StatusCode),

    /// 4xx with the backend's message, if it sent one.
    #[error("request refused ({status}): {message}")]
    Refused { status: StatusCode, message: String },

    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for HttpError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_timeout() {
            HttpError::Timeout
        } else if error.is_decode() {
            HttpError::Decode(error.to_string())
        } else {
            HttpError::Network(error.to_string())
        }
    }
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Shared HTTP client for the backend API.
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> anyhow::Result<Self> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            anyhow::bail!("api.base_url is not configured");
        }
        let timeout = match config.request_timeout_ms {
            0 => DEFAULT_REQUEST_TIMEOUT,
            ms => Duration::from_millis(ms),
        };
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;
        let token = Some(config.token.trim())
            .filter(|t| !t.is_empty())
            .map(str::to_string);

        tracing::debug!(
            base_url = %base_url,
            timeout_ms = timeout.as_millis() as u64,
            "API client ready"
        );
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}{}", self.base_url, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send and sort the response by status class.
    pub(crate) async fn send(&self, builder: RequestBuilder) -> Result<Response, HttpError> {
        let response = builder.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status.is_server_error() {
            return Err(HttpError::Server(status));
        }
        let message = refusal_message(response).await;
        Err(HttpError::Refused { status, message })
    }
}

async fn refusal_message(response: Response) -> String {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    serde_json::from_str::<ErrorBody>(&body)
        .ok()
        .and_then(|b| b.message)
        .map(|m| m.trim().to_string())
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("request refused")
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(base_url: &str, token: &str) -> ApiConfig {
        ApiConfig {
            base_url: base_url.to_string(),
            token: token.to_string(),
            request_timeout_ms: 0,
        }
    }

    #[test]
    fn empty_base_url_is_rejected() {
        let err = ApiClient::new(&api("  ", "")).err().unwrap();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let client = ApiClient::new(&api("http://hr.local/api/", "")).unwrap();
        assert_eq!(client.base_url(), "http://hr.local/api");
    }

    #[tokio::test]
    async fn bearer_token_is_attached() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/users")
            .match_header("authorization", "Bearer s3cret")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;
        let client = ApiClient::new(&api(&server.url(), "s3cret")).unwrap();

        let response = client
            .send(client.request(Method::GET, "/users"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn refusal_without_message_falls_back_to_reason() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/users")
            .with_status(403)
            .create_async()
            .await;
        let client = ApiClient::new(&api(&server.url(), "")).unwrap();

        let err = client
            .send(client.request(Method::GET, "/users"))
            .await
            .unwrap_err();

        match err {
            HttpError::Refused { status, message } => {
                assert_eq!(status, StatusCode::FORBIDDEN);
                assert_eq!(message, "Forbidden");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
