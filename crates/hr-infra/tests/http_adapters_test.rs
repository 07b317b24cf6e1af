use mockito::{Matcher, Server};
use serde_json::json;

use hr_core::config::ApiConfig;
use hr_core::enrollment::{BeginOutcome, EnrollmentStoreStatus};
use hr_core::ids::{DeviceToken, UserId};
use hr_core::ports::{EnrollmentStoreError, EnrollmentStorePort, RosterError, RosterPort};
use hr_core::roster::{ConsoleRole, FingerprintStatus};
use hr_infra::{ApiClient, HttpEnrollmentStore, HttpRosterClient};

fn client(base_url: &str) -> ApiClient {
    ApiClient::new(&ApiConfig {
        base_url: base_url.to_string(),
        token: String::new(),
        request_timeout_ms: 2_000,
    })
    .unwrap()
}

fn ids() -> (UserId, DeviceToken) {
    (UserId::from("42"), DeviceToken::parse("FP-7").unwrap())
}

#[tokio::test]
async fn begin_posts_user_and_fingerprint() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("POST", "/fingerprint/enrollments")
        .match_body(Matcher::Json(json!({
            "user_id": "42",
            "fingerprint_id": "FP-7"
        })))
        .with_status(201)
        .with_header("content-type", "application/json")
        .with_body(r#"{"accepted":true}"#)
        .create_async()
        .await;
    let store = HttpEnrollmentStore::new(client(&server.url()));
    let (user, token) = ids();

    let outcome = store.begin_enrollment(&user, &token).await.unwrap();

    assert_eq!(outcome, BeginOutcome::Accepted);
    mock.assert_async().await;
}

#[tokio::test]
async fn begin_refusal_carries_backend_reason() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/fingerprint/enrollments")
        .with_status(409)
        .with_body(r#"{"message":"fingerprint FP-7 is bound to another account"}"#)
        .create_async()
        .await;
    let store = HttpEnrollmentStore::new(client(&server.url()));
    let (user, token) = ids();

    let outcome = store.begin_enrollment(&user, &token).await.unwrap();

    assert_eq!(
        outcome,
        BeginOutcome::Rejected {
            reason: "fingerprint FP-7 is bound to another account".into()
        }
    );
}

#[tokio::test]
async fn begin_accepted_false_is_a_rejection() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/fingerprint/enrollments")
        .with_status(200)
        .with_body(r#"{"accepted":false,"message":"scanner offline"}"#)
        .create_async()
        .await;
    let store = HttpEnrollmentStore::new(client(&server.url()));
    let (user, token) = ids();

    let outcome = store.begin_enrollment(&user, &token).await.unwrap();

    assert_eq!(
        outcome,
        BeginOutcome::Rejected {
            reason: "scanner offline".into()
        }
    );
}

#[tokio::test]
async fn begin_server_error_is_transport_failure() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("POST", "/fingerprint/enrollments")
        .with_status(503)
        .create_async()
        .await;
    let store = HttpEnrollmentStore::new(client(&server.url()));
    let (user, token) = ids();

    let err = store.begin_enrollment(&user, &token).await.unwrap_err();

    assert!(matches!(err, EnrollmentStoreError::Transport(_)));
}

#[tokio::test]
async fn unreachable_backend_is_transport_failure() {
    let store = HttpEnrollmentStore::new(client("http://127.0.0.1:1"));
    let (user, token) = ids();

    let err = store.query_enrollment(&user, &token).await.unwrap_err();

    assert!(matches!(err, EnrollmentStoreError::Transport(_)));
}

#[tokio::test]
async fn query_sends_identifiers_and_maps_pending_to_waiting() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/fingerprint/enrollments/status")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("user_id".into(), "42".into()),
            Matcher::UrlEncoded("fingerprint_id".into(), "FP-7".into()),
        ]))
        .with_status(200)
        .with_body(r#"{"status":"pending"}"#)
        .create_async()
        .await;
    let store = HttpEnrollmentStore::new(client(&server.url()));
    let (user, token) = ids();

    let report = store.query_enrollment(&user, &token).await.unwrap();

    assert_eq!(report.status, EnrollmentStoreStatus::Waiting);
    assert_eq!(report.message, None);
    mock.assert_async().await;
}

#[tokio::test]
async fn query_failed_keeps_message() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/fingerprint/enrollments/status")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"failed","message":"mismatch"}"#)
        .create_async()
        .await;
    let store = HttpEnrollmentStore::new(client(&server.url()));
    let (user, token) = ids();

    let report = store.query_enrollment(&user, &token).await.unwrap();

    assert_eq!(report.status, EnrollmentStoreStatus::Failed);
    assert_eq!(report.message.as_deref(), Some("mismatch"));
}

#[tokio::test]
async fn query_unknown_status_is_protocol_error() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/fingerprint/enrollments/status")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"status":"archived"}"#)
        .create_async()
        .await;
    let store = HttpEnrollmentStore::new(client(&server.url()));
    let (user, token) = ids();

    let err = store.query_enrollment(&user, &token).await.unwrap_err();

    assert!(matches!(err, EnrollmentStoreError::Protocol(_)));
}

#[tokio::test]
async fn list_accounts_accepts_numeric_and_string_ids() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/users")
        .with_status(200)
        .with_body(
            json!([
                {
                    "id": 7,
                    "name": "Ada",
                    "email": "ada@example.com",
                    "role": "hr",
                    "fingerprint_id": "FP-1"
                },
                {
                    "id": "EMP-9",
                    "name": "Bo",
                    "email": null,
                    "role": "Employee",
                    "fingerprint_id": ""
                }
            ])
            .to_string(),
        )
        .create_async()
        .await;
    let roster = HttpRosterClient::new(client(&server.url()));

    let accounts = roster.list_accounts().await.unwrap();

    assert_eq!(accounts.len(), 2);
    assert_eq!(accounts[0].user_id, UserId::from("7"));
    assert_eq!(accounts[0].role, ConsoleRole::Hr);
    assert_eq!(accounts[0].status, FingerprintStatus::Registered);
    assert_eq!(accounts[1].user_id, UserId::from("EMP-9"));
    assert_eq!(accounts[1].email, None);
    assert_eq!(accounts[1].status, FingerprintStatus::NotRegistered);
}

#[tokio::test]
async fn unregister_missing_account_is_not_found() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/users/42/fingerprint")
        .with_status(404)
        .create_async()
        .await;
    let roster = HttpRosterClient::new(client(&server.url()));

    let err = roster
        .unregister_fingerprint(&UserId::from("42"))
        .await
        .unwrap_err();

    assert_eq!(err, RosterError::NotFound(UserId::from("42")));
    mock.assert_async().await;
}

#[tokio::test]
async fn list_accounts_skips_rows_with_unknown_role() {
    let mut server = Server::new_async().await;
    let _mock = server
        .mock("GET", "/users")
        .with_status(200)
        .with_body(
            json!([
                {"id": 1, "name": "Ada", "role": "employee"},
                {"id": 2, "name": "Bo", "role": "manager"}
            ])
            .to_string(),
        )
        .create_async()
        .await;
    let roster = HttpRosterClient::new(client(&server.url()));

    let accounts = roster.list_accounts().await.unwrap();

    assert_eq!(accounts.len(), 1);
    assert_eq!(accounts[0].user_id, UserId::from("1"));
    assert_eq!(accounts[0].role, ConsoleRole::Employee);
}

#[tokio::test]
async fn unregister_encodes_user_id_in_path() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("DELETE", "/users/a%2Fb%3Fc/fingerprint")
        .with_status(204)
        .create_async()
        .await;
    let roster = HttpRosterClient::new(client(&server.url()));

    roster
        .unregister_fingerprint(&UserId::from("a/b?c"))
        .await
        .unwrap();

    mock.assert_async().await;
}
