//! Command surface against in-memory ports, on paused time.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use hr_core::config::AppConfig;
use hr_core::enrollment::{
    BeginOutcome, EnrollmentPanel, EnrollmentReport, EnrollmentState, EnrollmentStoreStatus,
};
use hr_core::ids::{DeviceToken, UserId};
use hr_core::ports::{EnrollmentStoreError, EnrollmentStorePort, RosterError, RosterPort};
use hr_core::roster::{AccountFingerprintStatus, ConsoleRole, RosterAction};
use hr_shell::commands;
use hr_shell::events::{ENROLLMENT_CLOSED, ENROLLMENT_FINISHED};
use hr_shell::{AppRuntime, EventEmitter};

/// Roster that binds the fingerprint once the store reports completion.
struct InMemoryRoster {
    bound: Mutex<Option<String>>,
}

#[async_trait]
impl RosterPort for InMemoryRoster {
    async fn list_accounts(&self) -> Result<Vec<AccountFingerprintStatus>, RosterError> {
        Ok(vec![AccountFingerprintStatus::new(
            UserId::from("EMP-1"),
            "Ada Lovelace",
            Some("ada@example.com".into()),
            ConsoleRole::Employee,
            self.bound.lock().unwrap().clone(),
        )])
    }

    async fn unregister_fingerprint(&self, _user_id: &UserId) -> Result<(), RosterError> {
        *self.bound.lock().unwrap() = None;
        Ok(())
    }
}

struct CompletingStore {
    roster: Arc<InMemoryRoster>,
    polls_before_completion: usize,
    polls: AtomicUsize,
}

#[async_trait]
impl EnrollmentStorePort for CompletingStore {
    async fn begin_enrollment(
        &self,
        _user_id: &UserId,
        _device_token: &DeviceToken,
    ) -> Result<BeginOutcome, EnrollmentStoreError> {
        Ok(BeginOutcome::Accepted)
    }

    async fn query_enrollment(
        &self,
        _user_id: &UserId,
        device_token: &DeviceToken,
    ) -> Result<EnrollmentReport, EnrollmentStoreError> {
        let poll = self.polls.fetch_add(1, Ordering::SeqCst) + 1;
        if poll < self.polls_before_completion {
            return Ok(EnrollmentReport::new(EnrollmentStoreStatus::Waiting));
        }
        *self.roster.bound.lock().unwrap() = Some(device_token.to_string());
        Ok(EnrollmentReport::new(EnrollmentStoreStatus::Completed))
    }
}

#[derive(Default)]
struct RecordingEmitter {
    events: Mutex<Vec<(String, serde_json::Value)>>,
}

impl RecordingEmitter {
    fn names(&self) -> Vec<String> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn payload(&self, name: &str) -> Option<serde_json::Value> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }
}

impl EventEmitter for RecordingEmitter {
    fn emit(&self, event: &str, payload: serde_json::Value) -> anyhow::Result<()> {
        self.events
            .lock()
            .unwrap()
            .push((event.to_string(), payload));
        Ok(())
    }
}

fn runtime(polls_before_completion: usize) -> (AppRuntime, Arc<RecordingEmitter>) {
    let roster = Arc::new(InMemoryRoster {
        bound: Mutex::new(None),
    });
    let store = Arc::new(CompletingStore {
        roster: roster.clone(),
        polls_before_completion,
        polls: AtomicUsize::new(0),
    });
    let emitter = Arc::new(RecordingEmitter::default());
    let runtime = AppRuntime::new(AppConfig::empty(), roster, store, emitter.clone());
    (runtime, emitter)
}

#[tokio::test(start_paused = true)]
async fn full_enrollment_refreshes_roster_and_auto_closes() {
    let (runtime, emitter) = runtime(3);

    let rows = commands::list_accounts(&runtime).await.unwrap();
    assert_eq!(rows[0].offered_action, RosterAction::Register);

    let model = commands::open_enrollment(&runtime, "EMP-1".into())
        .await
        .unwrap();
    assert_eq!(model.panel, EnrollmentPanel::Form);
    assert!(!model.submit_enabled);

    let model = commands::set_enrollment_token(&runtime, "FP-42".into())
        .await
        .unwrap();
    assert!(model.submit_enabled);

    let model = commands::start_enrollment(&runtime).await.unwrap();
    assert_eq!(model.state, EnrollmentState::Waiting);

    // Three polls at 1 s, then the 2 s success panel.
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    let model = commands::get_enrollment_view(&runtime).await.unwrap();
    assert_eq!(model.panel, EnrollmentPanel::Success);
    assert_eq!(model.auto_close_after_ms, Some(2000));

    let finished = emitter.payload(ENROLLMENT_FINISHED).unwrap();
    assert_eq!(finished["state"], "succeeded");
    assert_eq!(finished["userId"], "EMP-1");
    assert_eq!(finished["attemptsMade"], 3);
    assert_eq!(
        runtime.roster().offered_action(&UserId::from("EMP-1")).await,
        Some(RosterAction::Unregister)
    );

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(runtime.current_view().await.is_none());
    let closed = emitter.payload(ENROLLMENT_CLOSED).unwrap();
    assert_eq!(closed["autoClosed"], true);
    assert_eq!(emitter.names(), vec![ENROLLMENT_FINISHED, ENROLLMENT_CLOSED]);
}

#[tokio::test(start_paused = true)]
async fn commands_without_open_view_are_rejected() {
    let (runtime, _emitter) = runtime(1);

    let err = commands::start_enrollment(&runtime).await.unwrap_err();
    assert_eq!(err, "No enrollment view is open");
    assert!(commands::close_enrollment(&runtime).await.is_ok());
}

#[tokio::test(start_paused = true)]
async fn opening_unknown_account_is_invalid_input() {
    let (runtime, _emitter) = runtime(1);

    let err = commands::open_enrollment(&runtime, "GHOST".into())
        .await
        .unwrap_err();

    assert!(err.contains("GHOST"), "unexpected error: {err}");
    assert!(runtime.current_view().await.is_none());
}

#[tokio::test(start_paused = true)]
async fn closing_mid_session_cancels_without_finished_event() {
    let (runtime, emitter) = runtime(5);

    commands::open_enrollment(&runtime, "EMP-1".into())
        .await
        .unwrap();
    commands::set_enrollment_token(&runtime, "FP-42".into())
        .await
        .unwrap();
    commands::start_enrollment(&runtime).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    commands::close_enrollment(&runtime).await.unwrap();
    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(emitter.names(), vec![ENROLLMENT_CLOSED]);
    let closed = emitter.payload(ENROLLMENT_CLOSED).unwrap();
    assert_eq!(closed["autoClosed"], false);
}

#[tokio::test(start_paused = true)]
async fn unregister_returns_refreshed_roster() {
    let (runtime, _emitter) = runtime(1);
    commands::open_enrollment(&runtime, "EMP-1".into())
        .await
        .unwrap();
    commands::set_enrollment_token(&runtime, "FP-9".into())
        .await
        .unwrap();
    commands::start_enrollment(&runtime).await.unwrap();
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    let rows = commands::unregister_fingerprint(&runtime, "EMP-1".into())
        .await
        .unwrap();

    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].fingerprint_identifier, None);
    assert_eq!(rows[0].offered_action, RosterAction::Register);
}
