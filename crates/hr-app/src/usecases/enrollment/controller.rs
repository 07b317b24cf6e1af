//! Enrollment controller
//!
//! Drives one account's [`EnrollmentSession`] through the pure
//! [`EnrollmentStateMachine`], executing the actions it returns.
//!
//! # Architecture
//!
//! ```text
//! Operator commands / store results / poll timer
//!   ↓
//! EnrollmentController (converts to EnrollmentEvent)
//!   ↓
//! EnrollmentStateMachine (pure transitions)
//!   ↓
//! EnrollmentActions (executed here)
//!   ↓
//! Store queries / poll timer / roster refresh / finished event
//! ```
//!
//! The poll loop is a single self-rescheduling timer task. The next tick is
//! armed only after the current tick's result has been applied, so ticks never
//! overlap. Every exit from `Waiting` disarms the timer, and results carrying a
//! stale session id are dropped.

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, Mutex};
use tokio::task::AbortHandle;
use tracing::{info_span, Instrument};

use hr_core::enrollment::{
    BeginOutcome, EnrollmentAction, EnrollmentError, EnrollmentEvent, EnrollmentPolicy,
    EnrollmentSession, EnrollmentState, EnrollmentStateMachine, InvalidInputReason,
};
use hr_core::ids::{DeviceToken, EnrollmentSessionId, UserId};
use hr_core::ports::EnrollmentStorePort;

use super::{EnrollmentDomainEvent, EnrollmentEventPort};
use crate::usecases::roster::RosterRefresher;

type PollFuture = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Who is applying an event.
///
/// The poll task must not abort its own handle while it is still running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Origin {
    Operator,
    PollTask,
}

struct ControllerInner {
    session: EnrollmentSession,
    poll_timer: Option<AbortHandle>,
}

#[derive(Clone)]
pub struct EnrollmentController {
    user_id: UserId,
    policy: EnrollmentPolicy,
    inner: Arc<Mutex<ControllerInner>>,
    store: Arc<dyn EnrollmentStorePort>,
    roster: Arc<dyn RosterRefresher>,
    event_senders: Arc<Mutex<Vec<mpsc::Sender<EnrollmentDomainEvent>>>>,
}

impl EnrollmentController {
    pub fn new(
        user_id: UserId,
        policy: EnrollmentPolicy,
        store: Arc<dyn EnrollmentStorePort>,
        roster: Arc<dyn RosterRefresher>,
    ) -> Self {
        let session = EnrollmentSession::idle(user_id.clone(), &policy);
        Self {
            user_id,
            policy,
            inner: Arc::new(Mutex::new(ControllerInner {
                session,
                poll_timer: None,
            })),
            store,
            roster,
            event_senders: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn user_id(&self) -> &UserId {
        &self.user_id
    }

    pub fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }

    /// Read-only copy of the current session.
    pub async fn snapshot(&self) -> EnrollmentSession {
        self.inner.lock().await.session.clone()
    }

    /// Whether a poll timer is armed.
    pub async fn has_pending_poll(&self) -> bool {
        self.inner.lock().await.poll_timer.is_some()
    }

    /// Open a session and, once the store accepts it, start polling.
    ///
    /// Input problems and misuse come back as `Err` without contacting the
    /// store. A rejected or undeliverable start is a normal result: the
    /// returned snapshot is in `Error` and the finished event has fired.
    pub async fn start(
        &self,
        user_id: &UserId,
        device_token: &str,
    ) -> Result<EnrollmentSession, EnrollmentError> {
        if user_id.is_blank() {
            return Err(EnrollmentError::invalid(InvalidInputReason::EmptyUserId));
        }
        if user_id != &self.user_id {
            return Err(EnrollmentError::invalid(
                InvalidInputReason::AccountMismatch {
                    expected: self.user_id.clone(),
                    actual: user_id.clone(),
                },
            ));
        }
        let device_token = DeviceToken::parse(device_token)
            .map_err(|_| EnrollmentError::invalid(InvalidInputReason::EmptyDeviceToken))?;

        let session_id = EnrollmentSessionId::new();
        let span = info_span!(
            "enrollment.start",
            user_id = %self.user_id,
            session_id = %session_id
        );
        async {
            let deferred = {
                let mut inner = self.inner.lock().await;
                let state = inner.session.state();
                if state.is_in_flight() {
                    return Err(EnrollmentError::SessionInFlight);
                }
                if state != EnrollmentState::Idle {
                    return Err(EnrollmentError::NotIdle { state });
                }
                self.apply_locked(
                    &mut inner,
                    EnrollmentEvent::Start {
                        session_id: session_id.clone(),
                        device_token,
                    },
                    Origin::Operator,
                )
                .0
            };

            for action in deferred {
                match action {
                    EnrollmentAction::BeginEnrollment {
                        user_id,
                        device_token,
                    } => {
                        tracing::info!("requesting enrollment session");
                        let event = match self.store.begin_enrollment(&user_id, &device_token).await
                        {
                            Ok(BeginOutcome::Accepted) => EnrollmentEvent::StartAccepted,
                            Ok(BeginOutcome::Rejected { reason }) => {
                                tracing::warn!(reason = %reason, "enrollment start rejected");
                                EnrollmentEvent::StartRejected { reason }
                            }
                            Err(err) => {
                                tracing::error!(error = %err, "enrollment start failed");
                                EnrollmentEvent::StartTransportFailed {
                                    error: err.to_string(),
                                }
                            }
                        };
                        self.dispatch_result(&session_id, event, Origin::Operator).await;
                    }
                    other => {
                        tracing::debug!(action = ?other, "unexpected action on start");
                    }
                }
            }

            Ok(self.snapshot().await)
        }
        .instrument(span)
        .await
    }

    /// Stop polling and discard the in-flight session.
    ///
    /// The timer is disarmed before this returns; a result already on the wire
    /// is dropped when it arrives.
    pub async fn cancel(&self) -> EnrollmentSession {
        let mut inner = self.inner.lock().await;
        let state = inner.session.state();
        if !state.is_in_flight() {
            tracing::debug!(user_id = %self.user_id, state = %state, "cancel ignored");
            return inner.session.clone();
        }
        let session_id = inner.session.session_id().cloned();
        let (_deferred, session) =
            self.apply_locked(&mut inner, EnrollmentEvent::Cancel, Origin::Operator);
        tracing::info!(
            user_id = %self.user_id,
            session_id = ?session_id.as_ref().map(|id| id.as_str()),
            "enrollment cancelled"
        );
        session
    }

    /// Return a failed, timed-out, expired or errored session to `Idle`.
    pub async fn retry(&self) -> Result<EnrollmentSession, EnrollmentError> {
        let mut inner = self.inner.lock().await;
        let state = inner.session.state();
        if !state.is_retryable() {
            return Err(EnrollmentError::NotRetryable { state });
        }
        let (_deferred, session) =
            self.apply_locked(&mut inner, EnrollmentEvent::Retry, Origin::Operator);
        tracing::info!(user_id = %self.user_id, from = %state, "enrollment reset for retry");
        Ok(session)
    }

    /// Apply an event under the lock and run the timer actions.
    ///
    /// Returns the actions that must run outside the lock, plus the new snapshot.
    fn apply_locked(
        &self,
        inner: &mut ControllerInner,
        event: EnrollmentEvent,
        origin: Origin,
    ) -> (Vec<EnrollmentAction>, EnrollmentSession) {
        let (next, actions) = EnrollmentStateMachine::transition(inner.session.clone(), event);
        inner.session = next;

        let mut deferred = Vec::new();
        for action in actions {
            match action {
                EnrollmentAction::SchedulePoll { delay } => {
                    self.arm_poll_timer(inner, delay, origin);
                }
                EnrollmentAction::ClearPollTimer => {
                    Self::clear_poll_timer(inner, origin);
                }
                other => deferred.push(other),
            }
        }
        (deferred, inner.session.clone())
    }

    fn arm_poll_timer(&self, inner: &mut ControllerInner, delay: Duration, origin: Origin) {
        Self::clear_poll_timer(inner, origin);
        let Some(session_id) = inner.session.session_id().cloned() else {
            tracing::warn!(user_id = %self.user_id, "poll scheduled without a session");
            return;
        };
        let handle = tokio::spawn(self.clone().poll_tick(session_id, delay));
        inner.poll_timer = Some(handle.abort_handle());
    }

    fn clear_poll_timer(inner: &mut ControllerInner, origin: Origin) {
        if let Some(handle) = inner.poll_timer.take() {
            // The poll task drops its own handle; it finishes on its own.
            if origin == Origin::Operator {
                handle.abort();
            }
        }
    }

    fn poll_tick(self, session_id: EnrollmentSessionId, delay: Duration) -> PollFuture {
        let span = info_span!(
            "enrollment.poll",
            user_id = %self.user_id,
            session_id = %session_id
        );
        Box::pin(
            async move {
                tokio::time::sleep(delay).await;
                self.run_poll(session_id).await;
            }
            .instrument(span),
        )
    }

    async fn run_poll(&self, session_id: EnrollmentSessionId) {
        let (deferred, session) = {
            let mut inner = self.inner.lock().await;
            if !inner.session.is_current(&session_id) {
                tracing::debug!("poll tick for discarded session");
                return;
            }
            self.apply_locked(&mut inner, EnrollmentEvent::PollDue, Origin::PollTask)
        };

        let mut query = None;
        let mut rest = Vec::new();
        for action in deferred {
            match action {
                EnrollmentAction::QueryEnrollment {
                    user_id,
                    device_token,
                } => query = Some((user_id, device_token)),
                other => rest.push(other),
            }
        }
        self.run_deferred(&session_id, &session, rest).await;

        let Some((user_id, device_token)) = query else {
            return;
        };
        let event = match self.store.query_enrollment(&user_id, &device_token).await {
            Ok(report) => {
                tracing::debug!(
                    attempt = session.attempts_made(),
                    status = ?report.status,
                    "enrollment status received"
                );
                EnrollmentEvent::PollReported(report)
            }
            Err(err) => {
                // Counted as a `waiting` answer; only the budget escalates it.
                tracing::debug!(
                    attempt = session.attempts_made(),
                    error = %err,
                    "enrollment status query failed"
                );
                EnrollmentEvent::PollTransportFailed {
                    error: err.to_string(),
                }
            }
        };
        self.dispatch_result(&session_id, event, Origin::PollTask).await;
    }

    /// Apply a store result if it still belongs to the live session.
    async fn dispatch_result(
        &self,
        session_id: &EnrollmentSessionId,
        event: EnrollmentEvent,
        origin: Origin,
    ) {
        let (deferred, session) = {
            let mut inner = self.inner.lock().await;
            if !inner.session.is_current(session_id) {
                tracing::debug!(
                    session_id = %session_id,
                    event = event.name(),
                    "dropping result for discarded session"
                );
                return;
            }
            if origin == Origin::PollTask {
                // This task is the armed timer; it is finishing now.
                inner.poll_timer = None;
            }
            self.apply_locked(&mut inner, event, origin)
        };
        self.run_deferred(session_id, &session, deferred).await;
    }

    async fn run_deferred(
        &self,
        session_id: &EnrollmentSessionId,
        session: &EnrollmentSession,
        actions: Vec<EnrollmentAction>,
    ) {
        for action in actions {
            match action {
                EnrollmentAction::RequestRosterRefresh { user_id } => {
                    if let Err(err) = self.roster.refresh().await {
                        tracing::warn!(
                            user_id = %user_id,
                            error = %err,
                            "roster refresh after enrollment failed"
                        );
                    }
                }
                EnrollmentAction::NotifyFinished(outcome) => {
                    tracing::info!(
                        session_id = %session_id,
                        outcome = ?outcome,
                        attempts = session.attempts_made(),
                        "enrollment finished"
                    );
                    self.emit_event(EnrollmentDomainEvent::Finished {
                        session_id: session_id.clone(),
                        user_id: session.user_id().clone(),
                        outcome,
                        attempts_made: session.attempts_made(),
                    })
                    .await;
                }
                other => {
                    tracing::debug!(action = ?other, "action not runnable here");
                }
            }
        }
    }

    async fn emit_event(&self, event: EnrollmentDomainEvent) {
        let senders = { self.event_senders.lock().await.clone() };
        for sender in senders {
            if sender.send(event.clone()).await.is_err() {
                tracing::debug!("Enrollment event receiver dropped");
            }
        }
    }
}

#[async_trait::async_trait]
impl EnrollmentEventPort for EnrollmentController {
    async fn subscribe(&self) -> anyhow::Result<mpsc::Receiver<EnrollmentDomainEvent>> {
        let (event_tx, event_rx) = mpsc::channel(16);
        let mut senders = self.event_senders.lock().await;
        senders.push(event_tx);
        Ok(event_rx)
    }
}
