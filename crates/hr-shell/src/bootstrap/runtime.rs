//! # Application runtime
//!
//! Holds the wired use cases and the one enrollment view the operator may
//! have open at a time.
//!
//! Commands call `runtime.usecases().xxx()` for roster use cases and
//! `runtime.open_view()` / `runtime.current_view()` for enrollment.

use std::sync::{Arc, Weak};

use tokio::sync::{mpsc, Mutex};
use tracing::{info_span, Instrument};

use hr_app::{
    EnrollmentControllerFactory, EnrollmentDomainEvent, EnrollmentView, ListAccounts,
    RosterDirectory, UnregisterFingerprint,
};
use hr_core::config::AppConfig;
use hr_core::enrollment::{EnrollmentError, EnrollmentOutcome, EnrollmentPolicy, EnrollmentState};
use hr_core::ids::UserId;
use hr_core::ports::{EnrollmentStorePort, RosterPort};

use crate::events::enrollment::{forward_enrollment_closed, forward_enrollment_finished};
use crate::events::EventEmitter;

type ViewSlot = Arc<Mutex<Option<Arc<EnrollmentView>>>>;

pub struct AppRuntime {
    config: AppConfig,
    roster: Arc<RosterDirectory>,
    factory: EnrollmentControllerFactory,
    emitter: Arc<dyn EventEmitter>,
    current_view: ViewSlot,
}

impl AppRuntime {
    pub fn new(
        config: AppConfig,
        roster: Arc<dyn RosterPort>,
        store: Arc<dyn EnrollmentStorePort>,
        emitter: Arc<dyn EventEmitter>,
    ) -> Self {
        let policy = EnrollmentPolicy::from_config(&config.enrollment);
        let roster = Arc::new(RosterDirectory::new(roster));
        let factory = EnrollmentControllerFactory::new(policy, store, roster.clone());
        Self {
            config,
            roster,
            factory,
            emitter,
            current_view: Arc::new(Mutex::new(None)),
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn policy(&self) -> &EnrollmentPolicy {
        self.factory.policy()
    }

    pub fn roster(&self) -> &Arc<RosterDirectory> {
        &self.roster
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases { runtime: self }
    }

    pub async fn current_view(&self) -> Option<Arc<EnrollmentView>> {
        self.current_view.lock().await.clone()
    }

    /// Open the enrollment view for `user_id`, closing any view already open.
    pub async fn open_view(
        &self,
        user_id: &UserId,
    ) -> Result<Arc<EnrollmentView>, EnrollmentError> {
        let view = Arc::new(EnrollmentView::open(&self.roster, &self.factory, user_id).await?);
        let events = view
            .subscribe()
            .await
            .map_err(|e| EnrollmentError::TransportFailure(e.to_string()))?;

        let previous = self.current_view.lock().await.replace(view.clone());
        if let Some(previous) = previous {
            self.discard(&previous, false).await;
        }
        self.spawn_event_forwarder(&view, events);
        Ok(view)
    }

    /// Close the open view, if any.
    pub async fn close_view(&self) -> Option<EnrollmentState> {
        let view = self.current_view.lock().await.take()?;
        Some(self.discard(&view, false).await)
    }

    async fn discard(&self, view: &EnrollmentView, auto_closed: bool) -> EnrollmentState {
        close_and_announce(self.emitter.as_ref(), view, auto_closed).await
    }

    /// Forward finished events; after a success, close the view once the
    /// auto-close delay has passed, unless the operator already replaced it.
    fn spawn_event_forwarder(
        &self,
        view: &Arc<EnrollmentView>,
        mut events: mpsc::Receiver<EnrollmentDomainEvent>,
    ) {
        let slot = self.current_view.clone();
        let emitter = self.emitter.clone();
        let auto_close = self.policy().success_auto_close;
        let weak: Weak<EnrollmentView> = Arc::downgrade(view);
        let span = info_span!("enrollment.events", user_id = %view.account().user_id);

        tokio::spawn(
            async move {
                while let Some(event) = events.recv().await {
                    if let Err(err) = forward_enrollment_finished(emitter.as_ref(), &event) {
                        tracing::warn!(error = %err, "Failed to forward enrollment event");
                    }

                    let EnrollmentDomainEvent::Finished { outcome, .. } = &event;
                    if *outcome != EnrollmentOutcome::Succeeded {
                        continue;
                    }

                    tokio::time::sleep(auto_close).await;
                    let closing = {
                        let mut slot = slot.lock().await;
                        let still_open = match (slot.as_ref(), weak.upgrade()) {
                            (Some(current), Some(view)) => Arc::ptr_eq(current, &view),
                            _ => false,
                        };
                        if still_open {
                            slot.take()
                        } else {
                            None
                        }
                    };
                    if let Some(view) = closing {
                        close_and_announce(emitter.as_ref(), &view, true).await;
                    }
                }
                tracing::debug!("enrollment event stream ended");
            }
            .instrument(span),
        );
    }
}

async fn close_and_announce(
    emitter: &dyn EventEmitter,
    view: &EnrollmentView,
    auto_closed: bool,
) -> EnrollmentState {
    let state = view.close().await;
    if let Err(err) =
        forward_enrollment_closed(emitter, view.account().user_id.as_str(), auto_closed)
    {
        tracing::warn!(error = %err, "Failed to forward enrollment close");
    }
    state
}

/// Use case accessor; each call builds a fresh use case over the shared roster.
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl UseCases<'_> {
    pub fn list_accounts(&self) -> ListAccounts {
        ListAccounts::new(self.runtime.roster.clone())
    }

    pub fn unregister_fingerprint(&self) -> UnregisterFingerprint {
        UnregisterFingerprint::new(self.runtime.roster.clone())
    }
}
