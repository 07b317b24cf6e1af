use std::sync::Arc;

use hr_core::enrollment::EnrollmentPolicy;
use hr_core::ids::UserId;
use hr_core::ports::EnrollmentStorePort;

use super::EnrollmentController;
use crate::usecases::roster::RosterRefresher;

/// Builds one controller per opened view, sharing the store and refresher.
#[derive(Clone)]
pub struct EnrollmentControllerFactory {
    policy: EnrollmentPolicy,
    store: Arc<dyn EnrollmentStorePort>,
    roster: Arc<dyn RosterRefresher>,
}

impl EnrollmentControllerFactory {
    pub fn new(
        policy: EnrollmentPolicy,
        store: Arc<dyn EnrollmentStorePort>,
        roster: Arc<dyn RosterRefresher>,
    ) -> Self {
        Self {
            policy,
            store,
            roster,
        }
    }

    pub fn policy(&self) -> &EnrollmentPolicy {
        &self.policy
    }

    pub fn create(&self, user_id: UserId) -> EnrollmentController {
        EnrollmentController::new(
            user_id,
            self.policy,
            self.store.clone(),
            self.roster.clone(),
        )
    }
}
