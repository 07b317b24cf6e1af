//! Business logic use cases
//!
//! ```text
//! RosterDirectory (cached roster)
//!     ↓ find / offered_action
//! EnrollmentView (draft token + rendering)
//!     ↓ submit / cancel / retry / close
//! EnrollmentController (session + poll loop)
//!     ↓ on success
//! RosterDirectory::refresh
//! ```

pub mod enrollment;
pub mod roster;

pub use enrollment::{
    EnrollmentController, EnrollmentControllerFactory, EnrollmentDomainEvent, EnrollmentEventPort,
    EnrollmentView,
};
pub use roster::{ListAccounts, RosterDirectory, RosterRefresher, UnregisterFingerprint};
