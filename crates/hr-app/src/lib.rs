//! HR console application layer
//!
//! Enrollment orchestration and roster use cases over the ports in `hr-core`.

pub mod usecases;

pub use usecases::{
    EnrollmentController, EnrollmentControllerFactory, EnrollmentDomainEvent, EnrollmentEventPort,
    EnrollmentView, ListAccounts, RosterDirectory, RosterRefresher, UnregisterFingerprint,
};
