//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the infrastructure
//! that talks to the HR backend. Implementations live in `hr-infra`.

pub mod enrollment_store;
pub mod errors;
pub mod roster;

pub use enrollment_store::EnrollmentStorePort;
pub use errors::{EnrollmentStoreError, RosterError};
pub use roster::RosterPort;
