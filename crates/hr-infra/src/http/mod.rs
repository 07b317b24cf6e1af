pub mod client;
pub mod enrollment_store;
pub mod roster;

pub use client::{ApiClient, HttpError};
pub use enrollment_store::HttpEnrollmentStore;
pub use roster::HttpRosterClient;
