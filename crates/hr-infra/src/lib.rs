//! HR console infrastructure
//!
//! Adapters from the `hr-core` ports to the backend's HTTP API.

pub mod http;

pub use http::{ApiClient, HttpEnrollmentStore, HttpError, HttpRosterClient};
