//! # hr-core
//!
//! Core domain models and business logic for the HR console's biometric
//! enrollment flow.
//!
//! This crate contains pure business logic without any infrastructure dependencies.

pub mod config;
pub mod enrollment;
pub mod ids;
pub mod ports;
pub mod roster;

// Re-export commonly used types at the crate root
pub use config::AppConfig;
pub use enrollment::{
    EnrollmentError, EnrollmentOutcome, EnrollmentPolicy, EnrollmentSession, EnrollmentState,
};
pub use ids::{DeviceToken, EnrollmentSessionId, UserId};
pub use roster::{AccountFingerprintStatus, FingerprintStatus};
