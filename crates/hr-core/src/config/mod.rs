//! # Pure Data Module - Data Transfer Objects Only
//!
//! Configuration data structures and the TOML → DTO mapping.
//!
//! This module contains data only: no policy, no validation, no default value
//! calculation. Policy lives next to the code that consumes the values
//! (see [`crate::enrollment::EnrollmentPolicy::from_config`]).

pub mod app_config;

pub use app_config::{ApiConfig, AppConfig, EnrollmentConfig};
