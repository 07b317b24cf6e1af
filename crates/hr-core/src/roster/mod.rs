//! Account roster as seen by the enrollment screens.

pub mod account;

pub use account::{AccountFingerprintStatus, ConsoleRole, FingerprintStatus, RosterAction};
