use thiserror::Error;

use crate::ids::UserId;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EnrollmentStoreError {
    /// Backend unreachable, timed out, or answered with a server error.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered with something that could not be understood.
    #[error("protocol error: {0}")]
    Protocol(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RosterError {
    #[error("account not found: {0}")]
    NotFound(UserId),

    #[error("transport error: {0}")]
    Transport(String),

    #[error("protocol error: {0}")]
    Protocol(String),
}
