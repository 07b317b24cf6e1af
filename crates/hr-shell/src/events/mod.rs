//! Event forwarding to the front-end

pub mod enrollment;

pub use enrollment::{EnrollmentClosedEvent, EnrollmentFinishedEvent};

pub const ENROLLMENT_FINISHED: &str = "enrollment://finished";
pub const ENROLLMENT_CLOSED: &str = "enrollment://closed";

/// Delivers named JSON payloads to whatever front-end is attached.
pub trait EventEmitter: Send + Sync {
    fn emit(&self, event: &str, payload: serde_json::Value) -> anyhow::Result<()>;
}

/// Emitter for headless use; drops everything.
pub struct NoopEmitter;

impl EventEmitter for NoopEmitter {
    fn emit(&self, _event: &str, _payload: serde_json::Value) -> anyhow::Result<()> {
        Ok(())
    }
}
