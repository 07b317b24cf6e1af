//! Biometric enrollment domain.
//!
//! An enrollment binds one fingerprint scan, performed on an out-of-band
//! device, to one user account. The flow is driven by a pure state machine:
//!
//! ```text
//! EnrollmentStateMachine (hr-core)
//!   ├── EnrollmentSession: current snapshot
//!   ├── EnrollmentEvent:   operator commands and backend results
//!   └── EnrollmentAction:  side effects for the controller to execute
//!
//! EnrollmentController (hr-app)
//!   ├── performs BeginEnrollment / QueryEnrollment against the store
//!   ├── owns the single poll timer
//!   └── publishes the terminal outcome
//! ```

pub mod action;
pub mod error;
pub mod event;
pub mod outcome;
pub mod policy;
pub mod report;
pub mod session;
pub mod state;
pub mod state_machine;
pub mod view;

pub use action::EnrollmentAction;
pub use error::{EnrollmentError, InvalidInputReason};
pub use event::EnrollmentEvent;
pub use outcome::{EnrollmentOutcome, StartFailure};
pub use policy::EnrollmentPolicy;
pub use report::{BeginOutcome, EnrollmentReport, EnrollmentStoreStatus};
pub use session::EnrollmentSession;
pub use state::EnrollmentState;
pub use state_machine::{EnrollmentStateMachine, DEFAULT_FAILURE_REASON};
pub use view::{render_view, EnrollmentPanel, EnrollmentViewModel, ViewCommand};
