//! Front-end commands
//!
//! Every command returns `Result<Dto, String>`; errors are logged here and
//! flattened through [`error::map_err`].

pub mod dto;
pub mod enrollment;
pub mod error;
pub mod roster;

pub use enrollment::{
    cancel_enrollment, close_enrollment, get_enrollment_view, open_enrollment, retry_enrollment,
    set_enrollment_token, start_enrollment,
};
pub use roster::{list_accounts, unregister_fingerprint};
