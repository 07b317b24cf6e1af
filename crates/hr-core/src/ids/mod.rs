//! ID type wrappers for type safety.

mod id_macro;

pub mod device_token;
pub mod session_id;
pub mod user_id;

pub use device_token::{DeviceToken, DeviceTokenError};
pub use session_id::EnrollmentSessionId;
pub use user_id::UserId;
