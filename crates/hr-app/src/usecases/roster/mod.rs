pub mod directory;
pub mod list_accounts;
pub mod unregister_fingerprint;

pub use directory::{RosterDirectory, RosterRefresher};
pub use list_accounts::ListAccounts;
pub use unregister_fingerprint::UnregisterFingerprint;
