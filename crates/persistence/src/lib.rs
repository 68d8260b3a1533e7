//! Rewards Admin Persistence - saved sessions and token encryption

pub mod encryption;
pub mod sqlite;
pub mod vault;

pub use encryption::{derive_machine_key, SealedToken, TokenCipher};
pub use sqlite::Database;
pub use vault::{ActiveSession, SessionVault};
