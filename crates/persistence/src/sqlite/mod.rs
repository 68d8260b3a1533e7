//! SQLite storage for saved sessions

mod connection;
mod sessions;

pub use connection::Database;
pub use sessions::*;
