//! Low-level HTTP client

mod client;
mod envelope;

pub use client::{AdminClient, ClientConfig};
pub use envelope::{error_message, unwrap_body};
