//! Rewards Admin Networking - HTTP client and per-domain API wrappers

pub mod api;
pub mod http;

pub use api::{Resource, ResourceApi, StreakBonusApi};
pub use http::{AdminClient, ClientConfig};
