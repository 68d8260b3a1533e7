//! High-level API wrappers for the admin endpoints
//!
//! [`Resource`] covers the uniform list/create/update/delete collections; the
//! domain modules add the endpoints that do not fit that shape.

mod bonuses;
mod catalog;
mod challenges;
mod integrations;
mod master_data;
mod resource;

#[cfg(test)]
mod test_server;

pub use bonuses::*;
pub use catalog::*;
pub use challenges::*;
pub use integrations::*;
pub use master_data::*;
pub use resource::{Resource, ResourceApi};
