//! Data models for rewards platform entities

mod bonus;
mod catalog;
mod challenge;
mod integration;
mod lenient;
mod reward;
mod session;

pub use bonus::*;
pub use catalog::*;
pub use challenge::*;
pub use integration::*;
pub use reward::*;
pub use session::*;
