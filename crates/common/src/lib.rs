//! Shared identifier types.

mod types;

pub use types::{ItemId, OrderId};
