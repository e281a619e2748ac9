//! Shopping cart: items, derived total and the shared store.

mod item;
mod state;
mod store;

pub use item::{CartItem, NewCartItem};
pub use state::CartState;
pub use store::CartStore;

use common::OrderId;
use thiserror::Error;

/// Errors that can occur during cart operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    /// The cart belongs to an order that is still in progress.
    #[error("Cart is locked while order {} is in progress", order_id.short())]
    Frozen { order_id: OrderId },

    /// The cart has no items.
    #[error("Cart is empty")]
    Empty,
}
