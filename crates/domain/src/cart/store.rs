//! The shared cart store.

use std::sync::Arc;

use common::{ItemId, OrderId};
use tokio::sync::watch;

use super::{CartError, CartState, NewCartItem};

/// Session-wide cart store.
///
/// Every mutation is applied to the current snapshot in a single step and
/// published to subscribers. Clones share the same cart.
///
/// While the cart is frozen for an order in progress, every mutation is
/// rejected with [`CartError::Frozen`].
#[derive(Debug, Clone)]
pub struct CartStore {
    state: Arc<watch::Sender<CartState>>,
}

impl Default for CartStore {
    fn default() -> Self {
        Self::new()
    }
}

impl CartStore {
    /// Creates an empty cart.
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(CartState::default());
        Self {
            state: Arc::new(tx),
        }
    }

    /// Returns a snapshot of the current cart.
    pub fn state(&self) -> CartState {
        self.state.borrow().clone()
    }

    /// Returns a receiver that observes every published change.
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.state.subscribe()
    }

    /// Adds one unit of an item, appending it if not already present.
    #[tracing::instrument(skip(self, item), fields(item_id = %item.id))]
    pub fn add_item(&self, item: NewCartItem) -> Result<(), CartError> {
        self.mutate("add_item", |cart| cart.insert_or_increment(item))
    }

    /// Sets an item's quantity. Zero or less removes the item.
    #[tracing::instrument(skip(self))]
    pub fn update_quantity(&self, id: &ItemId, quantity: i64) -> Result<(), CartError> {
        self.mutate("update_quantity", |cart| cart.set_quantity(id, quantity))
    }

    /// Changes an item's quantity by `delta`, removing it when the result
    /// drops to zero or less.
    #[tracing::instrument(skip(self))]
    pub fn adjust_quantity(&self, id: &ItemId, delta: i64) -> Result<(), CartError> {
        self.mutate("adjust_quantity", |cart| cart.adjust_quantity(id, delta))
    }

    /// Removes an item. Unknown ids are ignored.
    #[tracing::instrument(skip(self))]
    pub fn remove_item(&self, id: &ItemId) -> Result<(), CartError> {
        self.mutate("remove_item", |cart| cart.remove(id))
    }

    /// Removes every item.
    #[tracing::instrument(skip(self))]
    pub fn clear(&self) -> Result<(), CartError> {
        self.mutate("clear", |cart| cart.clear())
    }

    /// Locks the cart for `order_id` and returns the locked contents.
    ///
    /// Fails if the cart is empty or already locked for another order.
    pub fn freeze(&self, order_id: OrderId) -> Result<CartState, CartError> {
        let mut outcome = Err(CartError::Empty);
        self.state.send_if_modified(|cart| {
            if let Some(current) = cart.frozen_for() {
                outcome = Err(CartError::Frozen { order_id: current });
                return false;
            }
            if cart.is_empty() {
                return false;
            }
            cart.freeze(order_id);
            outcome = Ok(cart.clone());
            true
        });
        if outcome.is_ok() {
            tracing::debug!(order_id = %order_id, "cart frozen");
        }
        outcome
    }

    /// Unlocks the cart if it is locked for `order_id`.
    ///
    /// Returns false when the cart was not locked for that order, so a stale
    /// caller cannot unlock a newer order's cart.
    pub fn thaw(&self, order_id: OrderId) -> bool {
        let thawed = self.state.send_if_modified(|cart| cart.thaw(order_id));
        if thawed {
            tracing::debug!(order_id = %order_id, "cart unfrozen");
        }
        thawed
    }

    fn mutate(
        &self,
        op: &'static str,
        apply: impl FnOnce(&mut CartState) -> bool,
    ) -> Result<(), CartError> {
        let mut outcome = Ok(());
        let changed = self.state.send_if_modified(|cart| {
            if let Some(order_id) = cart.frozen_for() {
                outcome = Err(CartError::Frozen { order_id });
                return false;
            }
            apply(cart)
        });

        match &outcome {
            Ok(()) => {
                metrics::counter!("cart_operations_total", "op" => op).increment(1);
                if changed {
                    let cart = self.state.borrow();
                    tracing::debug!(
                        op,
                        lines = cart.line_count(),
                        total = %cart.total(),
                        "cart updated"
                    );
                }
            }
            Err(e) => {
                metrics::counter!("cart_operations_rejected", "op" => op).increment(1);
                tracing::info!(op, error = %e, "cart operation rejected");
            }
        }
        outcome
    }
}
