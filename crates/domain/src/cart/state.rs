//! Cart snapshot and its transition rules.

use common::{ItemId, OrderId};
use serde::Serialize;

use super::{CartItem, NewCartItem};
use crate::money::Money;

/// A snapshot of the cart.
///
/// Items are unique by id and kept in first-add order. `total` is derived
/// from the items after every transition and has no setter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CartState {
    items: Vec<CartItem>,
    total: Money,
    frozen_for: Option<OrderId>,
}

// Query methods
impl CartState {
    /// Returns the items in first-add order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Returns an item by id.
    pub fn get(&self, id: &ItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.id == id)
    }

    /// Returns the sum of price * quantity over all items.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Returns true if the cart has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the number of distinct items.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Returns the total quantity across all items.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }

    /// Returns the order this cart is locked for, if any.
    pub fn frozen_for(&self) -> Option<OrderId> {
        self.frozen_for
    }

    /// Returns true if mutations are currently rejected.
    pub fn is_frozen(&self) -> bool {
        self.frozen_for.is_some()
    }
}

// Transitions. Each returns true when the snapshot changed.
impl CartState {
    pub(crate) fn insert_or_increment(&mut self, item: NewCartItem) -> bool {
        match self.items.iter_mut().find(|existing| existing.id == item.id) {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(1),
            None => self.items.push(item.into()),
        }
        self.recompute_total();
        true
    }

    pub(crate) fn set_quantity(&mut self, id: &ItemId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove(id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let Some(item) = self.items.iter_mut().find(|item| &item.id == id) else {
            return false;
        };
        if item.quantity == quantity {
            return false;
        }
        item.quantity = quantity;
        self.recompute_total();
        true
    }

    pub(crate) fn adjust_quantity(&mut self, id: &ItemId, delta: i64) -> bool {
        match self.get(id) {
            Some(item) => {
                let target = i64::from(item.quantity).saturating_add(delta);
                self.set_quantity(id, target)
            }
            None => false,
        }
    }

    pub(crate) fn remove(&mut self, id: &ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.id != id);
        if self.items.len() == before {
            return false;
        }
        self.recompute_total();
        true
    }

    pub(crate) fn clear(&mut self) -> bool {
        if self.items.is_empty() {
            return false;
        }
        self.items.clear();
        self.recompute_total();
        true
    }

    pub(crate) fn freeze(&mut self, order_id: OrderId) {
        self.frozen_for = Some(order_id);
    }

    pub(crate) fn thaw(&mut self, order_id: OrderId) -> bool {
        if self.frozen_for != Some(order_id) {
            return false;
        }
        self.frozen_for = None;
        true
    }

    fn recompute_total(&mut self) {
        self.total = self.items.iter().map(CartItem::line_total).sum();
    }
}
