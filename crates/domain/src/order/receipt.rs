//! Receipt of a placed order.

use chrono::{DateTime, Utc};
use common::OrderId;
use serde::Serialize;

use super::OrderSummary;
use crate::cart::CartItem;

/// What was ordered at checkout and what it cost.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlacedOrder {
    pub id: OrderId,
    pub placed_at: DateTime<Utc>,
    pub items: Vec<CartItem>,
    pub summary: OrderSummary,
}

impl PlacedOrder {
    /// Returns the total quantity ordered.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
