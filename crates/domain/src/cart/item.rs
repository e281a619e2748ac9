//! Cart line items.

use common::ItemId;
use serde::{Deserialize, Serialize};

use crate::money::Money;

/// A dish as offered to the cart, before it has a quantity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCartItem {
    pub id: ItemId,
    pub name: String,
    pub price: Money,
    pub image: String,
}

impl NewCartItem {
    /// Creates a new cart item offer.
    pub fn new(
        id: impl Into<ItemId>,
        name: impl Into<String>,
        price: Money,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            image: image.into(),
        }
    }
}

/// An item in the cart.
///
/// `quantity` is always at least 1; an item nobody wants is removed
/// rather than kept at zero.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// The item identifier.
    pub id: ItemId,

    /// Display name.
    pub name: String,

    /// Image URL, opaque to the store.
    pub image: String,

    /// Price per unit.
    pub price: Money,

    /// Quantity in the cart.
    pub quantity: u32,
}

impl CartItem {
    /// Returns the line total (price * quantity).
    pub fn line_total(&self) -> Money {
        self.price.multiply(self.quantity)
    }
}

impl From<NewCartItem> for CartItem {
    fn from(item: NewCartItem) -> Self {
        Self {
            id: item.id,
            name: item.name,
            image: item.image,
            price: item.price,
            quantity: 1,
        }
    }
}
