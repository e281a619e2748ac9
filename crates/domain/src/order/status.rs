//! Order status progression.

use serde::{Deserialize, Serialize};

/// The delivery progress of a placed order.
///
/// Status progression:
/// ```text
/// Pending ──► Confirmed ──► Preparing ──► Ready ──► Delivered
/// ```
/// There are no branches and no failure state. `Pending` is also what is
/// reported before any order has been placed.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Default,
)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order placed, awaiting confirmation.
    #[default]
    Pending,

    /// The kitchen accepted the order.
    Confirmed,

    /// The order is being cooked.
    Preparing,

    /// The order is ready and on its way.
    Ready,

    /// The order was handed over (terminal state).
    Delivered,
}

impl OrderStatus {
    /// Every status in progression order.
    pub const ALL: [OrderStatus; 5] = [
        OrderStatus::Pending,
        OrderStatus::Confirmed,
        OrderStatus::Preparing,
        OrderStatus::Ready,
        OrderStatus::Delivered,
    ];

    /// Returns the status that follows this one, or None when terminal.
    pub fn next(&self) -> Option<OrderStatus> {
        match self {
            OrderStatus::Pending => Some(OrderStatus::Confirmed),
            OrderStatus::Confirmed => Some(OrderStatus::Preparing),
            OrderStatus::Preparing => Some(OrderStatus::Ready),
            OrderStatus::Ready => Some(OrderStatus::Delivered),
            OrderStatus::Delivered => None,
        }
    }

    /// Returns true if this is the terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered)
    }

    /// Returns the status name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Confirmed => "confirmed",
            OrderStatus::Preparing => "preparing",
            OrderStatus::Ready => "ready",
            OrderStatus::Delivered => "delivered",
        }
    }

    /// Returns the badge label shown to the user.
    pub fn label(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pending",
            OrderStatus::Confirmed => "Order Confirmed",
            OrderStatus::Preparing => "Preparing Your Order",
            OrderStatus::Ready => "Ready for Pickup/Delivery",
            OrderStatus::Delivered => "Delivered",
        }
    }

    /// Returns the sentence shown under the progress bar.
    pub fn description(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Your order is pending confirmation.",
            OrderStatus::Confirmed => "Your order has been confirmed and will be prepared soon.",
            OrderStatus::Preparing => "Our chefs are preparing your delicious meal.",
            OrderStatus::Ready => "Your order is ready! It's on the way to you.",
            OrderStatus::Delivered => "Your order has been delivered. Enjoy your meal!",
        }
    }

    /// Returns how far along the progress bar this status sits.
    pub fn progress_percent(&self) -> u8 {
        match self {
            OrderStatus::Pending => 20,
            OrderStatus::Confirmed => 40,
            OrderStatus::Preparing => 60,
            OrderStatus::Ready => 80,
            OrderStatus::Delivered => 100,
        }
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
