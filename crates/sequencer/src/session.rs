//! The order session: one cart, one sequencer, one pricing policy.

use chrono::Utc;
use common::{ItemId, OrderId};
use domain::{
    CartError, CartState, CartStore, NewCartItem, OrderStatus, OrderSummary, PlacedOrder,
    PricingPolicy,
};
use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::error::{CheckoutError, SessionError};
use crate::schedule::StatusSchedule;
use crate::sequencer::{OrderProgress, StatusSequencer};

/// Session-scoped context shared by everything that shows or edits the
/// cart and the current order.
///
/// Checkout locks the cart for the placed order. The lock is released when
/// the order is delivered or cancelled.
#[derive(Debug)]
pub struct OrderSession {
    cart: CartStore,
    sequencer: StatusSequencer,
    pricing: PricingPolicy,
}

impl OrderSession {
    /// Creates a session with an empty cart.
    ///
    /// Must be called from within a Tokio runtime, which runs the status
    /// timers.
    pub fn new(pricing: PricingPolicy, schedule: StatusSchedule) -> Result<Self, SessionError> {
        let runtime = Handle::try_current()?;
        Ok(Self::with_runtime(pricing, schedule, runtime))
    }

    /// Creates a session whose timers run on `runtime`.
    pub fn with_runtime(pricing: PricingPolicy, schedule: StatusSchedule, runtime: Handle) -> Self {
        Self {
            cart: CartStore::new(),
            sequencer: StatusSequencer::new(schedule, runtime),
            pricing,
        }
    }

    pub fn pricing(&self) -> &PricingPolicy {
        &self.pricing
    }

    pub fn schedule(&self) -> &StatusSchedule {
        self.sequencer.schedule()
    }

    // -- cart --

    /// Returns a snapshot of the cart.
    pub fn cart(&self) -> CartState {
        self.cart.state()
    }

    pub fn subscribe_cart(&self) -> watch::Receiver<CartState> {
        self.cart.subscribe()
    }

    pub fn add_item(&self, item: NewCartItem) -> Result<(), CartError> {
        self.cart.add_item(item)
    }

    /// Sets an item's quantity. Zero or less removes it.
    pub fn update_quantity(&self, id: &ItemId, quantity: i64) -> Result<(), CartError> {
        self.cart.update_quantity(id, quantity)
    }

    pub fn adjust_quantity(&self, id: &ItemId, delta: i64) -> Result<(), CartError> {
        self.cart.adjust_quantity(id, delta)
    }

    pub fn remove_item(&self, id: &ItemId) -> Result<(), CartError> {
        self.cart.remove_item(id)
    }

    /// Empties the cart. A delivered order is forgotten as well, so the
    /// status goes back to `Pending` with no order.
    pub fn clear_cart(&self) -> Result<(), CartError> {
        self.cart.clear()?;
        self.sequencer.reset();
        Ok(())
    }

    /// Returns what the current cart would cost at checkout.
    pub fn summary(&self) -> OrderSummary {
        self.pricing.summarize(self.cart.state().total())
    }

    // -- order --

    /// Places an order for the cart's contents and starts its status timers.
    ///
    /// The cart is locked until the order is delivered or cancelled.
    #[tracing::instrument(skip(self))]
    pub fn checkout(&self) -> Result<PlacedOrder, CheckoutError> {
        let order_id = OrderId::new();
        let locked = self.cart.freeze(order_id).map_err(|e| match e {
            CartError::Empty => CheckoutError::EmptyCart,
            CartError::Frozen { order_id } => CheckoutError::OrderInProgress {
                order_id,
                status: self.sequencer.status(),
            },
        });
        let locked = match locked {
            Ok(cart) => cart,
            Err(e) => {
                metrics::counter!("checkouts_rejected").increment(1);
                tracing::info!(error = %e, "checkout rejected");
                return Err(e);
            }
        };

        let order = PlacedOrder {
            id: order_id,
            placed_at: Utc::now(),
            summary: self.pricing.summarize(locked.total()),
            items: locked.items().to_vec(),
        };

        let cart = self.cart.clone();
        self.sequencer.start(order.clone(), move |delivered| {
            cart.thaw(delivered);
        });

        metrics::counter!("orders_placed_total").increment(1);
        tracing::info!(
            %order_id,
            items = order.item_count(),
            total = %order.summary.total,
            "order placed"
        );
        Ok(order)
    }

    /// Returns the current order status. `Pending` when no order exists.
    pub fn order_status(&self) -> OrderStatus {
        self.sequencer.status()
    }

    /// Returns the current order and its status.
    pub fn progress(&self) -> OrderProgress {
        self.sequencer.progress()
    }

    pub fn current_order(&self) -> Option<PlacedOrder> {
        self.sequencer.progress().order
    }

    /// Returns a receiver that observes every status change.
    pub fn subscribe_status(&self) -> watch::Receiver<OrderProgress> {
        self.sequencer.subscribe()
    }

    /// Cancels an undelivered order and unlocks the cart.
    ///
    /// Returns the cancelled order's id, or None if nothing was in flight.
    pub fn cancel_order(&self) -> Option<OrderId> {
        let order_id = self.sequencer.cancel()?;
        self.cart.thaw(order_id);
        Some(order_id)
    }
}
