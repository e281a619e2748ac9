//! Sequencer and session error types.

use std::time::Duration;

use common::OrderId;
use domain::OrderStatus;
use thiserror::Error;

/// Reasons a checkout is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckoutError {
    /// Nothing to order.
    #[error("Cart is empty")]
    EmptyCart,

    /// An earlier order has not been delivered yet.
    #[error("Order {} is already in progress ({status})", order_id.short())]
    OrderInProgress {
        order_id: OrderId,
        status: OrderStatus,
    },
}

/// A status schedule whose offsets do not increase.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScheduleError {
    #[error("{status} at {after:?} does not come after the previous status at {previous:?}")]
    OutOfOrder {
        status: OrderStatus,
        after: Duration,
        previous: Duration,
    },
}

/// Errors that can occur while setting up a session.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Timers need a Tokio runtime to run on.
    #[error("Order session must be created inside a Tokio runtime: {0}")]
    NoRuntime(#[from] tokio::runtime::TryCurrentError),
}
