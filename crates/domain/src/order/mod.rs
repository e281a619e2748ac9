//! Order status, pricing and receipts.

mod pricing;
mod receipt;
mod status;

pub use pricing::{OrderSummary, PricingPolicy};
pub use receipt::PlacedOrder;
pub use status::OrderStatus;
