//! Fee and tax composition.

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Delivery fee and tax rate applied at checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingPolicy {
    /// Flat fee added to every order.
    pub delivery_fee: Money,

    /// Tax rate on the subtotal in basis points (1000 = 10%).
    pub tax_rate_bps: u32,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            delivery_fee: Money::from_cents(399),
            tax_rate_bps: 1_000,
        }
    }
}

impl PricingPolicy {
    /// Composes the amount due for a cart subtotal.
    pub fn summarize(&self, subtotal: Money) -> OrderSummary {
        let tax = subtotal.apply_rate_bps(self.tax_rate_bps);
        OrderSummary {
            subtotal,
            delivery_fee: self.delivery_fee,
            tax,
            total: subtotal + self.delivery_fee + tax,
        }
    }
}

/// Breakdown of the amount due for an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub subtotal: Money,
    pub delivery_fee: Money,
    pub tax: Money,
    pub total: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = PricingPolicy::default();
        assert_eq!(policy.delivery_fee.cents(), 399);
        assert_eq!(policy.tax_rate_bps, 1_000);
    }

    #[test]
    fn test_twenty_dollar_subtotal() {
        let summary = PricingPolicy::default().summarize(Money::from_cents(2000));
        assert_eq!(summary.tax.cents(), 200);
        assert_eq!(summary.total.cents(), 2599);
        assert_eq!(summary.total.to_string(), "$25.99");
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            delivery_fee: Money::zero(),
            tax_rate_bps: 825,
        };
        let summary = policy.summarize(Money::from_cents(10_000));
        assert_eq!(summary.tax.cents(), 825);
        assert_eq!(summary.total.cents(), 10_825);
    }
}
