//! Fee assumptions shared by every product in a pricing context.

use serde::{Deserialize, Serialize};

use super::numeric::deserialize_amount;

/// Flat per-order fees and the platform-retained percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeAssumptions {
    /// Shipping cost per order.
    #[serde(deserialize_with = "deserialize_amount")]
    pub shipping_cost: f64,
    /// Prescriber/facilitation fee per order.
    #[serde(deserialize_with = "deserialize_amount")]
    pub facilitation_fee: f64,
    /// Percentage (0 to 100) the platform retains.
    #[serde(deserialize_with = "deserialize_amount")]
    pub retained_percent: f64,
    /// Count the retained fee as a cost instead of a margin reduction.
    pub include_retained_in_cogs: bool,
}

impl Default for FeeAssumptions {
    fn default() -> Self {
        Self {
            shipping_cost: 9.99,
            facilitation_fee: 12.0,
            retained_percent: 5.0,
            include_retained_in_cogs: true,
        }
    }
}

impl FeeAssumptions {
    /// Assumptions with every fee at zero and the retained fee excluded.
    pub fn zero() -> Self {
        Self {
            shipping_cost: 0.0,
            facilitation_fee: 0.0,
            retained_percent: 0.0,
            include_retained_in_cogs: false,
        }
    }

    /// Sum of the flat per-order fees.
    #[inline]
    pub fn flat_fees(&self) -> f64 {
        self.shipping_cost + self.facilitation_fee
    }

    /// Retained fee taken against `subtotal`, or 0 when not counted in COGS.
    #[inline]
    pub fn retained_cost(&self, subtotal: f64) -> f64 {
        if self.include_retained_in_cogs {
            subtotal * (self.retained_percent / 100.0)
        } else {
            0.0
        }
    }
}
