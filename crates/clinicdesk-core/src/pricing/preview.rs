//! All-in COGS and margin preview for a single product.
//!
//! The calculator is a pure function of its inputs and is cheap enough to run
//! on every render. It never fails: malformed inputs have already been coerced
//! to `0.0` at the boundary, and the only division is guarded.

use serde::{Deserialize, Serialize};

use super::draft::DraftSellPrices;
use super::fees::FeeAssumptions;
use super::numeric::{deserialize_optional_amount, sanitize};
use super::services::{ServiceScopes, ServiceSelection};

/// Cost fields of a product record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductCost {
    /// Product identifier, used to key per-product scopes and drafts.
    pub id: String,
    /// Preferred cost field.
    #[serde(deserialize_with = "deserialize_optional_amount")]
    pub wholesale_cost: Option<f64>,
    /// Secondary price field used when no wholesale cost is recorded.
    #[serde(deserialize_with = "deserialize_optional_amount")]
    pub price: Option<f64>,
}

impl ProductCost {
    pub fn new(id: impl Into<String>, wholesale_cost: Option<f64>, price: Option<f64>) -> Self {
        Self {
            id: id.into(),
            wholesale_cost,
            price,
        }
    }

    /// `wholesale_cost`, else `price`, else 0.
    #[inline]
    pub fn base_cost(&self) -> f64 {
        sanitize(self.wholesale_cost.or(self.price).unwrap_or(0.0))
    }
}

/// Read-only result of [`compute_pricing_preview`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricingPreview {
    pub base_product_cost: f64,
    pub service_total: f64,
    pub subtotal_cogs: f64,
    pub platform_retained_cost: f64,
    pub all_in_cogs: f64,
    pub sell_price: f64,
    /// Sell price minus all-in COGS. Negative when underpriced.
    pub net: f64,
    /// Net as a percentage of sell price; 0 when sell price is not positive.
    pub margin_percent: f64,
}

impl PricingPreview {
    /// True when the sell price does not cover all-in COGS.
    pub fn is_underpriced(&self) -> bool {
        self.net < 0.0
    }
}

/// Compute the pricing preview for one product.
///
/// The retained percentage is applied to the full subtotal (base cost, flat
/// fees and services), not to the base cost alone. When `sell_price_override`
/// is `None` the sell price equals the all-in COGS.
pub fn compute_pricing_preview(
    product: &ProductCost,
    services: &ServiceSelection,
    fees: &FeeAssumptions,
    sell_price_override: Option<f64>,
) -> PricingPreview {
    let base_product_cost = product.base_cost();
    let service_total = services.total();
    let subtotal_cogs =
        base_product_cost + fees.shipping_cost + fees.facilitation_fee + service_total;
    let platform_retained_cost = fees.retained_cost(subtotal_cogs);
    let all_in_cogs = subtotal_cogs + platform_retained_cost;

    let sell_price = sell_price_override.map(sanitize).unwrap_or(all_in_cogs);
    let net = sell_price - all_in_cogs;
    let margin_percent = if sell_price > 0.0 {
        (net / sell_price) * 100.0
    } else {
        0.0
    };

    PricingPreview {
        base_product_cost,
        service_total,
        subtotal_cogs,
        platform_retained_cost,
        all_in_cogs,
        sell_price,
        net,
        margin_percent,
    }
}

/// Preview every product of a program using its active service scope.
///
/// Each product's sell price comes from `drafts`, which is seeded with the
/// all-in COGS the first time a product is seen and left alone afterwards.
pub fn preview_program(
    products: &[ProductCost],
    scopes: &ServiceScopes,
    fees: &FeeAssumptions,
    drafts: &mut DraftSellPrices,
) -> Vec<PricingPreview> {
    products
        .iter()
        .map(|product| {
            let services = scopes.active_for(&product.id);
            let seed = compute_pricing_preview(product, &services, fees, None);
            let sell_price = drafts.resolve(&product.id, seed.all_in_cogs);
            compute_pricing_preview(product, &services, fees, Some(sell_price))
        })
        .collect()
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::pricing::services::ServiceKind;
    use proptest::prelude::*;

    fn amount() -> impl Strategy<Value = f64> {
        0.0f64..10_000.0
    }

    fn selection_strategy() -> impl Strategy<Value = ServiceSelection> {
        proptest::collection::vec((any::<bool>(), amount()), 5).prop_map(|entries| {
            let mut selection = ServiceSelection::new();
            for (kind, (enabled, price)) in ServiceKind::ALL.into_iter().zip(entries) {
                selection = selection.with(kind, enabled, price);
            }
            selection
        })
    }

    fn fees_strategy() -> impl Strategy<Value = FeeAssumptions> {
        (amount(), amount(), 0.0f64..=100.0, any::<bool>()).prop_map(
            |(shipping_cost, facilitation_fee, retained_percent, include_retained_in_cogs)| {
                FeeAssumptions {
                    shipping_cost,
                    facilitation_fee,
                    retained_percent,
                    include_retained_in_cogs,
                }
            },
        )
    }

    proptest! {
        /// Property: subtotal is the sum of its four components.
        #[test]
        fn prop_subtotal_is_additive(
            base in amount(),
            services in selection_strategy(),
            fees in fees_strategy(),
        ) {
            let product = ProductCost::new("p", Some(base), None);
            let preview = compute_pricing_preview(&product, &services, &fees, None);

            let expected = base + fees.shipping_cost + fees.facilitation_fee + services.total();
            prop_assert!((preview.subtotal_cogs - expected).abs() < 1e-6);
        }

        /// Property: retained cost is zero whenever it is excluded from COGS.
        #[test]
        fn prop_retained_fee_gated(
            base in amount(),
            services in selection_strategy(),
            mut fees in fees_strategy(),
        ) {
            fees.include_retained_in_cogs = false;
            let product = ProductCost::new("p", Some(base), None);
            let preview = compute_pricing_preview(&product, &services, &fees, None);

            prop_assert_eq!(preview.platform_retained_cost, 0.0);
            prop_assert_eq!(preview.all_in_cogs, preview.subtotal_cogs);
        }

        /// Property: a zero sell price always yields a zero margin.
        #[test]
        fn prop_margin_zero_guard(
            base in amount(),
            services in selection_strategy(),
            fees in fees_strategy(),
        ) {
            let product = ProductCost::new("p", Some(base), None);
            let preview = compute_pricing_preview(&product, &services, &fees, Some(0.0));

            prop_assert_eq!(preview.margin_percent, 0.0);
            prop_assert!(preview.margin_percent.is_finite());
        }

        /// Property: without an override the sell price equals all-in COGS.
        #[test]
        fn prop_default_sell_price(
            base in amount(),
            services in selection_strategy(),
            fees in fees_strategy(),
        ) {
            let product = ProductCost::new("p", Some(base), None);
            let preview = compute_pricing_preview(&product, &services, &fees, None);

            prop_assert_eq!(preview.sell_price, preview.all_in_cogs);
            prop_assert_eq!(preview.net, 0.0);
        }

        /// Property: identical inputs give identical previews.
        #[test]
        fn prop_deterministic(
            base in amount(),
            services in selection_strategy(),
            fees in fees_strategy(),
            sell in proptest::option::of(amount()),
        ) {
            let product = ProductCost::new("p", Some(base), None);
            let a = compute_pricing_preview(&product, &services, &fees, sell);
            let b = compute_pricing_preview(&product, &services, &fees, sell);
            prop_assert_eq!(a, b);
        }
    }
}
