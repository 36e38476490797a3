//! Draft sell prices edited in the program editor.
//!
//! A product's sell price is seeded from its computed all-in COGS exactly once.
//! After that the stored value is the source of truth: recomputing COGS (fees
//! changed, a service was toggled) must not overwrite what the user sees or
//! typed. Only an explicit [`DraftSellPrices::reset`] returns to the seedable
//! state.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::numeric::{parse_amount, sanitize};

/// Sell price state for one product.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum SellPriceDraft {
    /// Not computed yet; the next resolve seeds it.
    #[default]
    Unset,
    /// Seeded or edited value.
    Computed(f64),
}

impl SellPriceDraft {
    pub fn value(&self) -> Option<f64> {
        match self {
            SellPriceDraft::Unset => None,
            SellPriceDraft::Computed(v) => Some(*v),
        }
    }
}

/// Per-product sell price drafts for one editing session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DraftSellPrices {
    drafts: HashMap<String, SellPriceDraft>,
}

impl DraftSellPrices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, product_id: &str) -> SellPriceDraft {
        self.drafts.get(product_id).copied().unwrap_or_default()
    }

    /// Return the product's sell price, seeding it with `all_in_cogs` if unset.
    pub fn resolve(&mut self, product_id: &str, all_in_cogs: f64) -> f64 {
        let draft = self
            .drafts
            .entry(product_id.to_string())
            .or_insert(SellPriceDraft::Unset);

        match *draft {
            SellPriceDraft::Computed(value) => value,
            SellPriceDraft::Unset => {
                let seeded = sanitize(all_in_cogs);
                *draft = SellPriceDraft::Computed(seeded);
                tracing::debug!(product_id, seeded, "sell price seeded");
                seeded
            }
        }
    }

    /// Record a user edit of the sell price field.
    pub fn edit(&mut self, product_id: &str, raw: &str) -> f64 {
        let value = parse_amount(raw);
        self.set(product_id, value);
        value
    }

    /// Store an already-numeric sell price.
    pub fn set(&mut self, product_id: &str, value: f64) {
        self.drafts
            .insert(product_id.to_string(), SellPriceDraft::Computed(sanitize(value)));
    }

    /// Forget the product's draft so the next resolve reseeds it.
    pub fn reset(&mut self, product_id: &str) {
        self.drafts.remove(product_id);
    }

    pub fn clear(&mut self) {
        self.drafts.clear();
    }

    pub fn len(&self) -> usize {
        self.drafts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drafts.is_empty()
    }
}
