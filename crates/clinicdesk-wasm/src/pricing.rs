//! WASM bindings for the program pricing preview.
//!
//! Inputs arrive as plain JS objects with snake_case keys and are converted
//! with `serde_wasm_bindgen`. Numeric fields may be numbers or strings.

use crate::error::to_js_error;
use clinicdesk_core::pricing::{
    self, DraftSellPrices, FeeAssumptions, ModeSwitch, PricingMode, ProductCost, ServiceScopes,
    ServiceSelection,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Read optional fee assumptions; `undefined` or `null` gives the defaults.
fn fees_from_js(fees: JsValue) -> Result<FeeAssumptions, JsValue> {
    if fees.is_undefined() || fees.is_null() {
        return Ok(FeeAssumptions::default());
    }
    Ok(serde_wasm_bindgen::from_value(fees)?)
}

/// Compute the pricing preview for one product.
///
/// # Arguments
/// * `product` - `{ id, wholesale_cost?, price? }`
/// * `services` - service selection, keyed by service name
/// * `fees` - fee assumptions, or `undefined` for the defaults
/// * `sell_price` - draft sell price; the all-in COGS is used when absent
///
/// # Returns
/// The preview as a plain object.
#[wasm_bindgen]
pub fn compute_pricing_preview(
    product: JsValue,
    services: JsValue,
    fees: JsValue,
    sell_price: Option<f64>,
) -> Result<JsValue, JsValue> {
    let product: ProductCost = serde_wasm_bindgen::from_value(product)?;
    let services: ServiceSelection = serde_wasm_bindgen::from_value(services)?;
    let fees = fees_from_js(fees)?;

    let preview = pricing::compute_pricing_preview(&product, &services, &fees, sell_price);
    Ok(serde_wasm_bindgen::to_value(&preview)?)
}

/// Preview every product of a program, seeding `drafts` on first sight.
#[wasm_bindgen]
pub fn preview_program(
    products: JsValue,
    scopes: &JsServiceScopes,
    fees: JsValue,
    drafts: &mut JsSellPriceDrafts,
) -> Result<JsValue, JsValue> {
    let products: Vec<ProductCost> = serde_wasm_bindgen::from_value(products)?;
    let fees = fees_from_js(fees)?;

    let previews = pricing::preview_program(&products, &scopes.inner, &fees, &mut drafts.inner);
    Ok(serde_wasm_bindgen::to_value(&previews)?)
}

/// Parse a money amount typed into an input. Non-numeric text gives 0.
#[wasm_bindgen]
pub fn parse_amount(raw: &str) -> f64 {
    pricing::parse_amount(raw)
}

/// Per-product draft sell prices held across renders.
#[wasm_bindgen]
pub struct JsSellPriceDrafts {
    inner: DraftSellPrices,
}

#[wasm_bindgen]
impl JsSellPriceDrafts {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsSellPriceDrafts {
        JsSellPriceDrafts {
            inner: DraftSellPrices::new(),
        }
    }

    /// Draft for `product_id`, seeding it with `all_in_cogs` if unset.
    pub fn resolve(&mut self, product_id: &str, all_in_cogs: f64) -> f64 {
        self.inner.resolve(product_id, all_in_cogs)
    }

    /// Store what the user typed and return the parsed amount.
    pub fn edit(&mut self, product_id: &str, raw: &str) -> f64 {
        self.inner.edit(product_id, raw)
    }

    /// Current draft, or `undefined` when none has been computed yet.
    pub fn value(&self, product_id: &str) -> Option<f64> {
        self.inner.get(product_id).value()
    }

    /// Forget the draft so the next render reseeds it from COGS.
    pub fn reset(&mut self, product_id: &str) {
        self.inner.reset(product_id);
    }

    /// Forget all drafts (program closed or reloaded).
    pub fn clear(&mut self) {
        self.inner.clear();
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }
}

impl Default for JsSellPriceDrafts {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a mode change, as seen by the confirmation dialog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
struct ModeSwitchOutcome {
    outcome: &'static str,
    discarded: usize,
}

impl From<ModeSwitch> for ModeSwitchOutcome {
    fn from(switch: ModeSwitch) -> Self {
        match switch {
            ModeSwitch::Unchanged => Self {
                outcome: "unchanged",
                discarded: 0,
            },
            ModeSwitch::NeedsConfirmation { discarded } => Self {
                outcome: "needs_confirmation",
                discarded,
            },
            ModeSwitch::Switched { discarded } => Self {
                outcome: "switched",
                discarded,
            },
        }
    }
}

fn parse_mode(mode: &str) -> Option<PricingMode> {
    match mode {
        "unified" => Some(PricingMode::Unified),
        "per_product" => Some(PricingMode::PerProduct),
        _ => None,
    }
}

/// Service selections for a program, unified and per product.
#[wasm_bindgen]
pub struct JsServiceScopes {
    inner: ServiceScopes,
}

#[wasm_bindgen]
impl JsServiceScopes {
    /// Create empty scopes in `mode` (`"unified"` or `"per_product"`).
    #[wasm_bindgen(constructor)]
    pub fn new(mode: &str) -> Result<JsServiceScopes, JsValue> {
        let mode = parse_mode(mode)
            .ok_or_else(|| to_js_error(format!("Unknown pricing mode: {mode}")))?;
        Ok(JsServiceScopes {
            inner: ServiceScopes::new(mode),
        })
    }

    /// Rebuild scopes from the object produced by `toJSON`.
    #[wasm_bindgen(js_name = fromJSON)]
    pub fn from_json(value: JsValue) -> Result<JsServiceScopes, JsValue> {
        Ok(JsServiceScopes {
            inner: serde_wasm_bindgen::from_value(value)?,
        })
    }

    #[wasm_bindgen(js_name = toJSON)]
    pub fn to_json(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner)?)
    }

    #[wasm_bindgen(getter)]
    pub fn mode(&self) -> String {
        match self.inner.mode {
            PricingMode::Unified => "unified".to_string(),
            PricingMode::PerProduct => "per_product".to_string(),
        }
    }

    /// Selection in effect for a product under the current mode.
    pub fn active_for(&self, product_id: &str) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.active_for(product_id))?)
    }

    /// Replace the selection a product edits under the current mode.
    pub fn set_selection(&mut self, product_id: &str, selection: JsValue) -> Result<(), JsValue> {
        let selection: ServiceSelection = serde_wasm_bindgen::from_value(selection)?;
        *self.inner.active_for_mut(product_id) = selection;
        Ok(())
    }

    /// Ask to change mode. Returns `{ outcome, discarded }` where outcome is
    /// `"unchanged"`, `"needs_confirmation"` or `"switched"`.
    pub fn request_mode(&mut self, target: &str, confirmed: bool) -> Result<JsValue, JsValue> {
        let target = parse_mode(target)
            .ok_or_else(|| to_js_error(format!("Unknown pricing mode: {target}")))?;
        let outcome = ModeSwitchOutcome::from(self.inner.request_mode(target, confirmed));
        Ok(serde_wasm_bindgen::to_value(&outcome)?)
    }
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[derive(serde::Deserialize)]
    struct Outcome {
        outcome: String,
        discarded: usize,
    }

    #[wasm_bindgen_test]
    fn test_compute_pricing_preview_from_js() {
        let product = serde_wasm_bindgen::to_value(&ProductCost::new("p1", Some(50.0), None))
            .unwrap();
        let services = serde_wasm_bindgen::to_value(&ServiceSelection::new()).unwrap();

        let result = compute_pricing_preview(product, services, JsValue::UNDEFINED, None).unwrap();
        let preview: clinicdesk_core::PricingPreview =
            serde_wasm_bindgen::from_value(result).unwrap();

        assert!((preview.subtotal_cogs - 71.99).abs() < 1e-9);
        assert!((preview.net).abs() < 1e-9);
    }

    #[wasm_bindgen_test]
    fn test_scopes_require_confirmation() {
        let mut scopes = JsServiceScopes::new("per_product").unwrap();
        let selection = serde_wasm_bindgen::to_value(&ServiceSelection::new()).unwrap();
        scopes.set_selection("p1", selection).unwrap();

        let outcome = scopes.request_mode("unified", false).unwrap();
        let outcome: Outcome = serde_wasm_bindgen::from_value(outcome).unwrap();
        assert_eq!(outcome.outcome, "needs_confirmation");
        assert_eq!(outcome.discarded, 1);
        assert_eq!(scopes.mode(), "per_product");

        scopes.request_mode("unified", true).unwrap();
        assert_eq!(scopes.mode(), "unified");
    }
}
