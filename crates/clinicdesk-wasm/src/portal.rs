//! WASM bindings for portal settings: step and footer ordering, vanity domains.

use crate::error::to_js_error;
use clinicdesk_core::domain;
use clinicdesk_core::ordering::{move_item, StepOrder};
use js_sys::Array;
use wasm_bindgen::prelude::*;

/// Return a copy of `items` with the entry at `from` moved to `to`.
///
/// Used for footer links, whose entries are arbitrary objects.
#[wasm_bindgen]
pub fn move_item_index(items: Array, from: usize, to: usize) -> Result<Array, JsValue> {
    let mut values: Vec<JsValue> = items.iter().collect();
    move_item(&mut values, from, to).map_err(to_js_error)?;
    Ok(values.into_iter().collect())
}

/// Ordered form steps with an optional step that always stays last.
#[wasm_bindgen]
pub struct JsStepOrder {
    inner: StepOrder,
}

#[wasm_bindgen]
impl JsStepOrder {
    #[wasm_bindgen(constructor)]
    pub fn new(steps: Vec<String>, pinned_last: Option<String>) -> JsStepOrder {
        JsStepOrder {
            inner: StepOrder::new(steps, pinned_last),
        }
    }

    /// Current order, pinned step included.
    #[wasm_bindgen(getter)]
    pub fn steps(&self) -> Vec<String> {
        self.inner.steps().to_vec()
    }

    #[wasm_bindgen(getter)]
    pub fn pinned_last(&self) -> Option<String> {
        self.inner.pinned_last().map(str::to_string)
    }

    #[wasm_bindgen(getter)]
    pub fn length(&self) -> usize {
        self.inner.len()
    }

    pub fn move_step(&mut self, from: usize, to: usize) -> Result<(), JsValue> {
        self.inner.move_step(from, to).map_err(to_js_error)
    }

    pub fn insert(&mut self, step: String) -> Result<(), JsValue> {
        self.inner.insert(step).map_err(to_js_error)
    }

    pub fn remove(&mut self, index: usize) -> Result<String, JsValue> {
        self.inner.remove(index).map_err(to_js_error)
    }
}

/// Normalize a pasted vanity domain to a bare lowercase hostname.
#[wasm_bindgen]
pub fn normalize_domain(input: &str) -> Result<String, JsValue> {
    domain::normalize_domain(input).map_err(to_js_error)
}

/// Whether a normalized domain is an apex (`example.com`).
#[wasm_bindgen]
pub fn is_apex(domain: &str) -> bool {
    domain::is_apex(domain)
}

/// Whether a CNAME record value points at the platform target.
#[wasm_bindgen]
pub fn cname_points_to(record: &str, target: &str) -> bool {
    domain::cname_points_to(record, target)
}
