//! Clinicdesk WASM - WebAssembly bindings for the clinic admin frontend
//!
//! This crate exposes clinicdesk-core to the admin web application.
//!
//! # Module Structure
//!
//! - `pricing` - Pricing preview, amount parsing, sell price drafts, service scopes
//! - `logo` - Logo cropping from picked files or remote URLs
//! - `fetch` - Fresh CORS fetch of remotely hosted images
//! - `portal` - Step/footer reordering and vanity domain validation
//! - `types` - WASM-compatible wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { crop_logo, compute_pricing_preview } from '@clinicdesk/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const logo = crop_logo(bytes, {
//!   selection: { x: 12, y: 8, width: 240, height: 80 },
//!   display: { width: img.width, height: img.height },
//!   output: { mode: 'fixed', width: 600, height: 200 },
//! });
//! form.append('logo', new Blob([logo.png], { type: 'image/png' }));
//! ```

use wasm_bindgen::prelude::*;

mod error;
mod fetch;
mod logo;
mod portal;
mod pricing;
mod types;

// Re-export public types
pub use fetch::fetch_fresh_image;
pub use logo::{crop_logo, crop_remote_logo, initial_selection, preset_output_size, toggle_preset};
pub use portal::{cname_points_to, is_apex, move_item_index, normalize_domain, JsStepOrder};
pub use pricing::{
    compute_pricing_preview, parse_amount, preview_program, JsSellPriceDrafts, JsServiceScopes,
};
pub use types::JsLogoBitmap;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();

    if let Err(e) = tracing_wasm::try_set_as_global_default() {
        web_sys::console::error_1(&format!("Failed to set up tracing: {e:?}").into());
    }
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
