//! Pricing preview for the program editor.
//!
//! This module computes the all-in cost of goods sold and the resulting margin
//! for every product in a program. Everything here is pure and synchronous so it
//! can be evaluated on every render of the editor.
//!
//! # Cost Build-Up
//!
//! 1. Base product cost (`wholesale_cost`, else `price`, else 0)
//! 2. + shipping + facilitation fee + enabled add-on services = subtotal
//! 3. + retained percentage of the subtotal (when counted in COGS) = all-in COGS
//! 4. Sell price (draft or all-in COGS) - all-in COGS = net
//!
//! # Input Handling
//!
//! The calculator has no error path. Editable fields and backend payloads are
//! coerced to `0.0` when they are not numeric; see [`numeric`].

mod draft;
mod fees;
pub mod numeric;
mod preview;
mod services;

pub use draft::{DraftSellPrices, SellPriceDraft};
pub use fees::FeeAssumptions;
pub use numeric::parse_amount;
pub use preview::{compute_pricing_preview, preview_program, PricingPreview, ProductCost};
pub use services::{
    ModeSwitch, PricingMode, ServiceKind, ServiceOption, ServiceScopes, ServiceSelection,
};
