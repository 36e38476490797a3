//! Clinicdesk Core - computational core of the clinic admin
//!
//! This crate provides the parts of the admin application that have real
//! logic behind the forms: the program pricing preview, the logo crop
//! pipeline, drag-and-drop ordering of form steps and footer links, and
//! vanity domain validation.
//!
//! Nothing here performs network I/O. The browser bindings in
//! `clinicdesk-wasm` fetch remote images and hand the bytes to this crate.

pub mod config;
pub mod decode;
pub mod domain;
pub mod encode;
pub mod logo;
pub mod ordering;
pub mod pricing;
pub mod transform;

pub use config::{ConfigError, CropConfig, EditorConfig};
pub use logo::{crop_to_output_bitmap, CancelToken, CropRequest, LogoBitmap, LogoError};
pub use pricing::{
    compute_pricing_preview, FeeAssumptions, PricingPreview, ProductCost, ServiceSelection,
};
pub use transform::{AspectPreset, CropSelection, DisplaySize, OutputSpec};
