//! Geometry of the logo cropper.
//!
//! # Pipeline Order
//!
//! 1. Map the display-space selection to native pixels (per-axis scale)
//! 2. Decide the output size (fixed preset, or derived with a floor)
//! 3. Extract the native region and resample it to the output size
//!
//! # Coordinate System
//!
//! - Selections are in CSS pixels of the rendered image element
//! - Native rectangles are in source pixels, after EXIF orientation
//! - Origin is top-left corner

mod crop;
mod output;

pub use crop::{extract_region, CropSelection, DisplaySize, NativeRect, PixelRegion};
pub use output::{initial_selection, output_dimensions, AspectPreset, OutputSpec};
