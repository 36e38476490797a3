//! Crop selection in display space and its mapping to native pixels.
//!
//! The crop UI draws the selection over the image as rendered on screen. The
//! rendered element rarely has the image's natural size, and when letterboxed
//! it need not even be scaled uniformly, so each axis gets its own factor:
//!
//! - `scale_x = natural_width / display_width`
//! - `scale_y = natural_height / display_height`
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the rendered image
//! - Units are CSS pixels of the rendered element

use serde::{Deserialize, Serialize};

use crate::decode::DecodedImage;

/// Rendered size of the image element.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplaySize {
    pub width: f64,
    pub height: f64,
}

impl DisplaySize {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Both dimensions are finite and positive.
    pub fn is_valid(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// User-drawn crop rectangle in display pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropSelection {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl CropSelection {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Selection covering the whole display.
    pub fn full(display: DisplaySize) -> Self {
        Self::new(0.0, 0.0, display.width, display.height)
    }

    /// Width and height are finite and positive, origin is finite.
    pub fn is_valid(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }

    /// Map to native pixel space using independent per-axis scale factors.
    pub fn to_native(
        &self,
        display: DisplaySize,
        natural_width: u32,
        natural_height: u32,
    ) -> NativeRect {
        let scale_x = natural_width as f64 / display.width;
        let scale_y = natural_height as f64 / display.height;

        NativeRect {
            x: self.x * scale_x,
            y: self.y * scale_y,
            width: self.width * scale_x,
            height: self.height * scale_y,
        }
    }
}

/// Crop rectangle in native (source) pixels, before rounding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NativeRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Integer pixel region inside an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl NativeRect {
    /// Round to whole pixels and clamp into a `width x height` image.
    ///
    /// The region is never smaller than 1x1 and never leaves the image.
    pub fn to_region(&self, image_width: u32, image_height: u32) -> PixelRegion {
        let left = clamp_coord(self.x, image_width.saturating_sub(1));
        let top = clamp_coord(self.y, image_height.saturating_sub(1));
        let right = clamp_coord(self.x + self.width, image_width);
        let bottom = clamp_coord(self.y + self.height, image_height);

        PixelRegion {
            left,
            top,
            width: right.saturating_sub(left).max(1),
            height: bottom.saturating_sub(top).max(1),
        }
    }
}

impl From<PixelRegion> for NativeRect {
    fn from(region: PixelRegion) -> Self {
        NativeRect {
            x: region.left as f64,
            y: region.top as f64,
            width: region.width as f64,
            height: region.height as f64,
        }
    }
}

fn clamp_coord(value: f64, max: u32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else {
        (value.round() as u32).min(max)
    }
}

/// Copy `region` out of `image`.
///
/// Returns `None` when the region is empty or does not lie inside the image.
/// Regions from [`NativeRect::to_region`] always fit.
pub fn extract_region(image: &DecodedImage, region: PixelRegion) -> Option<DecodedImage> {
    let right = region.left.checked_add(region.width)?;
    let bottom = region.top.checked_add(region.height)?;
    if region.width == 0 || region.height == 0 || right > image.width || bottom > image.height {
        return None;
    }

    let channels = DecodedImage::CHANNELS;
    let src_stride = image.width as usize * channels;
    let row_len = region.width as usize * channels;

    let mut output = Vec::with_capacity(row_len * region.height as usize);

    for y in 0..region.height as usize {
        let src_row = (region.top as usize + y) * src_stride;
        let start = src_row + region.left as usize * channels;
        output.extend_from_slice(image.pixels.get(start..start + row_len)?);
    }

    Some(DecodedImage::new(region.width, region.height, output))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
