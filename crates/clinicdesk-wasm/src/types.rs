//! WASM-compatible wrapper types.

use clinicdesk_core::LogoBitmap;
use wasm_bindgen::prelude::*;

/// A cropped, PNG-encoded logo.
///
/// # Memory Management
///
/// The PNG bytes live in WASM memory. Calling `png()` copies them into a
/// JavaScript `Uint8Array`, which is what the upload form needs anyway.
#[wasm_bindgen]
pub struct JsLogoBitmap {
    width: u32,
    height: u32,
    png: Vec<u8>,
}

#[wasm_bindgen]
impl JsLogoBitmap {
    /// Output width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Output height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size of the encoded PNG in bytes
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.png.len()
    }

    /// Returns the PNG bytes as a Uint8Array (copied).
    pub fn png(&self) -> Vec<u8> {
        self.png.clone()
    }

    /// MIME type of the encoded bytes, for building a `Blob`.
    #[wasm_bindgen(getter)]
    pub fn mime_type(&self) -> String {
        "image/png".to_string()
    }
}

impl From<LogoBitmap> for JsLogoBitmap {
    fn from(bitmap: LogoBitmap) -> Self {
        Self {
            width: bitmap.width,
            height: bitmap.height,
            png: bitmap.png,
        }
    }
}
