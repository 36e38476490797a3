//! PNG encoding for cropped logos.
//!
//! Logos are uploaded losslessly with their alpha channel, so the output is
//! always 8-bit RGBA PNG.

use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::ExtendedColorType;
use image::ImageEncoder;
use std::io::Cursor;
use thiserror::Error;

/// Errors that can occur during PNG encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder reported a failure
    #[error("PNG encoding failed: {0}")]
    EncodingFailed(String),

    /// The encoder finished without producing any bytes
    #[error("PNG encoding produced no data")]
    EmptyOutput,
}

/// Encode RGBA pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - RGBA pixel data (4 bytes per pixel, row-major order)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Example
///
/// ```ignore
/// let pixels = vec![255u8; 10 * 10 * 4];
/// let png = encode_png(&pixels, 10, 10).unwrap();
/// assert_eq!(&png[1..4], b"PNG");
/// ```
pub fn encode_png(pixels: &[u8], width: u32, height: u32) -> Result<Vec<u8>, EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected_len = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected_len {
        return Err(EncodeError::InvalidPixelData {
            expected: expected_len,
            actual: pixels.len(),
        });
    }

    let mut buffer = Cursor::new(Vec::new());

    let encoder =
        PngEncoder::new_with_quality(&mut buffer, CompressionType::Default, PngFilter::Adaptive);

    encoder
        .write_image(pixels, width, height, ExtendedColorType::Rgba8)
        .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

    let bytes = buffer.into_inner();
    if bytes.is_empty() {
        return Err(EncodeError::EmptyOutput);
    }

    Ok(bytes)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    #[test]
    fn test_encode_png_basic() {
        let pixels = vec![128u8; 100 * 100 * 4];
        let png = encode_png(&pixels, 100, 100).unwrap();

        assert_eq!(&png[0..8], &PNG_SIGNATURE);
        // IEND chunk type sits right before the final CRC
        let len = png.len();
        assert_eq!(&png[len - 8..len - 4], b"IEND");
    }

    #[test]
    fn test_encode_png_preserves_pixels() {
        let mut pixels = vec![0u8; 3 * 2 * 4];
        pixels[0..4].copy_from_slice(&[255, 0, 0, 64]);
        let png = encode_png(&pixels, 3, 2).unwrap();

        let decoded = image::load_from_memory(&png).unwrap().into_rgba8();
        assert_eq!(decoded.dimensions(), (3, 2));
        assert_eq!(decoded.into_raw(), pixels);
    }

    #[test]
    fn test_encode_png_is_deterministic() {
        let pixels: Vec<u8> = (0..16 * 16 * 4).map(|i| (i % 251) as u8).collect();
        let a = encode_png(&pixels, 16, 16).unwrap();
        let b = encode_png(&pixels, 16, 16).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_png_invalid_pixel_data_short() {
        let pixels = vec![128u8; 99 * 100 * 4];
        let result = encode_png(&pixels, 100, 100);
        assert!(matches!(result, Err(EncodeError::InvalidPixelData { .. })));
    }

    #[test]
    fn test_encode_png_rgb_sized_buffer_rejected() {
        // 3 bytes per pixel is a common mistake
        let pixels = vec![128u8; 10 * 10 * 3];
        let result = encode_png(&pixels, 10, 10);
        assert!(matches!(
            result,
            Err(EncodeError::InvalidPixelData {
                expected: 400,
                actual: 300
            })
        ));
    }

    #[test]
    fn test_encode_png_zero_width() {
        let result = encode_png(&[], 0, 100);
        assert!(matches!(result, Err(EncodeError::InvalidDimensions { .. })));
    }

    #[test]
    fn test_encode_png_single_pixel() {
        let png = encode_png(&[0, 255, 0, 255], 1, 1).unwrap();
        assert_eq!(&png[0..8], &PNG_SIGNATURE);
    }
}
