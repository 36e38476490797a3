//! Pixel buffer and decode error types shared by the logo pipeline.

use image::{ImageBuffer, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DecodeError {
    /// Format could not be sniffed from the leading bytes.
    #[error("Unsupported logo format (expected PNG, JPEG or WebP)")]
    InvalidFormat,

    #[error("Logo could not be decoded: {0}")]
    CorruptedFile(String),

    #[error("Logo file is empty")]
    Empty,
}

/// Resampling filter used when scaling a crop to its output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterType {
    Nearest,
    #[default]
    Bilinear,
    /// Sharper downscaling of detailed logos, noticeably slower.
    Lanczos3,
}

impl FilterType {
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        use image::imageops::FilterType as Filter;
        match self {
            FilterType::Nearest => Filter::Nearest,
            FilterType::Bilinear => Filter::Triangle,
            FilterType::Lanczos3 => Filter::Lanczos3,
        }
    }
}

/// EXIF orientation tag.
///
/// Browsers honor it when rendering an `<img>`, so a crop drawn over the
/// rendered logo refers to the oriented pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Normal,
    FlipHorizontal,
    Rotate180,
    FlipVertical,
    Transpose,
    Rotate90CW,
    Transverse,
    Rotate270CW,
}

impl Orientation {
    /// Map the raw tag value; out-of-range values are treated as upright.
    pub fn from_exif(value: u32) -> Self {
        const TABLE: [Orientation; 8] = [
            Orientation::Normal,
            Orientation::FlipHorizontal,
            Orientation::Rotate180,
            Orientation::FlipVertical,
            Orientation::Transpose,
            Orientation::Rotate90CW,
            Orientation::Transverse,
            Orientation::Rotate270CW,
        ];
        value
            .checked_sub(1)
            .and_then(|i| TABLE.get(i as usize).copied())
            .unwrap_or_default()
    }
}

/// Oriented RGBA pixels of a logo, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodedImage {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub const CHANNELS: usize = 4;

    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * Self::CHANNELS,
            "RGBA buffer does not match {width}x{height}"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgba_image(img: RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    /// Borrowed view for `image::imageops`; `None` if the buffer is short.
    pub fn as_rgba_image(&self) -> Option<ImageBuffer<Rgba<u8>, &[u8]>> {
        ImageBuffer::from_raw(self.width, self.height, self.pixels.as_slice())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bilinear_is_default_filter() {
        assert_eq!(FilterType::default(), FilterType::Bilinear);
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
    }

    #[test]
    fn test_orientation_from_exif() {
        assert_eq!(Orientation::from_exif(1), Orientation::Normal);
        assert_eq!(Orientation::from_exif(3), Orientation::Rotate180);
        assert_eq!(Orientation::from_exif(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from_exif(8), Orientation::Rotate270CW);
        assert_eq!(Orientation::from_exif(0), Orientation::Normal);
        assert_eq!(Orientation::from_exif(9), Orientation::Normal);
    }

    #[test]
    fn test_from_rgba_image_keeps_alpha() {
        let img = RgbaImage::from_pixel(3, 2, Rgba([10, 20, 30, 0]));
        let decoded = DecodedImage::from_rgba_image(img);
        assert_eq!((decoded.width, decoded.height), (3, 2));
        assert_eq!(&decoded.pixels[..4], &[10, 20, 30, 0]);
    }

    #[test]
    fn test_borrowed_view_rejects_short_buffer() {
        let img = DecodedImage {
            width: 4,
            height: 4,
            pixels: vec![0u8; 10],
        };
        assert!(img.as_rgba_image().is_none());
    }

    #[test]
    fn test_decode_error_messages() {
        assert_eq!(DecodeError::Empty.to_string(), "Logo file is empty");
        assert_eq!(
            DecodeError::CorruptedFile("eof".into()).to_string(),
            "Logo could not be decoded: eof"
        );
    }
}
