//! Decoding of uploaded and fetched images with EXIF orientation handling.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageReader};

use super::{DecodeError, DecodedImage, Orientation};

/// Decode PNG, JPEG or WebP bytes into RGBA pixels, applying EXIF orientation.
///
/// # Errors
///
/// Returns `DecodeError::Empty` for an empty buffer, `DecodeError::InvalidFormat`
/// if the format cannot be sniffed, and `DecodeError::CorruptedFile` if the
/// decoder rejects the data.
pub fn decode_image(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    if bytes.is_empty() {
        return Err(DecodeError::Empty);
    }

    let orientation = get_orientation(bytes);

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    if reader.format().is_none() {
        return Err(DecodeError::InvalidFormat);
    }

    let img = reader
        .decode()
        .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

    let oriented = apply_orientation(img, orientation);
    tracing::debug!(
        width = oriented.width(),
        height = oriented.height(),
        ?orientation,
        "image decoded"
    );

    Ok(DecodedImage::from_rgba_image(oriented.into_rgba8()))
}

/// Read the EXIF orientation, defaulting to `Normal` when absent or unreadable.
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);

    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from_exif)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}

fn apply_orientation(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x % 256) as u8, (y % 256) as u8, 0, 200])
        });
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_decode_png_keeps_alpha() {
        let decoded = decode_image(&png_bytes(8, 4)).unwrap();
        assert_eq!(decoded.width, 8);
        assert_eq!(decoded.height, 4);
        assert_eq!(decoded.pixels.len(), 8 * 4 * 4);
        assert_eq!(decoded.pixels[3], 200);
        // Pixel (5, 2)
        let idx = (2 * 8 + 5) * 4;
        assert_eq!(&decoded.pixels[idx..idx + 3], &[5, 2, 0]);
    }

    #[test]
    fn test_decode_jpeg() {
        let rgb = image::RgbImage::from_pixel(6, 3, image::Rgb([120, 120, 120]));
        let mut buf = Cursor::new(Vec::new());
        rgb.write_to(&mut buf, ImageFormat::Jpeg).unwrap();

        let decoded = decode_image(buf.get_ref()).unwrap();
        assert_eq!((decoded.width, decoded.height), (6, 3));
        // JPEG has no alpha; it decodes as opaque
        assert_eq!(decoded.pixels[3], 255);
    }

    #[test]
    fn test_decode_empty() {
        assert!(matches!(decode_image(&[]), Err(DecodeError::Empty)));
    }

    #[test]
    fn test_decode_unknown_format() {
        let result = decode_image(b"definitely not an image");
        assert!(matches!(result, Err(DecodeError::InvalidFormat)));
    }

    #[test]
    fn test_decode_truncated_png() {
        let bytes = png_bytes(16, 16);
        let result = decode_image(&bytes[..bytes.len() / 2]);
        assert!(matches!(result, Err(DecodeError::CorruptedFile(_))));
    }

    #[test]
    fn test_orientation_without_exif() {
        assert_eq!(get_orientation(&png_bytes(2, 2)), Orientation::Normal);
        assert_eq!(get_orientation(&[0u8; 8]), Orientation::Normal);
    }

    #[test]
    fn test_apply_orientation_swaps_dimensions() {
        let img = DynamicImage::ImageRgba8(RgbaImage::new(4, 2));
        let rotated = apply_orientation(img, Orientation::Rotate90CW);
        assert_eq!((rotated.width(), rotated.height()), (2, 4));
    }
}
