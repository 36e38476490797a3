//! Resampling of decoded images.
//!
//! Uses the `image` crate's filters. The functions never modify the input.

use super::{DecodeError, DecodedImage, FilterType};

/// Resize an image to exact dimensions.
///
/// Each axis is scaled independently, so the aspect ratio follows the
/// requested size rather than the source.
///
/// # Errors
///
/// Returns `DecodeError::InvalidFormat` for a zero target dimension and
/// `DecodeError::CorruptedFile` if the pixel buffer does not match the
/// declared dimensions.
pub fn resize(
    image: &DecodedImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<DecodedImage, DecodeError> {
    if width == 0 || height == 0 {
        return Err(DecodeError::InvalidFormat);
    }

    let view = image
        .as_rgba_image()
        .ok_or_else(|| DecodeError::CorruptedFile("Pixel buffer size mismatch".to_string()))?;

    // Fast path: if dimensions match, just clone
    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let resized = image::imageops::resize(&view, width, height, filter.to_image_filter());

    Ok(DecodedImage::from_rgba_image(resized))
}

/// Dimensions that bring the longer edge of `width x height` to `long_edge`,
/// preserving the aspect ratio. The shorter edge is rounded and at least 1.
pub fn scale_long_edge(width: f64, height: f64, long_edge: u32) -> (u32, u32) {
    if !(width > 0.0 && height > 0.0) || long_edge == 0 {
        return (0, 0);
    }

    let ratio = width / height;

    if width >= height {
        let short = (long_edge as f64 / ratio).round() as u32;
        (long_edge, short.clamp(1, long_edge))
    } else {
        let short = (long_edge as f64 * ratio).round() as u32;
        (short.clamp(1, long_edge), long_edge)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_image(width: u32, height: u32) -> DecodedImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                pixels.push(((x * 255) / width.max(1)) as u8);
                pixels.push(((y * 255) / height.max(1)) as u8);
                pixels.push(128);
                pixels.push(255);
            }
        }
        DecodedImage::new(width, height, pixels)
    }

    #[test]
    fn test_resize_basic() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 50, 25, FilterType::Bilinear).unwrap();

        assert_eq!(resized.width, 50);
        assert_eq!(resized.height, 25);
        assert_eq!(resized.pixels.len(), 50 * 25 * 4);
    }

    #[test]
    fn test_resize_non_uniform() {
        // Stretch horizontally, squash vertically
        let img = create_test_image(40, 40);
        let resized = resize(&img, 120, 10, FilterType::Nearest).unwrap();
        assert_eq!((resized.width, resized.height), (120, 10));
    }

    #[test]
    fn test_resize_same_dimensions() {
        let img = create_test_image(100, 50);
        let resized = resize(&img, 100, 50, FilterType::Bilinear).unwrap();
        assert_eq!(resized, img);
    }

    #[test]
    fn test_resize_upscale() {
        let img = create_test_image(20, 10);
        let resized = resize(&img, 800, 400, FilterType::Lanczos3).unwrap();
        assert_eq!((resized.width, resized.height), (800, 400));
    }

    #[test]
    fn test_resize_zero_dimensions_error() {
        let img = create_test_image(100, 50);
        assert!(resize(&img, 0, 50, FilterType::Bilinear).is_err());
        assert!(resize(&img, 50, 0, FilterType::Bilinear).is_err());
    }

    #[test]
    fn test_resize_mismatched_buffer_error() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 12],
        };
        assert!(matches!(
            resize(&img, 5, 5, FilterType::Bilinear),
            Err(DecodeError::CorruptedFile(_))
        ));
    }

    #[test]
    fn test_scale_long_edge_landscape() {
        assert_eq!(scale_long_edge(6000.0, 4000.0, 2560), (2560, 1707));
    }

    #[test]
    fn test_scale_long_edge_portrait() {
        assert_eq!(scale_long_edge(4000.0, 6000.0, 2560), (1707, 2560));
    }

    #[test]
    fn test_scale_long_edge_square() {
        assert_eq!(scale_long_edge(37.0, 37.0, 800), (800, 800));
    }

    #[test]
    fn test_scale_long_edge_extreme_ratio() {
        // A 1000:1 sliver still gets a one pixel short edge
        assert_eq!(scale_long_edge(1000.0, 1.0, 800), (800, 1));
    }

    #[test]
    fn test_scale_long_edge_degenerate() {
        assert_eq!(scale_long_edge(0.0, 10.0, 800), (0, 0));
        assert_eq!(scale_long_edge(f64::NAN, 10.0, 800), (0, 0));
        assert_eq!(scale_long_edge(10.0, 10.0, 0), (0, 0));
    }

    #[test]
    fn test_all_filter_types() {
        let img = create_test_image(100, 50);

        for filter in [
            FilterType::Nearest,
            FilterType::Bilinear,
            FilterType::Lanczos3,
        ] {
            let resized = resize(&img, 50, 25, filter).unwrap();
            assert_eq!(resized.width, 50);
            assert_eq!(resized.height, 25);
        }
    }
}
