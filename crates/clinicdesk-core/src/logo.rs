//! Crop a logo to an upload-ready PNG.
//!
//! This is the whole logo pipeline after the source bytes are in memory:
//! decode, map the display-space selection to native pixels, size the output,
//! resample and encode. Uploading the returned PNG is the caller's business.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::CropConfig;
use crate::decode::{self, DecodeError, FetchFailure};
use crate::encode::{self, EncodeError};
use crate::transform::{
    extract_region, output_dimensions, CropSelection, DisplaySize, NativeRect, OutputSpec,
};

/// Errors from the logo crop pipeline. All are recoverable by the user.
#[derive(Debug, Error)]
pub enum LogoError {
    /// The image could not be fetched or decoded. Retry, or upload the file.
    #[error("Could not load the image: {0}")]
    ImageLoad(String),

    /// The browser refused pixel access to a remote image. Only a direct
    /// upload of the file fixes this.
    #[error("The image cannot be read from its current location; upload the file directly ({0})")]
    CrossOriginRead(String),

    /// Encoding the output failed or produced nothing.
    #[error("Could not encode the cropped image: {0}")]
    Encoding(String),

    /// Selection or display size is unusable.
    #[error("Invalid crop selection: {0}")]
    InvalidSelection(String),

    /// The caller cancelled the operation.
    #[error("Crop cancelled")]
    Cancelled,
}

impl LogoError {
    /// Stable name of the error kind, used as the JS error `name`.
    pub fn kind(&self) -> &'static str {
        match self {
            LogoError::ImageLoad(_) => "ImageLoadError",
            LogoError::CrossOriginRead(_) => "CrossOriginReadError",
            LogoError::Encoding(_) => "EncodingError",
            LogoError::InvalidSelection(_) => "InvalidSelection",
            LogoError::Cancelled => "Cancelled",
        }
    }
}

impl From<DecodeError> for LogoError {
    fn from(err: DecodeError) -> Self {
        LogoError::ImageLoad(err.to_string())
    }
}

impl From<EncodeError> for LogoError {
    fn from(err: EncodeError) -> Self {
        LogoError::Encoding(err.to_string())
    }
}

impl From<FetchFailure> for LogoError {
    fn from(failure: FetchFailure) -> Self {
        if failure.is_cross_origin() {
            tracing::warn!(%failure, "remote logo is not readable cross-origin");
            LogoError::CrossOriginRead(failure.to_string())
        } else {
            LogoError::ImageLoad(failure.to_string())
        }
    }
}

/// Cooperative cancellation flag shared between the caller and a crop.
///
/// Checked before decoding and before encoding.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn check(&self) -> Result<(), LogoError> {
        if self.is_cancelled() {
            Err(LogoError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// What the user asked for: selection, the size it was drawn at, and the
/// output spec.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRequest {
    pub selection: CropSelection,
    pub display: DisplaySize,
    pub output: OutputSpec,
}

/// Encoded logo ready for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogoBitmap {
    pub width: u32,
    pub height: u32,
    /// PNG bytes.
    pub png: Vec<u8>,
}

/// Crop `source` (encoded image bytes) to a PNG according to `request`.
pub fn crop_to_output_bitmap(
    source: &[u8],
    request: &CropRequest,
    config: &CropConfig,
) -> Result<LogoBitmap, LogoError> {
    crop_to_output_bitmap_with_cancel(source, request, config, &CancelToken::new())
}

/// [`crop_to_output_bitmap`] with a cancellation token.
pub fn crop_to_output_bitmap_with_cancel(
    source: &[u8],
    request: &CropRequest,
    config: &CropConfig,
    cancel: &CancelToken,
) -> Result<LogoBitmap, LogoError> {
    let CropRequest {
        selection,
        display,
        output,
    } = *request;

    config
        .validate()
        .map_err(|e| LogoError::InvalidSelection(e.to_string()))?;

    if !display.is_valid() {
        return Err(LogoError::InvalidSelection(format!(
            "display size {}x{} must be positive",
            display.width, display.height
        )));
    }
    if !selection.is_valid() {
        return Err(LogoError::InvalidSelection(
            "selection must have a positive width and height".into(),
        ));
    }

    cancel.check()?;
    let image = decode::decode_image(source)?;

    // Free mode sizes from the clamped region so an overhanging selection
    // keeps the aspect ratio of the pixels actually extracted.
    let region = selection
        .to_native(display, image.width, image.height)
        .to_region(image.width, image.height);
    let (out_width, out_height) = output_dimensions(&NativeRect::from(region), output, config)
        .ok_or_else(|| LogoError::InvalidSelection(format!("no output size for {output:?}")))?;

    let cropped = extract_region(&image, region).ok_or_else(|| {
        LogoError::InvalidSelection(format!("region {region:?} is outside the image"))
    })?;
    let resized = decode::resize(&cropped, out_width, out_height, config.filter)?;

    cancel.check()?;
    let png = encode::encode_png(&resized.pixels, resized.width, resized.height)?;

    tracing::info!(
        source_width = image.width,
        source_height = image.height,
        ?region,
        width = out_width,
        height = out_height,
        bytes = png.len(),
        "logo cropped"
    );

    Ok(LogoBitmap {
        width: out_width,
        height: out_height,
        png,
    })
}
