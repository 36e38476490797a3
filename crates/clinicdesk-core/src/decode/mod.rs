//! Image loading for the logo editor.
//!
//! This module provides functionality for:
//! - Decoding PNG, JPEG and WebP logos to RGBA with EXIF orientation applied
//! - Describing where a logo comes from and fetching remote logos fresh
//! - Resampling decoded images
//!
//! # Architecture
//!
//! Decoding is synchronous. The only asynchronous step in the logo pipeline is
//! fetching a remote logo, which happens in the browser bindings; this module
//! only builds the URL and classifies the failure.

mod reader;
mod resize;
mod source;
mod types;

pub use reader::{decode_image, get_orientation};
pub use resize::{resize, scale_long_edge};
pub use source::{fresh_fetch_url, FetchFailure, ImageSource, DEFAULT_CACHE_BUST_PARAM};
pub use types::{DecodeError, DecodedImage, FilterType, Orientation};
