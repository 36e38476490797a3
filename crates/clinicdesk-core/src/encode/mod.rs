//! Image encoding for logo upload.
//!
//! This module provides functionality for:
//! - Encoding RGBA images to PNG (lossless, alpha preserved)
//!
//! # Examples
//!
//! ```ignore
//! use clinicdesk_core::encode::encode_png;
//!
//! let pixels = vec![255u8; 400 * 400 * 4];
//! let png_bytes = encode_png(&pixels, 400, 400).unwrap();
//! println!("Encoded {} bytes", png_bytes.len());
//! ```

mod png;

pub use png::{encode_png, EncodeError};
