//! Where a logo comes from, and how a remote logo must be fetched.
//!
//! A logo is either bytes the user just picked from disk, or the URL of a
//! previously uploaded logo on the CDN. Remote logos must be fetched fresh in
//! CORS mode. Reusing an earlier same-URL response that was loaded without
//! CORS yields an opaque body whose pixels cannot be read, so every remote
//! fetch carries a cache-busting query parameter.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Query parameter appended to remote URLs unless configured otherwise.
pub const DEFAULT_CACHE_BUST_PARAM: &str = "t";

/// Source of the image being cropped.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum ImageSource {
    /// Bytes captured from a file picker.
    Bytes(Vec<u8>),
    /// URL of a persisted image.
    Url(String),
}

impl ImageSource {
    pub fn is_remote(&self) -> bool {
        matches!(self, ImageSource::Url(_))
    }
}

/// Append `param=timestamp_ms` to `url` so the browser cannot reuse a cached
/// response. The parameter goes before any `#fragment`.
pub fn fresh_fetch_url(url: &str, param: &str, timestamp_ms: u64) -> String {
    let (base, fragment) = match url.find('#') {
        Some(idx) => url.split_at(idx),
        None => (url, ""),
    };

    let separator = if !base.contains('?') {
        "?"
    } else if base.ends_with('?') || base.ends_with('&') {
        ""
    } else {
        "&"
    };

    format!("{base}{separator}{param}={timestamp_ms}{fragment}")
}

/// Why fetching a remote image failed, as observed by the browser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchFailure {
    /// Request rejected before a response (offline, DNS, CORS preflight).
    Network(String),
    /// Server answered with a non-success status.
    HttpStatus(u16),
    /// Response body is opaque to script.
    OpaqueResponse,
    /// The browser raised a `SecurityError` while reading pixels.
    Security(String),
}

impl FetchFailure {
    /// Classify a browser exception by its `name`.
    pub fn from_exception(name: &str, message: &str) -> Self {
        if name == "SecurityError" {
            FetchFailure::Security(message.to_string())
        } else {
            FetchFailure::Network(format!("{name}: {message}"))
        }
    }

    /// Failures that only a direct upload can fix.
    pub fn is_cross_origin(&self) -> bool {
        matches!(
            self,
            FetchFailure::OpaqueResponse | FetchFailure::Security(_)
        )
    }
}

impl fmt::Display for FetchFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FetchFailure::Network(msg) => write!(f, "network error: {msg}"),
            FetchFailure::HttpStatus(status) => write!(f, "server responded with {status}"),
            FetchFailure::OpaqueResponse => write!(f, "response is not readable cross-origin"),
            FetchFailure::Security(msg) => write!(f, "security error: {msg}"),
        }
    }
}
