//! Conversion of core errors into JavaScript values.

use clinicdesk_core::LogoError;
use wasm_bindgen::prelude::*;

/// Convert a logo error into a JS `Error` whose `name` is the error kind, so
/// the frontend can tell a cross-origin failure (ask for a direct upload)
/// from a load or encoding failure (offer a retry).
pub(crate) fn logo_error_to_js(err: LogoError) -> JsValue {
    let js_err = js_sys::Error::new(&err.to_string());
    js_err.set_name(err.kind());
    js_err.into()
}

/// Plain string error for everything without a distinguishing kind.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}
