//! Fresh CORS fetch of remotely hosted logos.
//!
//! Browsers keep a cached copy of an image that was first loaded by an
//! `<img>` tag without CORS headers, and reusing it taints any canvas it is
//! drawn on. Requests here always go out with a cache-busting query
//! parameter, `mode: "cors"` and `cache: "no-store"` so the bytes come from a
//! response the page is allowed to read.

use crate::error::logo_error_to_js;
use clinicdesk_core::decode::{fresh_fetch_url, FetchFailure, DEFAULT_CACHE_BUST_PARAM};
use clinicdesk_core::LogoError;
use js_sys::{Promise, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    DomException, Request, RequestCache, RequestInit, RequestMode, Response, ResponseType, Window,
    WorkerGlobalScope,
};

/// Fetch a remote image as bytes, bypassing any cached non-CORS copy.
///
/// # Arguments
/// * `url` - Image URL as stored on the program or clinic
/// * `cache_bust_param` - Query parameter name, `"t"` when omitted
///
/// # Errors
/// Rejects with an `Error` named `CrossOriginReadError` when the host does
/// not allow the page to read the image, or `ImageLoadError` otherwise.
#[wasm_bindgen]
pub async fn fetch_fresh_image(
    url: String,
    cache_bust_param: Option<String>,
) -> Result<Vec<u8>, JsValue> {
    let param = cache_bust_param.unwrap_or_else(|| DEFAULT_CACHE_BUST_PARAM.to_string());
    fetch_image_bytes(&url, &param)
        .await
        .map_err(logo_error_to_js)
}

pub(crate) async fn fetch_image_bytes(url: &str, param: &str) -> Result<Vec<u8>, LogoError> {
    let fresh_url = fresh_fetch_url(url, param, js_sys::Date::now() as u64);

    let init = RequestInit::new();
    init.set_method("GET");
    init.set_mode(RequestMode::Cors);
    init.set_cache(RequestCache::NoStore);

    let request = Request::new_with_str_and_init(&fresh_url, &init).map_err(classify)?;
    let response = JsFuture::from(start_fetch(&request)?)
        .await
        .map_err(classify)?;
    let response: Response = response
        .dyn_into()
        .map_err(|_| LogoError::ImageLoad("fetch did not resolve to a Response".into()))?;

    if response.type_() == ResponseType::Opaque {
        return Err(FetchFailure::OpaqueResponse.into());
    }
    if !response.ok() {
        return Err(FetchFailure::HttpStatus(response.status()).into());
    }

    let buffer = JsFuture::from(response.array_buffer().map_err(classify)?)
        .await
        .map_err(classify)?;
    let bytes = Uint8Array::new(&buffer).to_vec();

    tracing::debug!(url, bytes = bytes.len(), "remote logo fetched");
    Ok(bytes)
}

/// Call `fetch` on whichever global scope we are running in.
fn start_fetch(request: &Request) -> Result<Promise, LogoError> {
    let global = js_sys::global();
    if let Some(window) = global.dyn_ref::<Window>() {
        return Ok(window.fetch_with_request(request));
    }
    if let Some(worker) = global.dyn_ref::<WorkerGlobalScope>() {
        return Ok(worker.fetch_with_request(request));
    }
    Err(LogoError::ImageLoad("fetch is not available in this context".into()))
}

/// Map a rejected promise value to a logo error.
fn classify(value: JsValue) -> LogoError {
    let failure = if let Some(exception) = value.dyn_ref::<DomException>() {
        FetchFailure::from_exception(&exception.name(), &exception.message())
    } else if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        FetchFailure::from_exception(&String::from(error.name()), &String::from(error.message()))
    } else {
        FetchFailure::Network(format!("{value:?}"))
    };
    failure.into()
}
