//! WASM bindings for the logo cropper.

use crate::error::{logo_error_to_js, to_js_error};
use crate::fetch::fetch_image_bytes;
use crate::types::JsLogoBitmap;
use clinicdesk_core::transform::{self, AspectPreset, DisplaySize};
use clinicdesk_core::{crop_to_output_bitmap, CropConfig, CropRequest};
use wasm_bindgen::prelude::*;

/// Read an optional crop config; `undefined` or `null` gives the defaults.
fn config_from_js(config: JsValue) -> Result<CropConfig, JsValue> {
    if config.is_undefined() || config.is_null() {
        return Ok(CropConfig::default());
    }
    let config: CropConfig = serde_wasm_bindgen::from_value(config)?;
    config.validate().map_err(to_js_error)?;
    Ok(config)
}

fn parse_preset(name: &str) -> Option<AspectPreset> {
    match name {
        "square" => Some(AspectPreset::Square),
        "standard" => Some(AspectPreset::Standard),
        "wide" => Some(AspectPreset::Wide),
        "landscape" => Some(AspectPreset::Landscape),
        "free" => Some(AspectPreset::Free),
        _ => None,
    }
}

fn preset_name(preset: AspectPreset) -> &'static str {
    match preset {
        AspectPreset::Square => "square",
        AspectPreset::Standard => "standard",
        AspectPreset::Wide => "wide",
        AspectPreset::Landscape => "landscape",
        AspectPreset::Free => "free",
    }
}

fn preset_from_js(name: &str) -> Result<AspectPreset, JsValue> {
    parse_preset(name).ok_or_else(|| to_js_error(format!("Unknown aspect preset: {name}")))
}

/// Crop a picked logo file to a PNG.
///
/// # Arguments
/// * `source` - Encoded image bytes (PNG, JPEG or WebP)
/// * `request` - `{ selection, display, output }`
/// * `config` - Crop config, or `undefined` for the defaults
///
/// # Errors
/// Throws an `Error` whose `name` is `ImageLoadError`, `EncodingError` or
/// `InvalidSelection`.
#[wasm_bindgen]
pub fn crop_logo(
    source: &[u8],
    request: JsValue,
    config: JsValue,
) -> Result<JsLogoBitmap, JsValue> {
    let request: CropRequest = serde_wasm_bindgen::from_value(request)?;
    let config = config_from_js(config)?;

    crop_to_output_bitmap(source, &request, &config)
        .map(JsLogoBitmap::from)
        .map_err(logo_error_to_js)
}

/// Fetch a remotely hosted logo fresh and crop it to a PNG.
///
/// Rejects with `CrossOriginReadError` when the host does not allow the page
/// to read the image; the editor then asks for a direct upload.
#[wasm_bindgen]
pub async fn crop_remote_logo(
    url: String,
    request: JsValue,
    config: JsValue,
) -> Result<JsLogoBitmap, JsValue> {
    let request: CropRequest = serde_wasm_bindgen::from_value(request)?;
    let config = config_from_js(config)?;

    let bytes = fetch_image_bytes(&url, &config.cache_bust_param)
        .await
        .map_err(logo_error_to_js)?;

    crop_to_output_bitmap(&bytes, &request, &config)
        .map(JsLogoBitmap::from)
        .map_err(logo_error_to_js)
}

/// Fixed export size of a preset as `[width, height]`, `undefined` for free.
#[wasm_bindgen]
pub fn preset_output_size(preset: &str) -> Result<Option<Vec<u32>>, JsValue> {
    let preset = preset_from_js(preset)?;
    Ok(preset
        .output_size()
        .map(|(width, height)| vec![width, height]))
}

/// Preset after clicking `clicked` while `current` is active.
#[wasm_bindgen]
pub fn toggle_preset(current: &str, clicked: &str) -> Result<String, JsValue> {
    let next = AspectPreset::toggle(preset_from_js(current)?, preset_from_js(clicked)?);
    Ok(preset_name(next).to_string())
}

/// Initial selection `{ x, y, width, height }` for a preset.
#[wasm_bindgen]
pub fn initial_selection(
    display_width: f64,
    display_height: f64,
    preset: &str,
) -> Result<JsValue, JsValue> {
    let display = DisplaySize::new(display_width, display_height);
    if !display.is_valid() {
        return Err(to_js_error(format!(
            "Invalid display size: {display_width}x{display_height}"
        )));
    }
    let selection = transform::initial_selection(display, preset_from_js(preset)?);
    Ok(serde_wasm_bindgen::to_value(&selection)?)
}


#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use clinicdesk_core::transform::{CropSelection, OutputSpec};
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn png_fixture(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![200u8; (width * height * 4) as usize];
        clinicdesk_core::encode::encode_png(&pixels, width, height).unwrap()
    }

    #[wasm_bindgen_test]
    fn test_crop_logo_fixed_output() {
        let source = png_fixture(300, 100);
        let request = CropRequest {
            selection: CropSelection::new(0.0, 0.0, 150.0, 50.0),
            display: DisplaySize::new(150.0, 50.0),
            output: OutputSpec::Fixed {
                width: 600,
                height: 200,
            },
        };
        let request = serde_wasm_bindgen::to_value(&request).unwrap();

        let logo = crop_logo(&source, request, JsValue::UNDEFINED).unwrap();
        assert_eq!(logo.width(), 600);
        assert_eq!(logo.height(), 200);
        assert_eq!(&logo.png()[1..4], b"PNG");
    }

    #[wasm_bindgen_test]
    fn test_crop_logo_invalid_bytes_is_named_error() {
        let request = CropRequest {
            selection: CropSelection::new(0.0, 0.0, 10.0, 10.0),
            display: DisplaySize::new(10.0, 10.0),
            output: OutputSpec::Free,
        };
        let request = serde_wasm_bindgen::to_value(&request).unwrap();

        let err = crop_logo(&[1, 2, 3], request, JsValue::NULL).err().unwrap();
        let err: js_sys::Error = err.dyn_into().unwrap();
        assert_eq!(String::from(err.name()), "ImageLoadError");
    }

    #[wasm_bindgen_test]
    fn test_initial_selection_rejects_zero_display() {
        assert!(initial_selection(0.0, 100.0, "square").is_err());
    }
}
