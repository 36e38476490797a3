//! Output sizing for cropped logos.
//!
//! A logo is either exported at a fixed size tied to an aspect preset, or in
//! free mode at a size derived from the selection itself. Free mode keeps the
//! selection's exact aspect ratio and scales so the longer side reaches at
//! least the configured floor, which keeps small selections from producing
//! blurry logos.

use serde::{Deserialize, Serialize};

use super::crop::{CropSelection, DisplaySize, NativeRect};
use crate::config::CropConfig;
use crate::decode::scale_long_edge;

/// Aspect ratio presets offered in the logo cropper.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AspectPreset {
    /// 1:1, exported at 400x400.
    Square,
    /// 3:1, exported at 600x200.
    Standard,
    /// 5:1, exported at 800x160.
    Wide,
    /// 16:9, exported at 640x360.
    Landscape,
    /// User-drawn selection, size derived from the selection.
    #[default]
    Free,
}

impl AspectPreset {
    pub const ALL: [AspectPreset; 5] = [
        AspectPreset::Square,
        AspectPreset::Standard,
        AspectPreset::Wide,
        AspectPreset::Landscape,
        AspectPreset::Free,
    ];

    /// Fixed export size, `None` for free mode.
    pub fn output_size(self) -> Option<(u32, u32)> {
        match self {
            AspectPreset::Square => Some((400, 400)),
            AspectPreset::Standard => Some((600, 200)),
            AspectPreset::Wide => Some((800, 160)),
            AspectPreset::Landscape => Some((640, 360)),
            AspectPreset::Free => None,
        }
    }

    /// Width over height the selection is locked to, `None` for free mode.
    pub fn ratio(self) -> Option<f64> {
        match self {
            AspectPreset::Square => Some(1.0),
            AspectPreset::Standard => Some(3.0),
            AspectPreset::Wide => Some(5.0),
            AspectPreset::Landscape => Some(16.0 / 9.0),
            AspectPreset::Free => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            AspectPreset::Square => "Square (1:1)",
            AspectPreset::Standard => "Standard (3:1)",
            AspectPreset::Wide => "Wide (5:1)",
            AspectPreset::Landscape => "Landscape (16:9)",
            AspectPreset::Free => "Free",
        }
    }

    /// Preset after the user clicks `clicked` while `current` is active.
    ///
    /// Clicking the active preset again turns it off and returns to free mode.
    pub fn toggle(current: AspectPreset, clicked: AspectPreset) -> AspectPreset {
        if current == clicked {
            AspectPreset::Free
        } else {
            clicked
        }
    }

    pub fn output_spec(self) -> OutputSpec {
        match self.output_size() {
            Some((width, height)) => OutputSpec::Fixed { width, height },
            None => OutputSpec::Free,
        }
    }
}

/// Requested output size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum OutputSpec {
    /// Export at exactly this size.
    Fixed { width: u32, height: u32 },
    /// Derive the size from the selection.
    Free,
}

impl From<AspectPreset> for OutputSpec {
    fn from(preset: AspectPreset) -> Self {
        preset.output_spec()
    }
}

/// Final output dimensions for a native-space crop.
///
/// Fixed specs are returned as-is. In free mode the crop's longer side is
/// raised to `config.min_long_edge` when smaller and capped at
/// `config.max_long_edge` when larger; the shorter side follows the crop's
/// aspect ratio. Returns `None` for a degenerate crop or a zero fixed size.
pub fn output_dimensions(
    native: &NativeRect,
    spec: OutputSpec,
    config: &CropConfig,
) -> Option<(u32, u32)> {
    match spec {
        OutputSpec::Fixed { width, height } => {
            (width > 0 && height > 0).then_some((width, height))
        }
        OutputSpec::Free => {
            let long = native.width.max(native.height);
            if !(long.is_finite() && long > 0.0) {
                return None;
            }

            let floor = config.min_long_edge.min(config.max_long_edge);
            let target = (long.round() as u32).clamp(floor, config.max_long_edge);
            let dims = scale_long_edge(native.width, native.height, target);
            (dims.0 > 0 && dims.1 > 0).then_some(dims)
        }
    }
}

/// Initial selection when a preset is chosen: the largest rectangle with the
/// preset's ratio, centered in the display. Free mode selects everything.
pub fn initial_selection(display: DisplaySize, preset: AspectPreset) -> CropSelection {
    let Some(ratio) = preset.ratio() else {
        return CropSelection::full(display);
    };

    let (width, height) = if display.width / display.height > ratio {
        (display.height * ratio, display.height)
    } else {
        (display.width, display.width / ratio)
    };

    CropSelection::new(
        (display.width - width) / 2.0,
        (display.height - height) / 2.0,
        width,
        height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> CropConfig {
        CropConfig::default()
    }

    fn rect(width: f64, height: f64) -> NativeRect {
        NativeRect {
            x: 0.0,
            y: 0.0,
            width,
            height,
        }
    }

    #[test]
    fn test_preset_table() {
        assert_eq!(AspectPreset::Square.output_size(), Some((400, 400)));
        assert_eq!(AspectPreset::Standard.output_size(), Some((600, 200)));
        assert_eq!(AspectPreset::Wide.output_size(), Some((800, 160)));
        assert_eq!(AspectPreset::Landscape.output_size(), Some((640, 360)));
        assert_eq!(AspectPreset::Free.output_size(), None);
    }

    #[test]
    fn test_preset_sizes_match_ratios() {
        for preset in AspectPreset::ALL {
            if let (Some((w, h)), Some(ratio)) = (preset.output_size(), preset.ratio()) {
                assert!((w as f64 / h as f64 - ratio).abs() < 1e-9, "{preset:?}");
            }
        }
    }

    #[test]
    fn test_toggle_active_preset_returns_to_free() {
        assert_eq!(
            AspectPreset::toggle(AspectPreset::Square, AspectPreset::Square),
            AspectPreset::Free
        );
        assert_eq!(
            AspectPreset::toggle(AspectPreset::Square, AspectPreset::Wide),
            AspectPreset::Wide
        );
        assert_eq!(
            AspectPreset::toggle(AspectPreset::Free, AspectPreset::Landscape),
            AspectPreset::Landscape
        );
    }

    #[test]
    fn test_fixed_output_ignores_crop() {
        let dims = output_dimensions(&rect(13.0, 1000.0), AspectPreset::Wide.into(), &config());
        assert_eq!(dims, Some((800, 160)));
    }

    #[test]
    fn test_fixed_zero_rejected() {
        let spec = OutputSpec::Fixed {
            width: 0,
            height: 10,
        };
        assert_eq!(output_dimensions(&rect(10.0, 10.0), spec, &config()), None);
    }

    #[test]
    fn test_free_small_crop_raised_to_floor() {
        let dims = output_dimensions(&rect(200.0, 100.0), OutputSpec::Free, &config());
        assert_eq!(dims, Some((800, 400)));
    }

    #[test]
    fn test_free_portrait_crop() {
        let dims = output_dimensions(&rect(90.0, 300.0), OutputSpec::Free, &config());
        assert_eq!(dims, Some((240, 800)));
    }

    #[test]
    fn test_free_large_crop_keeps_native_size() {
        let dims = output_dimensions(&rect(1200.0, 600.0), OutputSpec::Free, &config());
        assert_eq!(dims, Some((1200, 600)));
    }

    #[test]
    fn test_free_huge_crop_capped() {
        let dims = output_dimensions(&rect(10_000.0, 5_000.0), OutputSpec::Free, &config());
        assert_eq!(dims, Some((4096, 2048)));
    }

    #[test]
    fn test_free_degenerate_crop() {
        assert_eq!(output_dimensions(&rect(0.0, 0.0), OutputSpec::Free, &config()), None);
        assert_eq!(
            output_dimensions(&rect(f64::NAN, 5.0), OutputSpec::Free, &config()),
            None
        );
    }

    #[test]
    fn test_free_inverted_bounds_use_cap() {
        let config = CropConfig {
            min_long_edge: 900,
            max_long_edge: 500,
            ..CropConfig::default()
        };
        let dims = output_dimensions(&rect(200.0, 100.0), OutputSpec::Free, &config);
        assert_eq!(dims, Some((500, 250)));
    }

    #[test]
    fn test_initial_selection_square_in_landscape_display() {
        let sel = initial_selection(DisplaySize::new(400.0, 200.0), AspectPreset::Square);
        assert_eq!(sel, CropSelection::new(100.0, 0.0, 200.0, 200.0));
    }

    #[test]
    fn test_initial_selection_wide_in_square_display() {
        let sel = initial_selection(DisplaySize::new(500.0, 500.0), AspectPreset::Wide);
        assert_eq!(sel, CropSelection::new(0.0, 200.0, 500.0, 100.0));
    }

    #[test]
    fn test_initial_selection_free_is_full() {
        let display = DisplaySize::new(321.0, 123.0);
        assert_eq!(
            initial_selection(display, AspectPreset::Free),
            CropSelection::full(display)
        );
    }

    #[test]
    fn test_output_spec_serde() {
        let json = serde_json::to_string(&OutputSpec::Fixed {
            width: 400,
            height: 400,
        })
        .unwrap();
        assert_eq!(json, r#"{"mode":"fixed","width":400,"height":400}"#);

        let free: OutputSpec = serde_json::from_str(r#"{"mode":"free"}"#).unwrap();
        assert_eq!(free, OutputSpec::Free);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
