//! Editor configuration.
//!
//! Deployments ship an `editor.toml` with the default fee assumptions and the
//! logo cropper's limits. Every field is optional; anything missing falls back
//! to the defaults below.
//!
//! ```toml
//! [pricing]
//! shipping_cost = 9.99
//! facilitation_fee = 12.0
//! retained_percent = 5.0
//! include_retained_in_cogs = true
//!
//! [crop]
//! min_long_edge = 800
//! max_long_edge = 4096
//! filter = "bilinear"
//! cache_bust_param = "t"
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decode::{FilterType, DEFAULT_CACHE_BUST_PARAM};
use crate::pricing::FeeAssumptions;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse editor config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid editor config: {0}")]
    Invalid(String),
}

/// Limits and options for the logo cropper.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    /// Free-mode floor for the longer output side.
    pub min_long_edge: u32,
    /// Free-mode cap for the longer output side.
    pub max_long_edge: u32,
    /// Resampling filter.
    pub filter: FilterType,
    /// Query parameter used to defeat caching of remote logos.
    pub cache_bust_param: String,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            min_long_edge: 800,
            max_long_edge: 4096,
            filter: FilterType::Bilinear,
            cache_bust_param: DEFAULT_CACHE_BUST_PARAM.to_string(),
        }
    }
}

impl CropConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_long_edge == 0 {
            return Err(ConfigError::Invalid(
                "crop.min_long_edge must be positive".into(),
            ));
        }
        if self.max_long_edge < self.min_long_edge {
            return Err(ConfigError::Invalid(format!(
                "crop.max_long_edge ({}) is below crop.min_long_edge ({})",
                self.max_long_edge, self.min_long_edge
            )));
        }
        let param_ok = !self.cache_bust_param.is_empty()
            && self
                .cache_bust_param
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !param_ok {
            return Err(ConfigError::Invalid(format!(
                "crop.cache_bust_param {:?} is not a plain query key",
                self.cache_bust_param
            )));
        }
        Ok(())
    }
}

/// Top-level editor configuration.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    pub pricing: FeeAssumptions,
    pub crop: CropConfig,
}

impl EditorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = toml::from_str(source)?;
        config.validate()?;
        tracing::debug!(?config, "editor config loaded");
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let fees = &self.pricing;
        if !(0.0..=100.0).contains(&fees.retained_percent) {
            return Err(ConfigError::Invalid(format!(
                "pricing.retained_percent ({}) must be between 0 and 100",
                fees.retained_percent
            )));
        }
        if fees.shipping_cost < 0.0 || fees.facilitation_fee < 0.0 {
            return Err(ConfigError::Invalid(
                "pricing fees must not be negative".into(),
            ));
        }
        self.crop.validate()
    }
}
