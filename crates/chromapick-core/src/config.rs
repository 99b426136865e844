//! Picker configuration.

use crate::color::ColorFormat;
use crate::error::PickerResult;
use crate::palette::DEFAULT_RAMP_STEP;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Color shown when nothing (or nothing valid) is configured.
pub const DEFAULT_COLOR: &str = "#088da5";

/// Swatches shown when none are configured.
pub const DEFAULT_SWATCHES: [&str; 6] = [
    "#5a80b4", "#40e0d0", "#088da5", "#f6546a", "#cac8a0", "#0079cf",
];

/// Most colors taken from an uploaded image.
pub const MAX_COLORS_FROM_IMAGE: usize = 64;

/// Swatches produced by one random generation.
pub const RANDOM_SWATCH_COUNT: usize = 10;

/// Random draws allowed per requested swatch.
pub const RANDOM_RETRY_LIMIT: usize = 8;

/// Most swatches one random generation may request.
pub const MAX_RANDOM_SWATCHES: usize = 256;

/// Construction-time settings for a picker instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub initial_color: String,
    pub swatches: Vec<String>,
    pub max_colors_from_image: usize,
    pub random_swatch_count: usize,
    pub random_retry_limit: usize,
    pub default_format: ColorFormat,
    /// Percentage step between shade/tint ramp entries.
    pub ramp_step: u8,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            initial_color: DEFAULT_COLOR.to_string(),
            swatches: DEFAULT_SWATCHES.iter().map(|s| s.to_string()).collect(),
            max_colors_from_image: MAX_COLORS_FROM_IMAGE,
            random_swatch_count: RANDOM_SWATCH_COUNT,
            random_retry_limit: RANDOM_RETRY_LIMIT,
            default_format: ColorFormat::default(),
            ramp_step: DEFAULT_RAMP_STEP,
        }
    }
}

impl PickerConfig {
    /// Parse JSON; missing fields take their defaults.
    pub fn from_json_str(json: &str) -> PickerResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> PickerResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded picker config from {:?}", path);
        Ok(config)
    }

    pub fn with_initial_color(mut self, color: impl Into<String>) -> Self {
        self.initial_color = color.into();
        self
    }

    pub fn with_swatches<I, S>(mut self, swatches: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.swatches = swatches.into_iter().map(Into::into).collect();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PickerError;

    #[test]
    fn test_defaults() {
        let config = PickerConfig::default();
        assert_eq!(config.initial_color, "#088da5");
        assert_eq!(config.swatches.len(), 6);
        assert_eq!(config.max_colors_from_image, 64);
        assert_eq!(config.default_format, ColorFormat::Hsl);
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let json = r##"{ "initial_color": "#2f9d66", "default_format": "hex" }"##;
        let config = PickerConfig::from_json_str(json).unwrap();
        assert_eq!(config.initial_color, "#2f9d66");
        assert_eq!(config.default_format, ColorFormat::Hex);
        assert_eq!(config.random_swatch_count, RANDOM_SWATCH_COUNT);
        assert_eq!(config.swatches.len(), DEFAULT_SWATCHES.len());
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let result = PickerConfig::from_json_str("{ not json");
        assert!(matches!(result, Err(PickerError::Config(_))));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("picker.json");
        std::fs::write(&path, r#"{ "swatches": ["red", "blue"], "ramp_step": 20 }"#).unwrap();

        let config = PickerConfig::load(&path).unwrap();
        assert_eq!(config.swatches, vec!["red", "blue"]);
        assert_eq!(config.ramp_step, 20);
    }

    #[test]
    fn test_load_missing_file() {
        let result = PickerConfig::load("/no/such/picker.json");
        assert!(matches!(result, Err(PickerError::Io(_))));
    }

    #[test]
    fn test_builders() {
        let config = PickerConfig::default()
            .with_initial_color("#f6546a")
            .with_swatches(["#000000"]);
        assert_eq!(config.initial_color, "#f6546a");
        assert_eq!(config.swatches, vec!["#000000"]);
    }
}
