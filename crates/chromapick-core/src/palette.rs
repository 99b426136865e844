//! Shade and tint derivation.

use crate::color::{ColorValue, Rgb};
use crate::swatch::{SwatchOrigin, SwatchSet};
use std::collections::HashSet;

/// Default ramp step in percent.
pub const DEFAULT_RAMP_STEP: u8 = 10;

/// Produces shade and tint ramps for a hex color.
pub trait RampGenerator {
    /// Hue mixed progressively toward black.
    fn shades(&self, hex: &str) -> Vec<String>;

    /// Hue mixed progressively toward white.
    fn tints(&self, hex: &str) -> Vec<String>;
}

/// Linear RGB mix toward black or white in fixed percentage steps.
///
/// With a step of 10 the ramp holds the 10%, 20%, ..., 100% mixes. Repeated
/// values (common for very dark or very light inputs) are dropped.
#[derive(Debug, Clone, Copy)]
pub struct MixRamp {
    step: u8,
}

impl MixRamp {
    /// Create a ramp. Steps outside 1..=100 fall back to the default.
    pub fn new(step: u8) -> Self {
        let step = if (1..=100).contains(&step) {
            step
        } else {
            log::warn!("Ramp step {} out of range, using {}", step, DEFAULT_RAMP_STEP);
            DEFAULT_RAMP_STEP
        };
        Self { step }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    fn ramp(&self, hex: &str, target: f64) -> Vec<String> {
        let Some(color) = ColorValue::parse(hex) else {
            log::warn!("Cannot build ramp for invalid color {}", hex);
            return Vec::new();
        };
        let base = color.rgb();
        let mix = |c: f64, w: f64| c + (target - c) * w;

        let mut seen = HashSet::new();
        (self.step..=100)
            .step_by(self.step as usize)
            .map(|percent| {
                let w = percent as f64 / 100.0;
                ColorValue::from_rgb(
                    Rgb::new(mix(base.r, w), mix(base.g, w), mix(base.b, w)),
                    1.0,
                )
                .to_hex_string()
            })
            .filter(|hex| seen.insert(hex.clone()))
            .collect()
    }
}

impl Default for MixRamp {
    fn default() -> Self {
        Self::new(DEFAULT_RAMP_STEP)
    }
}

impl RampGenerator for MixRamp {
    fn shades(&self, hex: &str) -> Vec<String> {
        self.ramp(hex, 0.0)
    }

    fn tints(&self, hex: &str) -> Vec<String> {
        self.ramp(hex, 255.0)
    }
}

/// Builds shade and tint swatch sets from the current color.
pub struct PaletteGenerator {
    ramp: Box<dyn RampGenerator>,
}

impl PaletteGenerator {
    pub fn new(ramp: Box<dyn RampGenerator>) -> Self {
        Self { ramp }
    }

    pub fn shades(&self, color: &ColorValue) -> SwatchSet {
        let hex = color.to_hex_string();
        SwatchSet::new(SwatchOrigin::Shades, self.ramp.shades(&hex))
    }

    pub fn tints(&self, color: &ColorValue) -> SwatchSet {
        let hex = color.to_hex_string();
        SwatchSet::new(SwatchOrigin::Tints, self.ramp.tints(&hex))
    }
}

impl Default for PaletteGenerator {
    fn default() -> Self {
        Self::new(Box::new(MixRamp::default()))
    }
}

impl std::fmt::Debug for PaletteGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaletteGenerator").finish_non_exhaustive()
    }
}
