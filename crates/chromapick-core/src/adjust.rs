//! Slider adjustments and their baseline cache.
//!
//! Every slider computes its result from a baseline color captured the first
//! time that slider is touched, never from its own previous output. Moving a
//! different slider starts a fresh chain: at most one baseline is held.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A slider-driven color adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdjustmentKind {
    /// Rotate hue by degrees.
    Spin,
    Saturate,
    Desaturate,
    Lighten,
    Darken,
    /// Move every RGB channel by a percentage of full scale.
    Brighten,
}

impl AdjustmentKind {
    pub const COUNT: usize = 6;

    pub const ALL: [AdjustmentKind; Self::COUNT] = [
        AdjustmentKind::Spin,
        AdjustmentKind::Saturate,
        AdjustmentKind::Desaturate,
        AdjustmentKind::Lighten,
        AdjustmentKind::Darken,
        AdjustmentKind::Brighten,
    ];

    const fn index(self) -> usize {
        match self {
            AdjustmentKind::Spin => 0,
            AdjustmentKind::Saturate => 1,
            AdjustmentKind::Desaturate => 2,
            AdjustmentKind::Lighten => 3,
            AdjustmentKind::Darken => 4,
            AdjustmentKind::Brighten => 5,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            AdjustmentKind::Spin => "spin",
            AdjustmentKind::Saturate => "saturate",
            AdjustmentKind::Desaturate => "desaturate",
            AdjustmentKind::Lighten => "lighten",
            AdjustmentKind::Darken => "darken",
            AdjustmentKind::Brighten => "brighten",
        }
    }
}

impl fmt::Display for AdjustmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AdjustmentKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("unknown adjustment '{s}'"))
    }
}

/// Per-kind baseline colors. At most one entry is set at a time.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AdjustmentBuffer {
    baselines: [Option<String>; AdjustmentKind::COUNT],
}

impl AdjustmentBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Baseline currently held for `kind`.
    pub fn baseline(&self, kind: AdjustmentKind) -> Option<&str> {
        self.baselines[kind.index()].as_deref()
    }

    /// The kind whose baseline is held, if any.
    pub fn active_kind(&self) -> Option<AdjustmentKind> {
        AdjustmentKind::ALL
            .into_iter()
            .find(|kind| self.baselines[kind.index()].is_some())
    }

    /// Return the baseline for `kind`, capturing `current` if none is held,
    /// and drop every other kind's baseline.
    pub fn capture(&mut self, kind: AdjustmentKind, current: &str) -> &str {
        self.clear_all_except(kind);
        self.baselines[kind.index()].get_or_insert_with(|| {
            log::debug!("Captured {} baseline {}", kind, current);
            current.to_string()
        })
        .as_str()
    }

    pub fn clear_all_except(&mut self, kind: AdjustmentKind) {
        for other in AdjustmentKind::ALL {
            if other != kind {
                self.baselines[other.index()] = None;
            }
        }
    }

    pub fn clear(&mut self) {
        self.baselines = Default::default();
    }

    pub fn is_empty(&self) -> bool {
        self.baselines.iter().all(Option::is_none)
    }
}

/// Current slider positions, neutral at 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SliderValues {
    values: [i32; AdjustmentKind::COUNT],
}

impl SliderValues {
    pub const NEUTRAL: i32 = 0;

    pub fn get(&self, kind: AdjustmentKind) -> i32 {
        self.values[kind.index()]
    }

    pub fn set(&mut self, kind: AdjustmentKind, value: i32) {
        self.values[kind.index()] = value;
    }

    pub fn reset(&mut self) {
        self.values = [Self::NEUTRAL; AdjustmentKind::COUNT];
    }

    pub fn is_neutral(&self) -> bool {
        self.values.iter().all(|&v| v == Self::NEUTRAL)
    }
}

/// Coerce a float slider reading to an integer, truncating toward zero.
/// Non-finite readings become neutral.
pub fn coerce_slider_value(value: f64) -> i32 {
    if value.is_finite() {
        value.trunc().clamp(i32::MIN as f64, i32::MAX as f64) as i32
    } else {
        SliderValues::NEUTRAL
    }
}

/// Coerce raw slider text. Anything non-numeric becomes neutral.
pub fn coerce_slider_input(raw: &str) -> i32 {
    raw.trim()
        .parse::<f64>()
        .map(coerce_slider_value)
        .unwrap_or(SliderValues::NEUTRAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_keeps_first_baseline() {
        let mut buffer = AdjustmentBuffer::new();
        assert_eq!(buffer.capture(AdjustmentKind::Lighten, "#088da5"), "#088da5");
        assert_eq!(buffer.capture(AdjustmentKind::Lighten, "#1fd4f4"), "#088da5");
        assert_eq!(buffer.active_kind(), Some(AdjustmentKind::Lighten));
    }

    #[test]
    fn test_capture_clears_other_kinds() {
        let mut buffer = AdjustmentBuffer::new();
        buffer.capture(AdjustmentKind::Darken, "#088da5");
        buffer.capture(AdjustmentKind::Lighten, "#05505e");

        assert_eq!(buffer.baseline(AdjustmentKind::Darken), None);
        assert_eq!(buffer.baseline(AdjustmentKind::Lighten), Some("#05505e"));

        // Returning to darken starts from the current color again.
        assert_eq!(buffer.capture(AdjustmentKind::Darken, "#ffffff"), "#ffffff");
        assert_eq!(buffer.baseline(AdjustmentKind::Lighten), None);
    }

    #[test]
    fn test_at_most_one_baseline() {
        let mut buffer = AdjustmentBuffer::new();
        for (i, kind) in AdjustmentKind::ALL.into_iter().enumerate() {
            buffer.capture(kind, &format!("#00000{i}"));
            let held = AdjustmentKind::ALL
                .into_iter()
                .filter(|k| buffer.baseline(*k).is_some())
                .count();
            assert_eq!(held, 1);
        }
    }

    #[test]
    fn test_clear() {
        let mut buffer = AdjustmentBuffer::new();
        buffer.capture(AdjustmentKind::Spin, "#088da5");
        buffer.clear();
        assert!(buffer.is_empty());
        assert_eq!(buffer.active_kind(), None);
    }

    #[test]
    fn test_slider_values() {
        let mut sliders = SliderValues::default();
        assert!(sliders.is_neutral());
        sliders.set(AdjustmentKind::Brighten, 15);
        assert_eq!(sliders.get(AdjustmentKind::Brighten), 15);
        assert!(!sliders.is_neutral());
        sliders.reset();
        assert!(sliders.is_neutral());
    }

    #[test]
    fn test_coerce_slider_input() {
        assert_eq!(coerce_slider_input("20"), 20);
        assert_eq!(coerce_slider_input(" 12.9 "), 12);
        assert_eq!(coerce_slider_input("-7.5"), -7);
        assert_eq!(coerce_slider_input("abc"), 0);
        assert_eq!(coerce_slider_input(""), 0);
        assert_eq!(coerce_slider_input("NaN"), 0);
        assert_eq!(coerce_slider_value(f64::INFINITY), 0);
    }

    #[test]
    fn test_kind_from_str() {
        assert_eq!("Lighten".parse::<AdjustmentKind>(), Ok(AdjustmentKind::Lighten));
        assert!("blur".parse::<AdjustmentKind>().is_err());
    }
}
