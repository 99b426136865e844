//! Color math collaborator: parsing, formatting and channel adjustments.

use crate::adjust::AdjustmentKind;
use crate::color::{ColorFormat, ColorValue, Rgb};

/// Parse, format and adjust colors.
///
/// The engine never does channel math itself; it goes through this trait so
/// hosts can swap in a different color library.
pub trait ColorMath {
    /// Parse a color string, `None` if it is not a color.
    fn parse(&self, input: &str) -> Option<ColorValue>;

    /// Render a color in the given format.
    fn to_format(&self, color: &ColorValue, format: ColorFormat) -> String;

    /// Apply one adjustment of `amount` (degrees for spin, percent otherwise).
    fn adjust(&self, color: &ColorValue, kind: AdjustmentKind, amount: f64) -> ColorValue;
}

/// Default color math on sRGB with HSL-space adjustments.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardColorMath;

impl ColorMath for StandardColorMath {
    fn parse(&self, input: &str) -> Option<ColorValue> {
        ColorValue::parse(input)
    }

    fn to_format(&self, color: &ColorValue, format: ColorFormat) -> String {
        color.to_format(format)
    }

    fn adjust(&self, color: &ColorValue, kind: AdjustmentKind, amount: f64) -> ColorValue {
        let alpha = color.alpha();
        let mut hsl = color.to_hsl();
        let fraction = amount / 100.0;

        match kind {
            AdjustmentKind::Spin => hsl.h = (hsl.h + amount).rem_euclid(360.0),
            AdjustmentKind::Saturate => hsl.s = (hsl.s + fraction).clamp(0.0, 1.0),
            AdjustmentKind::Desaturate => hsl.s = (hsl.s - fraction).clamp(0.0, 1.0),
            AdjustmentKind::Lighten => hsl.l = (hsl.l + fraction).clamp(0.0, 1.0),
            AdjustmentKind::Darken => hsl.l = (hsl.l - fraction).clamp(0.0, 1.0),
            AdjustmentKind::Brighten => {
                let step = (255.0 * fraction).round();
                let rgb = color.rgb();
                return ColorValue::from_rgb(
                    Rgb::new(rgb.r + step, rgb.g + step, rgb.b + step),
                    alpha,
                );
            }
        }

        ColorValue::from_hsl(hsl, alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn adjust_hex(input: &str, kind: AdjustmentKind, amount: f64) -> String {
        let math = StandardColorMath;
        let color = math.parse(input).unwrap();
        math.to_format(&math.adjust(&color, kind, amount), ColorFormat::Hex)
    }

    #[test]
    fn test_lighten() {
        assert_eq!(adjust_hex("#088da5", AdjustmentKind::Lighten, 20.0), "#1fd4f4");
        assert_eq!(adjust_hex("#088da5", AdjustmentKind::Lighten, 10.0), "#0ab7d6");
        assert_eq!(adjust_hex("#088da5", AdjustmentKind::Lighten, 100.0), "#ffffff");
    }

    #[test]
    fn test_darken_clamps() {
        assert_eq!(adjust_hex("#088da5", AdjustmentKind::Darken, 100.0), "#000000");
    }

    #[test]
    fn test_spin() {
        assert_eq!(adjust_hex("#088da5", AdjustmentKind::Spin, 180.0), "#a52008");
        assert_eq!(adjust_hex("#088da5", AdjustmentKind::Spin, -180.0), "#a52008");
        assert_eq!(adjust_hex("#088da5", AdjustmentKind::Spin, 360.0), "#088da5");
    }

    #[test]
    fn test_desaturate_to_gray() {
        let math = StandardColorMath;
        let color = math.parse("#088da5").unwrap();
        let [r, g, b] = math
            .adjust(&color, AdjustmentKind::Desaturate, 100.0)
            .rgb()
            .to_bytes();
        assert_eq!(r, g);
        assert_eq!(g, b);
        assert!((86..=87).contains(&r));
    }

    #[test]
    fn test_brighten() {
        assert_eq!(adjust_hex("#088da5", AdjustmentKind::Brighten, 10.0), "#22a7bf");
        assert_eq!(adjust_hex("#ffffff", AdjustmentKind::Brighten, 50.0), "#ffffff");
        assert_eq!(adjust_hex("#088da5", AdjustmentKind::Brighten, -100.0), "#000000");
    }

    #[test]
    fn test_zero_amount_is_identity() {
        for kind in AdjustmentKind::ALL {
            assert_eq!(adjust_hex("#088da5", kind, 0.0), "#088da5", "{kind}");
        }
    }

    #[test]
    fn test_adjust_keeps_alpha() {
        let math = StandardColorMath;
        let color = math.parse("rgba(8, 141, 165, 0.5)").unwrap();
        let adjusted = math.adjust(&color, AdjustmentKind::Lighten, 10.0);
        assert!((adjusted.alpha() - 0.5).abs() < f64::EPSILON);
    }
}
