//! Color values and format conversions.
//!
//! A [`ColorValue`] is only ever built from input that parsed successfully,
//! so holding one means holding a valid color. Channel math is kept in
//! floating point and rounded only when a display string is produced.

use crate::error::{PickerError, PickerResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// RGB channels in the 0-255 range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: f64,
    pub g: f64,
    pub b: f64,
}

/// HSL components. Hue in degrees (0-360), saturation and lightness 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

/// HSV components. Hue in degrees (0-360), saturation and value 0-1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hsv {
    pub h: f64,
    pub s: f64,
    pub v: f64,
}

impl Rgb {
    pub const fn new(r: f64, g: f64, b: f64) -> Self {
        Self { r, g, b }
    }

    /// Clamp every channel into 0-255.
    pub fn clamped(self) -> Self {
        Self {
            r: self.r.clamp(0.0, 255.0),
            g: self.g.clamp(0.0, 255.0),
            b: self.b.clamp(0.0, 255.0),
        }
    }

    /// Channels rounded to bytes.
    pub fn to_bytes(self) -> [u8; 3] {
        let c = self.clamped();
        [c.r.round() as u8, c.g.round() as u8, c.b.round() as u8]
    }

    pub fn to_hsl(self) -> Hsl {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let l = (max + min) / 2.0;

        if max == min {
            return Hsl { h: 0.0, s: 0.0, l };
        }

        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };
        Hsl {
            h: hue_from_rgb(r, g, b, max, d),
            s,
            l,
        }
    }

    pub fn to_hsv(self) -> Hsv {
        let r = self.r / 255.0;
        let g = self.g / 255.0;
        let b = self.b / 255.0;
        let max = r.max(g).max(b);
        let min = r.min(g).min(b);
        let d = max - min;
        let s = if max == 0.0 { 0.0 } else { d / max };

        let h = if d == 0.0 {
            0.0
        } else {
            hue_from_rgb(r, g, b, max, d)
        };
        Hsv { h, s, v: max }
    }
}

/// Hue in degrees for normalized channels with a non-zero chroma `d`.
fn hue_from_rgb(r: f64, g: f64, b: f64, max: f64, d: f64) -> f64 {
    let sector = if max == r {
        (g - b) / d + if g < b { 6.0 } else { 0.0 }
    } else if max == g {
        (b - r) / d + 2.0
    } else {
        (r - g) / d + 4.0
    };
    sector * 60.0
}

impl Hsl {
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0) / 360.0;
        let s = self.s.clamp(0.0, 1.0);
        let l = self.l.clamp(0.0, 1.0);

        if s == 0.0 {
            let v = l * 255.0;
            return Rgb::new(v, v, v);
        }

        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        Rgb::new(
            hue_to_channel(p, q, h + 1.0 / 3.0) * 255.0,
            hue_to_channel(p, q, h) * 255.0,
            hue_to_channel(p, q, h - 1.0 / 3.0) * 255.0,
        )
    }
}

fn hue_to_channel(p: f64, q: f64, t: f64) -> f64 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

impl Hsv {
    pub fn to_rgb(self) -> Rgb {
        let h = self.h.rem_euclid(360.0) / 60.0;
        let s = self.s.clamp(0.0, 1.0);
        let v = self.v.clamp(0.0, 1.0);

        let sector = h.floor();
        let f = h - sector;
        let p = v * (1.0 - s);
        let q = v * (1.0 - f * s);
        let t = v * (1.0 - (1.0 - f) * s);

        let (r, g, b) = match sector as i32 % 6 {
            0 => (v, t, p),
            1 => (q, v, p),
            2 => (p, v, t),
            3 => (p, q, v),
            4 => (t, p, v),
            _ => (v, p, q),
        };
        Rgb::new(r * 255.0, g * 255.0, b * 255.0)
    }
}

/// Display formats offered by the picker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    Hex,
    Rgb,
    #[default]
    Hsl,
    Hsv,
}

impl ColorFormat {
    /// Formats in selector order.
    pub const ALL: [ColorFormat; 4] = [
        ColorFormat::Hsl,
        ColorFormat::Hsv,
        ColorFormat::Rgb,
        ColorFormat::Hex,
    ];

    /// Upper-case label (e.g., "HSL").
    pub fn label(&self) -> &'static str {
        match self {
            ColorFormat::Hex => "HEX",
            ColorFormat::Rgb => "RGB",
            ColorFormat::Hsl => "HSL",
            ColorFormat::Hsv => "HSV",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ColorFormat {
    type Err = PickerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "hex" => Ok(ColorFormat::Hex),
            "rgb" => Ok(ColorFormat::Rgb),
            "hsl" => Ok(ColorFormat::Hsl),
            "hsv" => Ok(ColorFormat::Hsv),
            other => Err(PickerError::InvalidColor(format!("unknown format '{other}'"))),
        }
    }
}

/// A parsed, valid color.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorValue {
    /// The literal string this value was built from.
    original_input: String,
    rgb: Rgb,
    alpha: f64,
}

impl ColorValue {
    /// Parse a color string. Returns `None` for anything unrecognized.
    pub fn parse(input: &str) -> Option<Self> {
        let (rgb, alpha) = parse_color(input)?;
        Some(Self {
            original_input: input.to_string(),
            rgb: rgb.clamped(),
            alpha: alpha.clamp(0.0, 1.0),
        })
    }

    /// Parse a color string, reporting the rejected input as an error.
    pub fn parse_strict(input: &str) -> PickerResult<Self> {
        Self::parse(input).ok_or_else(|| PickerError::InvalidColor(input.to_string()))
    }

    /// Build from channels. The original input becomes the canonical string
    /// form: hex when opaque, `rgba(...)` otherwise.
    pub fn from_rgb(rgb: Rgb, alpha: f64) -> Self {
        let mut value = Self {
            original_input: String::new(),
            rgb: rgb.clamped(),
            alpha: alpha.clamp(0.0, 1.0),
        };
        value.original_input = if value.is_opaque() {
            value.to_hex_string()
        } else {
            value.to_rgb_string()
        };
        value
    }

    pub fn from_hsl(hsl: Hsl, alpha: f64) -> Self {
        Self::from_rgb(hsl.to_rgb(), alpha)
    }

    pub fn from_hsv(hsv: Hsv, alpha: f64) -> Self {
        Self::from_rgb(hsv.to_rgb(), alpha)
    }

    pub fn original_input(&self) -> &str {
        &self.original_input
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha >= 1.0
    }

    pub fn to_hsl(&self) -> Hsl {
        self.rgb.to_hsl()
    }

    pub fn to_hsv(&self) -> Hsv {
        self.rgb.to_hsv()
    }

    /// Six-digit lower-case hex (alpha is not encoded).
    pub fn to_hex_string(&self) -> String {
        let [r, g, b] = self.rgb.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    pub fn to_rgb_string(&self) -> String {
        let [r, g, b] = self.rgb.to_bytes();
        if self.is_opaque() {
            format!("rgb({r}, {g}, {b})")
        } else {
            format!("rgba({r}, {g}, {b}, {})", round_alpha(self.alpha))
        }
    }

    pub fn to_hsl_string(&self) -> String {
        let hsl = self.to_hsl();
        let (h, s, l) = (
            (hsl.h.round() as i64).rem_euclid(360),
            (hsl.s * 100.0).round() as i64,
            (hsl.l * 100.0).round() as i64,
        );
        if self.is_opaque() {
            format!("hsl({h}, {s}%, {l}%)")
        } else {
            format!("hsla({h}, {s}%, {l}%, {})", round_alpha(self.alpha))
        }
    }

    pub fn to_hsv_string(&self) -> String {
        let hsv = self.to_hsv();
        let (h, s, v) = (
            (hsv.h.round() as i64).rem_euclid(360),
            (hsv.s * 100.0).round() as i64,
            (hsv.v * 100.0).round() as i64,
        );
        if self.is_opaque() {
            format!("hsv({h}, {s}%, {v}%)")
        } else {
            format!("hsva({h}, {s}%, {v}%, {})", round_alpha(self.alpha))
        }
    }

    pub fn to_format(&self, format: ColorFormat) -> String {
        match format {
            ColorFormat::Hex => self.to_hex_string(),
            ColorFormat::Rgb => self.to_rgb_string(),
            ColorFormat::Hsl => self.to_hsl_string(),
            ColorFormat::Hsv => self.to_hsv_string(),
        }
    }
}

fn round_alpha(alpha: f64) -> f64 {
    (alpha * 100.0).round() / 100.0
}

const NAMED_COLORS: &[(&str, [u8; 3])] = &[
    ("black", [0, 0, 0]),
    ("white", [255, 255, 255]),
    ("red", [255, 0, 0]),
    ("green", [0, 128, 0]),
    ("lime", [0, 255, 0]),
    ("blue", [0, 0, 255]),
    ("yellow", [255, 255, 0]),
    ("cyan", [0, 255, 255]),
    ("aqua", [0, 255, 255]),
    ("magenta", [255, 0, 255]),
    ("fuchsia", [255, 0, 255]),
    ("gray", [128, 128, 128]),
    ("grey", [128, 128, 128]),
    ("silver", [192, 192, 192]),
    ("maroon", [128, 0, 0]),
    ("navy", [0, 0, 128]),
    ("olive", [128, 128, 0]),
    ("purple", [128, 0, 128]),
    ("teal", [0, 128, 128]),
    ("orange", [255, 165, 0]),
    ("pink", [255, 192, 203]),
    ("mistyrose", [255, 228, 225]),
    ("turquoise", [64, 224, 208]),
];

fn parse_color(input: &str) -> Option<(Rgb, f64)> {
    let text = input.trim().to_lowercase();
    if text.is_empty() {
        return None;
    }

    if text == "transparent" {
        return Some((Rgb::new(0.0, 0.0, 0.0), 0.0));
    }

    if let Some((_, [r, g, b])) = NAMED_COLORS.iter().find(|(name, _)| *name == text) {
        return Some((Rgb::new(*r as f64, *g as f64, *b as f64), 1.0));
    }

    if let Some(open) = text.find('(') {
        return parse_functional(&text[..open], &text[open + 1..]);
    }

    parse_hex(text.strip_prefix('#').unwrap_or(text.as_str()))
}

fn parse_hex(digits: &str) -> Option<(Rgb, f64)> {
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    let expanded: String = match digits.len() {
        3 | 4 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 | 8 => digits.to_string(),
        _ => return None,
    };

    let byte = |i: usize| u8::from_str_radix(&expanded[i..i + 2], 16).ok();
    let rgb = Rgb::new(byte(0)? as f64, byte(2)? as f64, byte(4)? as f64);
    let alpha = if expanded.len() == 8 {
        byte(6)? as f64 / 255.0
    } else {
        1.0
    };
    Some((rgb, alpha))
}

/// A numeric token and whether it carried a `%` suffix.
fn parse_number(token: &str) -> Option<(f64, bool)> {
    let (digits, percent) = match token.strip_suffix('%') {
        Some(rest) => (rest, true),
        None => (token.strip_suffix("deg").unwrap_or(token), false),
    };
    let value: f64 = digits.trim().parse().ok()?;
    value.is_finite().then_some((value, percent))
}

/// Fractions up to 1 are taken as-is; larger bare numbers are percents.
fn unit_fraction((value, percent): (f64, bool)) -> f64 {
    if percent || value > 1.0 {
        value / 100.0
    } else {
        value
    }
}

fn parse_functional(name: &str, rest: &str) -> Option<(Rgb, f64)> {
    let body = rest.strip_suffix(')')?;
    let tokens: Vec<(f64, bool)> = body
        .split(|c: char| c == ',' || c == '/' || c.is_whitespace())
        .filter(|t| !t.is_empty())
        .map(parse_number)
        .collect::<Option<_>>()?;

    let alpha = match tokens.len() {
        3 => 1.0,
        4 => {
            let (a, percent) = tokens[3];
            if percent { a / 100.0 } else { a }
        }
        _ => return None,
    };

    let rgb = match name.trim() {
        "rgb" | "rgba" => {
            let channel = |(v, percent): (f64, bool)| if percent { v * 2.55 } else { v };
            Rgb::new(channel(tokens[0]), channel(tokens[1]), channel(tokens[2]))
        }
        "hsl" | "hsla" => Hsl {
            h: tokens[0].0,
            s: unit_fraction(tokens[1]),
            l: unit_fraction(tokens[2]),
        }
        .to_rgb(),
        "hsv" | "hsva" | "hsb" => Hsv {
            h: tokens[0].0,
            s: unit_fraction(tokens[1]),
            v: unit_fraction(tokens[2]),
        }
        .to_rgb(),
        _ => return None,
    };

    Some((rgb, alpha.clamp(0.0, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        let long = ColorValue::parse("#088da5").unwrap();
        assert_eq!(long.to_hex_string(), "#088da5");
        assert_eq!(long.original_input(), "#088da5");

        let short = ColorValue::parse("#fff").unwrap();
        assert_eq!(short.to_hex_string(), "#ffffff");

        let bare = ColorValue::parse("088DA5").unwrap();
        assert_eq!(bare.to_hex_string(), "#088da5");
        assert_eq!(bare.original_input(), "088DA5");

        let with_alpha = ColorValue::parse("#ff000080").unwrap();
        assert!((with_alpha.alpha() - 128.0 / 255.0).abs() < 1e-9);
    }

    #[test]
    fn test_parse_functional_forms() {
        let rgb = ColorValue::parse("rgb(8, 141, 165)").unwrap();
        assert_eq!(rgb.to_hex_string(), "#088da5");

        let hsl = ColorValue::parse("hsl(0, 100%, 50%)").unwrap();
        assert_eq!(hsl.to_hex_string(), "#ff0000");

        let hsv = ColorValue::parse("hsv(120, 100%, 100%)").unwrap();
        assert_eq!(hsv.to_hex_string(), "#00ff00");

        let rgba = ColorValue::parse("rgba(0, 0, 255, 0.5)").unwrap();
        assert_eq!(rgba.to_rgb_string(), "rgba(0, 0, 255, 0.5)");
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(ColorValue::parse("Mistyrose").unwrap().to_hex_string(), "#ffe4e1");
        assert_eq!(ColorValue::parse("transparent").unwrap().alpha(), 0.0);
    }

    #[test]
    fn test_rejects_invalid() {
        for input in [
            "",
            "   ",
            "#12",
            "#ggg",
            "notacolor",
            "rgb(1, 2)",
            "hsl(a, b, c)",
            "rgb(1, 2, 3",
        ] {
            assert!(ColorValue::parse(input).is_none(), "accepted {input:?}");
        }
        assert!(matches!(
            ColorValue::parse_strict("nope"),
            Err(PickerError::InvalidColor(_))
        ));
    }

    #[test]
    fn test_format_strings() {
        let color = ColorValue::parse("#088da5").unwrap();
        assert_eq!(color.to_format(ColorFormat::Hex), "#088da5");
        assert_eq!(color.to_format(ColorFormat::Rgb), "rgb(8, 141, 165)");
        assert_eq!(color.to_format(ColorFormat::Hsl), "hsl(189, 91%, 34%)");
        assert_eq!(color.to_format(ColorFormat::Hsv), "hsv(189, 95%, 65%)");
    }

    #[test]
    fn test_hsl_round_trip_exact() {
        let color = ColorValue::parse("#088da5").unwrap();
        let back = ColorValue::from_hsl(color.to_hsl(), color.alpha());
        assert_eq!(back.to_hex_string(), "#088da5");

        let back = ColorValue::from_hsv(color.to_hsv(), color.alpha());
        assert_eq!(back.to_hex_string(), "#088da5");
    }

    #[test]
    fn test_hsl_string_round_trip_within_precision() {
        let color = ColorValue::parse("#088da5").unwrap();
        let back = ColorValue::parse(&color.to_hsl_string()).unwrap();
        let [r1, g1, b1] = color.rgb().to_bytes();
        let [r2, g2, b2] = back.rgb().to_bytes();
        assert!((r1 as i32 - r2 as i32).abs() <= 2);
        assert!((g1 as i32 - g2 as i32).abs() <= 2);
        assert!((b1 as i32 - b2 as i32).abs() <= 2);
    }

    #[test]
    fn test_from_rgb_canonical_input() {
        let opaque = ColorValue::from_rgb(Rgb::new(255.0, 0.0, 0.0), 1.0);
        assert_eq!(opaque.original_input(), "#ff0000");

        let translucent = ColorValue::from_rgb(Rgb::new(255.0, 0.0, 0.0), 0.25);
        assert_eq!(translucent.original_input(), "rgba(255, 0, 0, 0.25)");
        let reparsed = ColorValue::parse(translucent.original_input()).unwrap();
        assert!((reparsed.alpha() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn test_gray_has_zero_saturation() {
        let hsl = Rgb::new(128.0, 128.0, 128.0).to_hsl();
        assert_eq!(hsl.s, 0.0);
        assert_eq!(hsl.h, 0.0);
    }

    #[test]
    fn test_format_from_str() {
        assert_eq!("HEX".parse::<ColorFormat>().unwrap(), ColorFormat::Hex);
        assert_eq!(" hsv ".parse::<ColorFormat>().unwrap(), ColorFormat::Hsv);
        assert!("cmyk".parse::<ColorFormat>().is_err());
        assert_eq!(ColorFormat::default(), ColorFormat::Hsl);
        assert_eq!(ColorFormat::ALL[0].to_string(), "HSL");
    }

    #[test]
    fn test_hue_near_full_turn_prints_as_zero() {
        let color = ColorValue::parse("#ff0001").unwrap();
        assert!(color.to_hsl().h > 359.5);
        assert_eq!(color.to_hsl_string(), "hsl(0, 100%, 50%)");
        assert_eq!(color.to_hsv_string(), "hsv(0, 100%, 100%)");
    }
}
