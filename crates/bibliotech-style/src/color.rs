#![forbid(unsafe_code)]

//! Color types and CSS serialization.

use std::fmt;
use std::str::FromStr;

/// An opaque sRGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);

    /// Create a color from channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a color from a packed `0xRRGGBB` value.
    #[inline]
    pub const fn from_hex(hex: u32) -> Self {
        Self::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8)
    }

    /// Interpolate toward `other`; `t` is clamped to `[0, 1]`.
    #[must_use]
    pub fn lerp(self, other: Rgb, t: f64) -> Rgb {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Rgb::new(mix(self.r, other.r), mix(self.g, other.g), mix(self.b, other.b))
    }

    /// Mix toward black by `amount` (`0` = unchanged, `1` = black).
    #[must_use]
    pub fn darken(self, amount: f64) -> Rgb {
        self.lerp(Rgb::BLACK, amount)
    }

    /// Mix toward white by `amount`.
    #[must_use]
    pub fn lighten(self, amount: f64) -> Rgb {
        self.lerp(Rgb::WHITE, amount)
    }

    /// `#rrggbb` notation.
    #[must_use]
    pub fn to_css(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `rgba(r, g, b, a)` notation with `alpha` clamped to `[0, 1]`.
    #[must_use]
    pub fn to_css_alpha(self, alpha: f64) -> String {
        let alpha = if alpha.is_nan() { 1.0 } else { alpha.clamp(0.0, 1.0) };
        format!("rgba({}, {}, {}, {})", self.r, self.g, self.b, trim_float(alpha))
    }

    /// WCAG relative luminance in `[0, 1]`.
    #[must_use]
    pub fn relative_luminance(self) -> f64 {
        fn channel(c: u8) -> f64 {
            let c = f64::from(c) / 255.0;
            if c <= 0.03928 {
                c / 12.92
            } else {
                ((c + 0.055) / 1.055).powf(2.4)
            }
        }
        0.2126 * channel(self.r) + 0.7152 * channel(self.g) + 0.0722 * channel(self.b)
    }
}

/// WCAG contrast ratio between two colors, in `[1, 21]`.
#[must_use]
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let (la, lb) = (a.relative_luminance(), b.relative_luminance());
    let (hi, lo) = if la >= lb { (la, lb) } else { (lb, la) };
    (hi + 0.05) / (lo + 0.05)
}

/// Pick white or black text, whichever contrasts more with `background`.
#[must_use]
pub fn best_text_color(background: Rgb) -> Rgb {
    if contrast_ratio(background, Rgb::WHITE) >= contrast_ratio(background, Rgb::BLACK) {
        Rgb::WHITE
    } else {
        Rgb::BLACK
    }
}

/// Format a float for CSS without trailing zeros (`0.5`, `1`, `0.25`).
pub(crate) fn trim_float(v: f64) -> String {
    let s = format!("{v:.3}");
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s.is_empty() || s == "-" {
        "0".to_string()
    } else {
        s.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// Error returned when a color string is not `#rgb` or `#rrggbb`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid color {:?} (expected #rgb or #rrggbb)", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl FromStr for Rgb {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseColorError(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(err)?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(err());
        }
        match hex.len() {
            3 => {
                let v = u32::from_str_radix(hex, 16).map_err(|_| err())?;
                let expand = |n: u32| ((n & 0xF) * 17) as u8;
                Ok(Rgb::new(expand(v >> 8), expand(v >> 4), expand(v)))
            }
            6 => u32::from_str_radix(hex, 16)
                .map(Rgb::from_hex)
                .map_err(|_| err()),
            _ => Err(err()),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Rgb {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_css())
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for Rgb {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_round_trip() {
        let c = Rgb::from_hex(0x2563eb);
        assert_eq!(c, Rgb::new(0x25, 0x63, 0xeb));
        assert_eq!(c.to_css(), "#2563eb");
        assert_eq!("#2563EB".parse::<Rgb>(), Ok(c));
    }

    #[test]
    fn short_hex_expands() {
        assert_eq!("#fff".parse::<Rgb>(), Ok(Rgb::WHITE));
        assert_eq!("#0a0".parse::<Rgb>(), Ok(Rgb::new(0, 0xaa, 0)));
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["2563eb", "#12", "#gggggg", "#12345678", "", "#+12345"] {
            assert!(bad.parse::<Rgb>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn lerp_endpoints_and_midpoint() {
        let a = Rgb::new(0, 0, 0);
        let b = Rgb::new(200, 100, 50);
        assert_eq!(a.lerp(b, 0.0), a);
        assert_eq!(a.lerp(b, 1.0), b);
        assert_eq!(a.lerp(b, 0.5), Rgb::new(100, 50, 25));
        assert_eq!(a.lerp(b, 9.0), b);
    }

    #[test]
    fn rgba_css() {
        assert_eq!(Rgb::new(1, 2, 3).to_css_alpha(0.5), "rgba(1, 2, 3, 0.5)");
        assert_eq!(Rgb::new(1, 2, 3).to_css_alpha(2.0), "rgba(1, 2, 3, 1)");
    }

    #[test]
    fn trim_float_formats() {
        assert_eq!(trim_float(1.0), "1");
        assert_eq!(trim_float(0.25), "0.25");
        assert_eq!(trim_float(0.0), "0");
        assert_eq!(trim_float(12.5), "12.5");
    }

    #[test]
    fn contrast_extremes() {
        assert!((contrast_ratio(Rgb::WHITE, Rgb::BLACK) - 21.0).abs() < 0.01);
        assert!((contrast_ratio(Rgb::WHITE, Rgb::WHITE) - 1.0).abs() < 1e-9);
    }

    #[test]
    fn best_text_on_dark_and_light() {
        assert_eq!(best_text_color(Rgb::from_hex(0x1e3a8a)), Rgb::WHITE);
        assert_eq!(best_text_color(Rgb::from_hex(0xfef3c7)), Rgb::BLACK);
    }

    #[test]
    fn display_matches_css() {
        assert_eq!(Rgb::new(255, 0, 16).to_string(), "#ff0010");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn serde_uses_css_hex() {
        let json = serde_json::to_string(&Rgb::from_hex(0x2563eb)).unwrap();
        assert_eq!(json, "\"#2563eb\"");
        assert!(serde_json::from_str::<Rgb>("\"blue\"").is_err());
    }
}
