use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// A 24-bit RGB color that always renders as `#rrggbb`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct HexColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseColorError(pub String);

impl fmt::Display for ParseColorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid hex color: {:?}", self.0)
    }
}

impl std::error::Error for ParseColorError {}

impl HexColor {
    pub const BLACK: HexColor = HexColor::new(0x00, 0x00, 0x00);
    pub const WHITE: HexColor = HexColor::new(0xff, 0xff, 0xff);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` (the leading `#` is optional, digits are case-insensitive).
    pub fn parse(s: &str) -> Option<Self> {
        let hex = s.trim();
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    pub fn is_black(self) -> bool {
        self == Self::BLACK
    }

    /// Linear interpolation per channel: `round(a + (b - a) * t)`.
    ///
    /// `t` is clamped to `[0, 1]`, so `t = 0` is exactly `self` and `t = 1`
    /// is exactly `other`.
    pub fn mix(self, other: HexColor, t: f64) -> HexColor {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        HexColor::new(
            mix_channel(self.r, other.r, t),
            mix_channel(self.g, other.g, t),
            mix_channel(self.b, other.b, t),
        )
    }

    /// Composite `self` with the given alpha over an opaque `base`.
    pub fn blend_over(self, base: HexColor, alpha: u8) -> HexColor {
        base.mix(self, f64::from(alpha) / 255.0)
    }

    /// Relative luminance in `[0, 1]`, good enough to pick a readable text color.
    pub fn luminance(self) -> f64 {
        (0.2126 * f64::from(self.r) + 0.7152 * f64::from(self.g) + 0.0722 * f64::from(self.b))
            / 255.0
    }
}

fn mix_channel(a: u8, b: u8, t: f64) -> u8 {
    let a = f64::from(a);
    let b = f64::from(b);
    (a + (b - a) * t).round().clamp(0.0, 255.0) as u8
}

impl fmt::Display for HexColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for HexColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| ParseColorError(s.to_string()))
    }
}

impl TryFrom<String> for HexColor {
    type Error = ParseColorError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<HexColor> for String {
    fn from(value: HexColor) -> Self {
        value.to_hex()
    }
}

impl From<HexColor> for ratatui::style::Color {
    fn from(value: HexColor) -> Self {
        ratatui::style::Color::Rgb(value.r, value.g, value.b)
    }
}

/// The two endpoints of the background gradient, serialized as `["#..", "#.."]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GradientPair(pub HexColor, pub HexColor);

impl Default for GradientPair {
    fn default() -> Self {
        Self(Self::DEFAULT_START, Self::DEFAULT_END)
    }
}

impl GradientPair {
    pub const DEFAULT_START: HexColor = HexColor::new(0xff, 0x5f, 0x6d);
    pub const DEFAULT_END: HexColor = HexColor::new(0xff, 0xc3, 0x71);

    pub fn new(start: HexColor, end: HexColor) -> Self {
        Self(start, end)
    }

    /// Build a pair from color-picker values. An unset picker reports pure
    /// black, which is replaced by the default for that slot.
    pub fn from_picker(start: HexColor, end: HexColor) -> Self {
        let start = if start.is_black() {
            Self::DEFAULT_START
        } else {
            start
        };
        let end = if end.is_black() {
            Self::DEFAULT_END
        } else {
            end
        };
        Self(start, end)
    }

    pub fn start(&self) -> HexColor {
        self.0
    }

    pub fn end(&self) -> HexColor {
        self.1
    }

    pub fn swapped(self) -> Self {
        Self(self.1, self.0)
    }

    /// Interpolate both endpoints independently towards `to`.
    pub fn mix(self, to: GradientPair, t: f64) -> Self {
        Self(self.0.mix(to.0, t), self.1.mix(to.1, t))
    }

    /// Color at horizontal position `t` of a left-to-right gradient.
    pub fn at(&self, t: f64) -> HexColor {
        self.0.mix(self.1, t)
    }

    /// Parse a persisted `bgColors` blob. Anything other than an array of
    /// exactly two well-formed colors is rejected.
    pub fn from_json(json: &str) -> Option<Self> {
        let values: Vec<String> = serde_json::from_str(json).ok()?;
        match values.as_slice() {
            [start, end] => Some(Self(HexColor::parse(start)?, HexColor::parse(end)?)),
            _ => None,
        }
    }
}
