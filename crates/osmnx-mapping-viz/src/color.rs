use std::str::FromStr;

use crate::error::VizError;

/// 8-bit sRGB color with alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(0xff, 0xff, 0xff);
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// matplotlib's `gray`
    pub const GRAY: Color = Color::rgb(0x80, 0x80, 0x80);
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Linear interpolation in sRGB space, `t` in `[0, 1]`.
    pub fn lerp(self, other: Color, t: f64) -> Color {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * t).round() as u8;
        Color {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }

    /// Relative luminance in `[0, 1]` (Rec. 709 weights, no gamma correction).
    pub fn luminance(&self) -> f64 {
        (0.2126 * self.r as f64 + 0.7152 * self.g as f64 + 0.0722 * self.b as f64) / 255.0
    }

    /// `#rrggbb`, or `#rrggbbaa` when not opaque.
    pub fn to_hex(&self) -> String {
        if self.a == 0xff {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
        }
    }

    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    pub(crate) fn to_tiny_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Color {
    type Err = VizError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let s = text.trim().to_ascii_lowercase();
        match s.as_str() {
            "none" | "transparent" => return Ok(Color::TRANSPARENT),
            "w" | "white" => return Ok(Color::WHITE),
            "k" | "black" => return Ok(Color::BLACK),
            "gray" | "grey" => return Ok(Color::GRAY),
            "r" | "red" => return Ok(Color::rgb(0xff, 0, 0)),
            "g" | "green" => return Ok(Color::rgb(0, 0x80, 0)),
            "b" | "blue" => return Ok(Color::rgb(0, 0, 0xff)),
            _ => {}
        }

        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| VizError::InvalidColor(text.to_string()))?;
        parse_hex(hex.as_bytes()).ok_or_else(|| VizError::InvalidColor(text.to_string()))
    }
}

fn parse_hex(bytes: &[u8]) -> Option<Color> {
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    match bytes.len() {
        3 => Some(Color::rgb(hex1(bytes[0])?, hex1(bytes[1])?, hex1(bytes[2])?)),
        6 => Some(Color::rgb(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
        )),
        8 => Some(Color::rgba(
            hex2(&bytes[0..2])?,
            hex2(&bytes[2..4])?,
            hex2(&bytes[4..6])?,
            hex2(&bytes[6..8])?,
        )),
        _ => None,
    }
}
