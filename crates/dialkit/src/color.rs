use crate::error::ColorError;
use palette::{Srgb, Srgba, WithAlpha};
use serde_with::{DeserializeFromStr, SerializeDisplay};
use std::fmt;
use std::str::FromStr;

/// Opaque sRGB color written as `#rgb` or `#rrggbb` in configuration.
#[derive(Debug, Clone, Copy, PartialEq, DeserializeFromStr, SerializeDisplay)]
pub struct Color(Srgb<u8>);

impl Color {
    pub fn from_rgb(red: u8, green: u8, blue: u8) -> Self {
        Self(Srgb::new(red, green, blue))
    }

    pub fn dial_default() -> Self {
        Self::from_rgb(0xFF, 0x57, 0x33)
    }

    pub fn background_default() -> Self {
        Self::from_rgb(0xD8, 0xD8, 0xD8)
    }

    pub fn handle_fill_default() -> Self {
        Self::from_rgb(0xFF, 0xFF, 0xFF)
    }

    pub fn handle_stroke_default() -> Self {
        Self::from_rgb(0x88, 0x88, 0x88)
    }

    pub fn components(&self) -> (u8, u8, u8) {
        (self.0.red, self.0.green, self.0.blue)
    }

    pub fn to_srgba(&self) -> Srgba<f64> {
        self.0.into_format::<f64>().with_alpha(1.0)
    }
}

impl FromStr for Color {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<Srgb<u8>>()
            .map(Self)
            .map_err(|_| ColorError(s.to_string()))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (r, g, b) = self.components();
        write!(f, "#{r:02X}{g:02X}{b:02X}")
    }
}
