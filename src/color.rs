//! Packed RGB pen colours and the fixed random-pen palette.

pub use csscolorparser::Color as CssColor;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::TurtleError;

/// An opaque RGB colour packed as `0xAARRGGBB`, with alpha always `0xFF`
/// when built from components.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct PackedColor(pub u32);

impl PackedColor {
    pub const WHITE: PackedColor = PackedColor::from_rgb(255, 255, 255);
    pub const BLACK: PackedColor = PackedColor::from_rgb(0, 0, 0);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> PackedColor {
        PackedColor(0xFF00_0000 | (r as u32) << 16 | (g as u32) << 8 | b as u32)
    }

    pub fn r(&self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn g(&self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn b(&self) -> u8 {
        self.0 as u8
    }

    pub fn rgb(&self) -> (u8, u8, u8) {
        (self.r(), self.g(), self.b())
    }

    /// `#rrggbb`, the form SVG stroke attributes want.
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r(), self.g(), self.b())
    }
}

impl Default for PackedColor {
    fn default() -> Self {
        PackedColor::WHITE
    }
}

impl fmt::Display for PackedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<CssColor> for PackedColor {
    fn from(color: CssColor) -> Self {
        let [r, g, b, _a] = color.to_rgba8();
        PackedColor::from_rgb(r, g, b)
    }
}

/// Accepts anything csscolorparser does: names, `#hex`, `rgb(...)`, `hsl(...)`.
/// Alpha is discarded.
impl FromStr for PackedColor {
    type Err = TurtleError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        csscolorparser::parse(s)
            .map(PackedColor::from)
            .map_err(|_| TurtleError::Color(s.to_string()))
    }
}

/// The sixteen colours `random_pen_color` picks from.
pub const PALETTE: [(u8, u8, u8); 16] = [
    (255, 255, 255),
    (0, 0, 255),
    (0, 255, 0),
    (0, 255, 255),
    (255, 0, 0),
    (255, 0, 255),
    (255, 255, 0),
    (180, 180, 180),
    (155, 96, 59),
    (197, 136, 18),
    (100, 162, 64),
    (120, 187, 187),
    (255, 149, 119),
    (144, 113, 208),
    (255, 163, 0),
    (183, 183, 183),
];

/// Map a uniform sample in `[0, 16)` to a palette index. Out of range
/// samples are clamped rather than wrapped.
pub fn palette_index(sample: f64) -> usize {
    if sample.is_nan() || sample < 0.0 {
        0
    } else {
        (sample.floor() as usize).min(PALETTE.len() - 1)
    }
}
