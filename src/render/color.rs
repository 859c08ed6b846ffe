//! Chart colours.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// An opaque RGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Named colours accepted on the command line.
const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::rgb(0, 0, 0)),
    ("white", Color::rgb(255, 255, 255)),
    ("grey", Color::rgb(128, 128, 128)),
    ("gray", Color::rgb(128, 128, 128)),
    ("lightgrey", Color::rgb(211, 211, 211)),
    ("lightgray", Color::rgb(211, 211, 211)),
    ("darkgrey", Color::rgb(169, 169, 169)),
    ("darkgray", Color::rgb(169, 169, 169)),
    ("silver", Color::rgb(192, 192, 192)),
    ("red", Color::rgb(255, 0, 0)),
    ("green", Color::rgb(0, 128, 0)),
    ("blue", Color::rgb(0, 0, 255)),
    ("yellow", Color::rgb(255, 255, 0)),
    ("orange", Color::rgb(255, 165, 0)),
    ("purple", Color::rgb(128, 0, 128)),
    ("pink", Color::rgb(255, 192, 203)),
    ("cornflowerblue", Color::rgb(100, 149, 237)),
    ("lightblue", Color::rgb(173, 216, 230)),
    ("navy", Color::rgb(0, 0, 128)),
    ("teal", Color::rgb(0, 128, 128)),
];

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    pub const CORNFLOWER_BLUE: Color = Color::rgb(100, 149, 237);
    pub const PINK: Color = Color::rgb(255, 192, 203);
    pub const LIGHT_GREY: Color = Color::rgb(211, 211, 211);

    /// Create a colour from its components.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Look up a colour by name, case-insensitive.
    pub fn named(name: &str) -> Option<Self> {
        let name = name.to_ascii_lowercase();
        NAMED_COLORS
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, c)| *c)
    }

    /// Parse an optional gap colour; `none` means no gap colour.
    pub fn parse_optional(s: &str) -> Result<Option<Self>> {
        if s.trim().eq_ignore_ascii_case("none") {
            return Ok(None);
        }
        s.parse().map(Some)
    }

    /// Components as an array, for raster output.
    pub fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    fn from_hex(hex: &str) -> Option<Self> {
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
        Some(Self::rgb(channel(0)?, channel(2)?, channel(4)?))
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        let color = match s.strip_prefix('#') {
            Some(hex) => Color::from_hex(hex),
            None => Color::named(s),
        };
        color.ok_or_else(|| Error::InvalidOption(format!("unknown colour: {}", s)))
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
