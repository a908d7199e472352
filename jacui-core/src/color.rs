// SPDX-License-Identifier: MIT

//! RGBA colors and the named color table.

use bytemuck::{Pod, Zeroable};
use serde::Deserialize;
use std::str::FromStr;

use crate::error::Error;

/// An 8-bit per channel RGBA color.
///
/// The in-memory layout is `[r, g, b, a]`, which is also the pixel layout of every surface.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Pod, Zeroable, Deserialize)]
#[serde(try_from = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel. 0 is fully transparent.
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// An opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// A color with explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque gray level.
    pub const fn gray(level: u8) -> Self {
        Self::rgb(level, level, level)
    }

    /// Create a color from a 24-bit RGB value, e.g. `0xffff00` is yellow.
    pub const fn from_rgb(rgb: u32) -> Self {
        Self::rgb((rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8)
    }

    /// Create a color from a 32-bit RGBA value, e.g. `0xffff0080` is half-transparent yellow.
    pub const fn from_rgba(rgba: u32) -> Self {
        Self::rgba((rgba >> 24) as u8, (rgba >> 16) as u8, (rgba >> 8) as u8, rgba as u8)
    }

    /// The color packed as `0xRRGGBB`.
    pub const fn to_rgb(&self) -> u32 {
        (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }

    /// The color packed as `0xRRGGBBAA`.
    pub const fn to_rgba(&self) -> u32 {
        (self.r as u32) << 24 | (self.g as u32) << 16 | (self.b as u32) << 8 | self.a as u32
    }

    /// Whether the color is visible at all (non-zero alpha).
    pub const fn is_opaque(&self) -> bool {
        self.a != 0
    }

    /// The same color with a different alpha.
    pub const fn with_alpha(self, a: u8) -> Self {
        Self { a, ..self }
    }

    /// Composite `self` over `dst` (source-over). The destination alpha is kept.
    pub fn over(self, dst: Color) -> Color {
        match self.a {
            0 => dst,
            0xff => self.with_alpha(dst.a),
            a => {
                let a = a as u32;
                let inv = 255 - a;
                let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * inv + 127) / 255) as u8;
                Color::rgba(mix(self.r, dst.r), mix(self.g, dst.g), mix(self.b, dst.b), dst.a)
            }
        }
    }

    /// Look up one of the named [colors].
    pub fn named(name: &str) -> Option<Color> {
        colors::ALL
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, c)| *c)
    }
}

fn parse_hex(digits: &str) -> Option<u32> {
    u32::from_str_radix(digits, 16).ok()
}

impl FromStr for Color {
    type Err = Error;

    /// Parse `#rgb`, `#rrggbb`, `#rrggbbaa`, `#rrrrggggbbbb` or a color name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || Error::Config(format!("invalid color: {}", s));

        let Some(hex) = s.strip_prefix('#') else {
            return Color::named(s).ok_or_else(invalid);
        };
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }

        match hex.len() {
            3 => {
                let v = parse_hex(hex).ok_or_else(invalid)?;
                let expand = |n: u32| ((n & 0xf) * 0x11) as u8;
                Ok(Color::rgb(expand(v >> 8), expand(v >> 4), expand(v)))
            }
            6 => Ok(Color::from_rgb(parse_hex(hex).ok_or_else(invalid)?)),
            8 => Ok(Color::from_rgba(parse_hex(hex).ok_or_else(invalid)?)),
            12 => {
                // X11 style 16 bits per channel, keep the high byte
                let channel = |i: usize| parse_hex(&hex[i..i + 2]).map(|v| v as u8);
                match (channel(0), channel(4), channel(8)) {
                    (Some(r), Some(g), Some(b)) => Ok(Color::rgb(r, g, b)),
                    _ => Err(invalid()),
                }
            }
            _ => Err(invalid()),
        }
    }
}

impl TryFrom<String> for Color {
    type Error = Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// The sixteen basic HTML colors.
#[allow(missing_docs)]
pub mod colors {
    use super::Color;

    pub const BLACK: Color = Color::from_rgb(0x000000);
    pub const SILVER: Color = Color::from_rgb(0xc0c0c0);
    pub const GRAY: Color = Color::from_rgb(0x808080);
    pub const WHITE: Color = Color::from_rgb(0xffffff);
    pub const MAROON: Color = Color::from_rgb(0x800000);
    pub const RED: Color = Color::from_rgb(0xff0000);
    pub const PURPLE: Color = Color::from_rgb(0x800080);
    pub const FUCHSIA: Color = Color::from_rgb(0xff00ff);
    pub const GREEN: Color = Color::from_rgb(0x008000);
    pub const LIME: Color = Color::from_rgb(0x00ff00);
    pub const OLIVE: Color = Color::from_rgb(0x808000);
    pub const YELLOW: Color = Color::from_rgb(0xffff00);
    pub const NAVY: Color = Color::from_rgb(0x000080);
    pub const BLUE: Color = Color::from_rgb(0x0000ff);
    pub const TEAL: Color = Color::from_rgb(0x008080);
    pub const AQUA: Color = Color::from_rgb(0x00ffff);

    pub(crate) const ALL: [(&str, Color); 16] = [
        ("black", BLACK),
        ("silver", SILVER),
        ("gray", GRAY),
        ("white", WHITE),
        ("maroon", MAROON),
        ("red", RED),
        ("purple", PURPLE),
        ("fuchsia", FUCHSIA),
        ("green", GREEN),
        ("lime", LIME),
        ("olive", OLIVE),
        ("yellow", YELLOW),
        ("navy", NAVY),
        ("blue", BLUE),
        ("teal", TEAL),
        ("aqua", AQUA),
    ];
}
