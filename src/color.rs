use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// An RGBA color with components in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    pub const fn rgba(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xFF) as f32 / 255.0,
            g: ((hex >> 8) & 0xFF) as f32 / 255.0,
            b: (hex & 0xFF) as f32 / 255.0,
            a: 1.0,
        }
    }

    pub const WHITE: Color = Color::rgb(1.0, 1.0, 1.0);
    pub const BLACK: Color = Color::rgb(0.0, 0.0, 0.0);
    pub const RED: Color = Color::rgb(1.0, 0.0, 0.0);
    pub const GREEN: Color = Color::from_hex(0x008000);
    pub const BLUE: Color = Color::rgb(0.0, 0.0, 1.0);
    pub const YELLOW: Color = Color::rgb(1.0, 1.0, 0.0);
    pub const CYAN: Color = Color::rgb(0.0, 1.0, 1.0);
    pub const MAGENTA: Color = Color::rgb(1.0, 0.0, 1.0);
    pub const GRAY: Color = Color::from_hex(0x808080);
    pub const TRANSPARENT: Color = Color::rgba(0.0, 0.0, 0.0, 0.0);

    /// Whether every channel is a finite number inside `0.0..=1.0`.
    pub fn is_valid(&self) -> bool {
        [self.r, self.g, self.b, self.a]
            .iter()
            .all(|c| c.is_finite() && (0.0..=1.0).contains(c))
    }

    /// Pack into `0xRRGGBB`, dropping alpha.
    pub fn to_hex(&self) -> u32 {
        let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u32;
        (channel(self.r) << 16) | (channel(self.g) << 8) | channel(self.b)
    }

    fn named(name: &str) -> Option<Self> {
        let color = match name {
            "white" => Self::WHITE,
            "black" => Self::BLACK,
            "red" => Self::RED,
            "green" => Self::GREEN,
            "blue" => Self::BLUE,
            "yellow" => Self::YELLOW,
            "cyan" | "aqua" => Self::CYAN,
            "magenta" | "fuchsia" => Self::MAGENTA,
            "gray" | "grey" => Self::GRAY,
            "transparent" => Self::TRANSPARENT,
            _ => return None,
        };
        Some(color)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.a >= 1.0 {
            write!(f, "#{:06x}", self.to_hex())
        } else {
            let alpha = (self.a.clamp(0.0, 1.0) * 255.0).round() as u32;
            write!(f, "#{:06x}{:02x}", self.to_hex(), alpha)
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("empty color token")]
    Empty,
    #[error("unknown color name: {0}")]
    UnknownName(String),
    #[error("malformed hex color: {0}")]
    BadHex(String),
}

/// Parses the string tokens canvas APIs accept: a CSS color name
/// (`"red"`, `"blue"`, ...) or `#rgb` / `#rrggbb` / `#rrggbbaa` hex.
impl FromStr for Color {
    type Err = ColorParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        if token.is_empty() {
            return Err(ColorParseError::Empty);
        }

        let Some(hex) = token.strip_prefix('#') else {
            return Self::named(&token.to_ascii_lowercase())
                .ok_or_else(|| ColorParseError::UnknownName(token.to_string()));
        };

        let bad_hex = || ColorParseError::BadHex(token.to_string());
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(bad_hex());
        }
        let value = u32::from_str_radix(hex, 16).map_err(|_| bad_hex())?;
        match hex.len() {
            6 => Ok(Self::from_hex(value)),
            8 => Ok(Self {
                a: (value & 0xFF) as f32 / 255.0,
                ..Self::from_hex(value >> 8)
            }),
            // #rgb expands each nibble: #f0a -> #ff00aa
            3 => {
                let r = (value >> 8) & 0xF;
                let g = (value >> 4) & 0xF;
                let b = value & 0xF;
                Ok(Self::from_hex(((r * 0x11) << 16) | ((g * 0x11) << 8) | (b * 0x11)))
            }
            _ => Err(bad_hex()),
        }
    }
}
