//! Colors shared between the host and panel containers
//!
//! Containers have no palette of their own: a container that owns a panel
//! paints with the wrapped surface's content background, and an empty one
//! falls back to [`DEFAULT_CONTAINER_BACKGROUND`].

use serde::{Deserialize, Serialize};

/// Background used by a container that currently owns no overview panel
pub const DEFAULT_CONTAINER_BACKGROUND: Color = Color::rgb(0x3C, 0x3F, 0x41);

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    /// Create a new color from RGB values (alpha defaults to 255)
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a new color from RGBA values
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Parse from "#RRGGBB" or "#RRGGBBAA" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim().trim_start_matches('#');
        let channel = |range: std::ops::Range<usize>| {
            hex.get(range)
                .ok_or_else(|| format!("Invalid color format: {}", s))
                .and_then(|part| u8::from_str_radix(part, 16).map_err(|e| e.to_string()))
        };
        match hex.len() {
            6 => Ok(Color::rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
            8 => Ok(Color::rgba(
                channel(0..2)?,
                channel(2..4)?,
                channel(4..6)?,
                channel(6..8)?,
            )),
            _ => Err(format!("Invalid color format: {}", s)),
        }
    }

    /// Format as "#RRGGBB", or "#RRGGBBAA" when not fully opaque
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_roundtrip_opaque() {
        let color = Color::from_hex("#1E1E1E").unwrap();
        assert_eq!(color, Color::rgb(0x1E, 0x1E, 0x1E));
        assert_eq!(color.to_hex(), "#1E1E1E");
    }

    #[test]
    fn test_hex_with_alpha() {
        let color = Color::from_hex("2B2B2B80").unwrap();
        assert_eq!(color.a, 0x80);
        assert_eq!(color.to_hex(), "#2B2B2B80");
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::from_hex("#12345").is_err());
        assert!(Color::from_hex("#GGGGGG").is_err());
        assert!(Color::from_hex("#ÄÄÄ").is_err());
    }
}
