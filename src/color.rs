//! Color type for curve strokes and fills.
//!
//! `Rgba8` is the only color the curve layer carries; render surfaces
//! convert it to whatever their backend wants.

use crate::error::{GraphError, GraphResult};

/// RGBA color with u8 components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Rgba8 = Rgba8::new(0, 0, 0, 255);
    pub const WHITE: Rgba8 = Rgba8::new(255, 255, 255, 255);
    pub const RED: Rgba8 = Rgba8::new(255, 0, 0, 255);
    pub const GREEN: Rgba8 = Rgba8::new(0, 128, 0, 255);
    pub const BLUE: Rgba8 = Rgba8::new(0, 0, 255, 255);
    pub const TRANSPARENT: Rgba8 = Rgba8::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub fn with_opacity(c: &Rgba8, a: u8) -> Self {
        Self { a, ..*c }
    }

    /// Opacity in `[0, 1]`.
    pub fn opacity(&self) -> f64 {
        self.a as f64 / 255.0
    }

    /// Parse `#rrggbb` or `#rrggbbaa`.
    pub fn from_hex(s: &str) -> GraphResult<Self> {
        let invalid = || GraphError::InvalidColor(s.to_string());
        let hex = s.strip_prefix('#').ok_or_else(invalid)?;
        if !(hex.len() == 6 || hex.len() == 8) || !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
        let a = if hex.len() == 8 { channel(6)? } else { 255 };
        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?, a))
    }

    /// `#rrggbbaa` form, the inverse of [`Rgba8::from_hex`].
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}{:02x}", self.r, self.g, self.b, self.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex() {
        assert_eq!(Rgba8::from_hex("#ff8000").unwrap(), Rgba8::rgb(255, 128, 0));
        assert_eq!(
            Rgba8::from_hex("#00000080").unwrap(),
            Rgba8::new(0, 0, 0, 128)
        );
        assert_eq!(Rgba8::from_hex("#FFFFFF").unwrap(), Rgba8::WHITE);
    }

    #[test]
    fn test_from_hex_rejects_garbage() {
        for bad in ["ff0000", "#ff00", "#gg0000", "#ff00000", ""] {
            assert_eq!(
                Rgba8::from_hex(bad),
                Err(GraphError::InvalidColor(bad.to_string()))
            );
        }
    }

    #[test]
    fn test_to_hex() {
        assert_eq!(Rgba8::new(1, 2, 255, 16).to_hex(), "#0102ff10");
    }

    #[test]
    fn test_with_opacity() {
        let c = Rgba8::with_opacity(&Rgba8::RED, 64);
        assert_eq!(c, Rgba8::new(255, 0, 0, 64));
        assert!((c.opacity() - 64.0 / 255.0).abs() < 1e-12);
    }
}
