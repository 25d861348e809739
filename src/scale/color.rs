use crate::error::{ProcessingError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb`.
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex
            .strip_prefix('#')
            .filter(|d| d.len() == 6 && d.is_ascii())
            .ok_or_else(|| ProcessingError::InvalidFormat(format!("Invalid color: '{}'", hex)))?;

        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ProcessingError::InvalidFormat(format!("Invalid color: '{}'", hex)))
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Build from floating channel values, rounding and clamping to 0..=255.
    pub fn from_channels(r: f64, g: f64, b: f64) -> Self {
        let clamp = |v: f64| v.round().clamp(0.0, 255.0) as u8;
        Self::new(clamp(r), clamp(g), clamp(b))
    }

    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let hex = String::deserialize(deserializer)?;
        Color::from_hex(&hex).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_round_trip() {
        let color = Color::from_hex("#a50026").unwrap();
        assert_eq!(color, Color::new(0xa5, 0x00, 0x26));
        assert_eq!(color.to_hex(), "#a50026");
        assert_eq!(Color::from_hex("#E0E0E0").unwrap().to_hex(), "#e0e0e0");
    }

    #[test]
    fn test_invalid_hex() {
        assert!(Color::from_hex("a50026").is_err());
        assert!(Color::from_hex("#a5002").is_err());
        assert!(Color::from_hex("#gg0026").is_err());
        assert!(Color::from_hex("#ééé").is_err());
    }

    #[test]
    fn test_from_channels_clamps() {
        assert_eq!(Color::from_channels(-4.0, 127.5, 300.0), Color::new(0, 128, 255));
    }

    #[test]
    fn test_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::new(49, 54, 149)).unwrap();
        assert_eq!(json, "\"#313695\"");
    }
}
