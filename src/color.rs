//! Colors as the page palette uses them: `#rrggbb` strings in config, CSS
//! `rgba()` strings for Canvas 2D and normalized floats for WebGL.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ColorError {
    #[error("color `{0}` must start with `#`")]
    MissingHash(String),
    #[error("color `{0}` must have six hex digits")]
    BadLength(String),
    #[error("color `{0}` is not valid hex")]
    BadDigit(String),
}

/// Opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn hex(value: u32) -> Self {
        Self {
            r: ((value >> 16) & 0xff) as u8,
            g: ((value >> 8) & 0xff) as u8,
            b: (value & 0xff) as u8,
        }
    }

    pub const fn alpha(self, a: f64) -> Rgba {
        Rgba { rgb: self, a }
    }

    pub fn to_f32(self) -> [f32; 3] {
        [
            f32::from(self.r) / 255.0,
            f32::from(self.g) / 255.0,
            f32::from(self.b) / 255.0,
        ]
    }
}

impl FromStr for Rgb {
    type Err = ColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let digits = s
            .strip_prefix('#')
            .ok_or_else(|| ColorError::MissingHash(s.to_owned()))?;
        if digits.len() != 6 {
            return Err(ColorError::BadLength(s.to_owned()));
        }
        // from_str_radix would also take a leading sign.
        if !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(ColorError::BadDigit(s.to_owned()));
        }
        let value = u32::from_str_radix(digits, 16).map_err(|_| ColorError::BadDigit(s.to_owned()))?;
        Ok(Self::hex(value))
    }
}

impl TryFrom<String> for Rgb {
    type Error = ColorError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_string()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

/// RGB plus opacity in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    pub rgb: Rgb,
    pub a: f64,
}

impl Rgba {
    pub const fn new(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { rgb: Rgb { r, g, b }, a }
    }

    pub fn css(&self) -> String {
        format!("rgba({}, {}, {}, {})", self.rgb.r, self.rgb.g, self.rgb.b, self.a)
    }

    pub fn to_f32(self) -> [f32; 4] {
        let [r, g, b] = self.rgb.to_f32();
        [r, g, b, self.a as f32]
    }
}

pub const CYAN: Rgb = Rgb::hex(0x00e5ff);
pub const MAGENTA: Rgb = Rgb::hex(0xff2d95);
pub const VIOLET: Rgb = Rgb::hex(0x8338ec);
pub const TEAL: Rgb = Rgb::hex(0x00bfa5);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_hex() {
        assert_eq!("#00e5ff".parse::<Rgb>(), Ok(CYAN));
        assert_eq!(CYAN.to_string(), "#00e5ff");
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!("00e5ff".parse::<Rgb>(), Err(ColorError::MissingHash(_))));
        assert!(matches!("#0e5ff".parse::<Rgb>(), Err(ColorError::BadLength(_))));
        assert!(matches!("#00e5fg".parse::<Rgb>(), Err(ColorError::BadDigit(_))));
    }

    #[test]
    fn rejects_signed_digits() {
        assert!(matches!("#+00e5f".parse::<Rgb>(), Err(ColorError::BadDigit(_))));
        assert!(matches!("#-00e5f".parse::<Rgb>(), Err(ColorError::BadDigit(_))));
    }

    #[test]
    fn css_rgba() {
        assert_eq!(CYAN.alpha(0.5).css(), "rgba(0, 229, 255, 0.5)");
    }

    #[test]
    fn serde_uses_hash_string() {
        let c: Rgb = serde_json::from_str("\"#ff2d95\"").unwrap();
        assert_eq!(c, MAGENTA);
        assert_eq!(serde_json::to_string(&c).unwrap(), "\"#ff2d95\"");
        assert!(serde_json::from_str::<Rgb>("\"red\"").is_err());
    }
}
