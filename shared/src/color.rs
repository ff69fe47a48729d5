use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while parsing a wire color
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    /// Value is not of the form `#rrggbb`
    #[error("Color {value:?} is not a 6-hex-digit color of the form #rrggbb")]
    InvalidFormat { value: String },
}

/// A user-chosen pigment
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// Color of a part. `#000000` and `#ffffff` on the wire both mean
/// "reset to the original material" and map to `Unpainted`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum PaintColor {
    Unpainted,
    Painted(Rgb),
}

impl PaintColor {
    const UNPAINTED_WIRE: &'static str = "#ffffff";

    pub fn parse(value: &str) -> Result<Self, ColorParseError> {
        let invalid = || ColorParseError::InvalidFormat {
            value: value.to_string(),
        };

        let hex = value.strip_prefix('#').ok_or_else(invalid)?;
        if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(invalid());
        }
        let channel = |at: usize| u8::from_str_radix(&hex[at..at + 2], 16).map_err(|_| invalid());
        let rgb = Rgb(channel(0)?, channel(2)?, channel(4)?);

        match rgb {
            Rgb(0, 0, 0) | Rgb(0xff, 0xff, 0xff) => Ok(PaintColor::Unpainted),
            rgb => Ok(PaintColor::Painted(rgb)),
        }
    }

    pub fn is_painted(&self) -> bool {
        matches!(self, PaintColor::Painted(_))
    }
}

impl fmt::Display for PaintColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaintColor::Unpainted => f.write_str(Self::UNPAINTED_WIRE),
            PaintColor::Painted(rgb) => rgb.fmt(f),
        }
    }
}

impl TryFrom<String> for PaintColor {
    type Error = ColorParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        PaintColor::parse(&value)
    }
}

impl From<PaintColor> for String {
    fn from(color: PaintColor) -> Self {
        color.to_string()
    }
}
