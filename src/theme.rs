//! Highlight colors
//!
//! The core only hands out a two-valued [`HighlightClass`]; this module maps
//! that class to a background color. A lone match gets its own color so it
//! stands out from the alternating bands.

use serde::{Deserialize, Serialize};

use crate::highlight::HighlightClass;

/// RGB color (0-255 per channel)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse from a "#RRGGBB" hex string
    pub fn from_hex(s: &str) -> Result<Self, String> {
        let hex = s.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return Err(format!("Invalid color format: {}", s));
        }
        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&hex[range], 16).map_err(|e| format!("Invalid color {}: {}", s, e))
        };
        Ok(Color {
            r: channel(0..2)?,
            g: channel(2..4)?,
            b: channel(4..6)?,
        })
    }

    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

/// Theme colors as written in config.yaml
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThemeData {
    /// Background of even-numbered matches
    #[serde(default = "default_primary")]
    pub primary: String,
    /// Background of odd-numbered matches
    #[serde(default = "default_alternate")]
    pub alternate: String,
    /// Background when the text has exactly one match
    #[serde(default = "default_single")]
    pub single: String,
    /// Foreground of the error box
    #[serde(default = "default_error")]
    pub error: String,
}

fn default_primary() -> String {
    "#AA2222".to_string()
}

fn default_alternate() -> String {
    "#2244AA".to_string()
}

fn default_single() -> String {
    "#227733".to_string()
}

fn default_error() -> String {
    "#FF5555".to_string()
}

impl Default for ThemeData {
    fn default() -> Self {
        Self {
            primary: default_primary(),
            alternate: default_alternate(),
            single: default_single(),
            error: default_error(),
        }
    }
}

/// Resolved theme with parsed colors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub primary: Color,
    pub alternate: Color,
    pub single: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            primary: Color::rgb(0xAA, 0x22, 0x22),
            alternate: Color::rgb(0x22, 0x44, 0xAA),
            single: Color::rgb(0x22, 0x77, 0x33),
            error: Color::rgb(0xFF, 0x55, 0x55),
        }
    }
}

impl Theme {
    pub fn from_data(data: &ThemeData) -> Result<Self, String> {
        Ok(Self {
            primary: Color::from_hex(&data.primary)?,
            alternate: Color::from_hex(&data.alternate)?,
            single: Color::from_hex(&data.single)?,
            error: Color::from_hex(&data.error)?,
        })
    }

    /// Background for a highlighted segment
    ///
    /// `single_match` is true when the rendering holds exactly one match.
    pub fn highlight_color(&self, class: HighlightClass, single_match: bool) -> Color {
        if single_match {
            return self.single;
        }
        match class {
            HighlightClass::Primary => self.primary,
            HighlightClass::Alternate => self.alternate,
        }
    }
}
