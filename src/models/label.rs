use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundColor {
    #[default]
    White,
    Green,
    Red,
    Blue,
}

impl BackgroundColor {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackgroundColor::White => "White",
            BackgroundColor::Green => "Green",
            BackgroundColor::Red => "Red",
            BackgroundColor::Blue => "Blue",
        }
    }

    /// Pastel tones used on printed sheets.
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            BackgroundColor::White => [0xFF, 0xFF, 0xFF],
            BackgroundColor::Green => [0xD5, 0xF5, 0xE3],
            BackgroundColor::Red => [0xFA, 0xDB, 0xD8],
            BackgroundColor::Blue => [0xD6, 0xEA, 0xF8],
        }
    }

    /// Accepts English and Spanish names. Anything unknown renders white.
    pub fn from_name(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "green" | "verde" => BackgroundColor::Green,
            "red" | "rojo" => BackgroundColor::Red,
            "blue" | "azul" => BackgroundColor::Blue,
            _ => BackgroundColor::White,
        }
    }
}

impl fmt::Display for BackgroundColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub enum LogoSlot {
    Left,
    Right,
}

impl LogoSlot {
    pub const ALL: [LogoSlot; 2] = [LogoSlot::Left, LogoSlot::Right];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogoSlot::Left => "left",
            LogoSlot::Right => "right",
        }
    }
}

impl fmt::Display for LogoSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label metadata as submitted by the data-entry front end.
///
/// `package_index` is the package number recorded in history while
/// `total_count` is how many labels a run prints. Older data used a single
/// field for both meanings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LabelRequest {
    pub client: String,
    pub product: String,
    /// Units inside one package.
    pub quantity: u32,
    pub package_index: u32,
    pub total_count: u32,
    pub lot_code: String,
    pub purchase_order: String,
    #[serde(default)]
    pub background_color: BackgroundColor,
}

impl LabelRequest {
    pub fn validate(&self) -> Result<()> {
        let required = [
            ("client", &self.client),
            ("product", &self.product),
            ("lot code", &self.lot_code),
            ("purchase order", &self.purchase_order),
        ];
        for (name, value) in required {
            if value.trim().is_empty() {
                return Err(Error::Validation(format!("{name} is required")));
            }
        }

        let counts = [
            ("quantity", self.quantity),
            ("package index", self.package_index),
            ("total count", self.total_count),
        ];
        for (name, value) in counts {
            if value < 1 {
                return Err(Error::Validation(format!("{name} must be at least 1")));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> LabelRequest {
        LabelRequest {
            client: "ACME".into(),
            product: "Widget".into(),
            quantity: 10,
            package_index: 1,
            total_count: 10,
            lot_code: "L1".into(),
            purchase_order: "PO9".into(),
            background_color: BackgroundColor::Green,
        }
    }

    #[test]
    fn color_names_fall_back_to_white() {
        assert_eq!(BackgroundColor::from_name("Verde"), BackgroundColor::Green);
        assert_eq!(BackgroundColor::from_name(" AZUL "), BackgroundColor::Blue);
        assert_eq!(BackgroundColor::from_name("red"), BackgroundColor::Red);
        assert_eq!(BackgroundColor::from_name("magenta"), BackgroundColor::White);
        assert_eq!(BackgroundColor::from_name(""), BackgroundColor::White);
    }

    #[test]
    fn validate_accepts_complete_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn validate_rejects_blank_lot_code() {
        let mut req = request();
        req.lot_code = "   ".into();
        let err = req.validate().unwrap_err();
        assert!(matches!(err, Error::Validation(ref msg) if msg.contains("lot code")));
    }

    #[test]
    fn validate_rejects_zero_total() {
        let mut req = request();
        req.total_count = 0;
        assert!(matches!(req.validate(), Err(Error::Validation(_))));
    }
}
