//! QR code generation for label payloads.

use image::{GrayImage, Luma};
use qrcode::QrCode;

use crate::error::{Error, Result};

/// Pixel size of one QR module in the generated raster.
const MODULE_PX: u32 = 4;

/// Ordered `(label, value)` pairs encoded into a QR code.
///
/// Order is part of the payload: fields are emitted exactly as pushed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QrFields {
    fields: Vec<(String, String)>,
}

impl QrFields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, label: impl Into<String>, value: impl ToString) -> &mut Self {
        self.fields.push((label.into(), value.to_string()));
        self
    }

    /// `LABEL: value` lines joined by `\n`, labels upper-cased.
    pub fn payload(&self) -> String {
        self.fields
            .iter()
            .map(|(label, value)| format!("{}: {}", label.to_uppercase(), value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Encode the payload of `fields` as a grayscale QR raster with quiet zone.
pub fn encode(fields: &QrFields) -> Result<GrayImage> {
    encode_text(&fields.payload())
}

pub fn encode_text(payload: &str) -> Result<GrayImage> {
    let code = QrCode::new(payload.as_bytes()).map_err(|reason| Error::Encoding {
        payload_len: payload.len(),
        reason,
    })?;

    Ok(code
        .render::<Luma<u8>>()
        .quiet_zone(true)
        .module_dimensions(MODULE_PX, MODULE_PX)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> QrFields {
        let mut fields = QrFields::new();
        fields
            .push("Cliente", "ACME")
            .push("Producto", "Widget")
            .push("Cantidad", 10)
            .push("Paquete", "3/10")
            .push("Lote", "L1")
            .push("Orden", "PO9");
        fields
    }

    #[test]
    fn payload_preserves_insertion_order() {
        assert_eq!(
            sample().payload(),
            "CLIENTE: ACME\nPRODUCTO: Widget\nCANTIDAD: 10\nPAQUETE: 3/10\nLOTE: L1\nORDEN: PO9"
        );

        let mut reversed = QrFields::new();
        reversed.push("Orden", "PO9").push("Lote", "L1");
        assert_eq!(reversed.payload(), "ORDEN: PO9\nLOTE: L1");
    }

    #[test]
    fn encode_is_deterministic_and_square() {
        let a = encode(&sample()).unwrap();
        let b = encode(&sample()).unwrap();
        assert_eq!(a.width(), a.height());
        assert_eq!(a.as_raw(), b.as_raw());
        assert!(a.pixels().any(|p| p.0[0] == 0));
    }

    #[test]
    fn oversized_payload_is_an_encoding_error() {
        let mut fields = QrFields::new();
        fields.push("Lote", "X".repeat(8_000));

        match encode(&fields) {
            Err(Error::Encoding { payload_len, .. }) => assert!(payload_len > 8_000),
            other => panic!("expected encoding error, got {other:?}"),
        }
    }
}
