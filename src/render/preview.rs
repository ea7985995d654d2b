//! Quick raster preview of a label for the data-entry screen.

use std::io::Cursor;

use image::{ImageFormat, Rgb, RgbImage};

use super::text::draw_bitmap_text;
use super::ContactInfo;
use crate::error::Result;
use crate::models::LabelRequest;

pub const PREVIEW_WIDTH: u32 = 400;
pub const PREVIEW_HEIGHT: u32 = 250;

const TEXT_X: u32 = 10;
const FIRST_LINE_Y: u32 = 10;
const LINE_SPACING: u32 = 20;
const INK: Rgb<u8> = Rgb([0, 0, 0]);

fn preview_lines(request: &LabelRequest) -> [(&'static str, String); 6] {
    [
        ("Cliente", request.client.clone()),
        ("Producto", request.product.clone()),
        ("Cantidad", request.quantity.to_string()),
        ("N° Paquete", request.package_index.to_string()),
        ("Lote", request.lot_code.clone()),
        ("Orden Compra", request.purchase_order.clone()),
    ]
}

/// Render the label fields on the chosen background. No QR and no logos.
pub fn render_preview(request: &LabelRequest, contact: &ContactInfo) -> RgbImage {
    let mut image = RgbImage::from_pixel(
        PREVIEW_WIDTH,
        PREVIEW_HEIGHT,
        Rgb(request.background_color.rgb()),
    );

    let mut y = FIRST_LINE_Y;
    for (label, value) in preview_lines(request) {
        draw_bitmap_text(&mut image, TEXT_X, y, &format!("{label}: {value}"), INK);
        y += LINE_SPACING;
    }

    draw_bitmap_text(&mut image, TEXT_X, y + 10, &contact.email, INK);
    draw_bitmap_text(&mut image, TEXT_X, y + 30, &contact.whatsapp_line(), INK);
    image
}

pub fn encode_png(image: &RgbImage) -> Result<Vec<u8>> {
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png)?;
    Ok(bytes.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BackgroundColor;

    fn request(color: BackgroundColor) -> LabelRequest {
        LabelRequest {
            client: "ACME".into(),
            product: "Widget".into(),
            quantity: 25,
            package_index: 4,
            total_count: 10,
            lot_code: "L1".into(),
            purchase_order: "PO9".into(),
            background_color: color,
        }
    }

    #[test]
    fn preview_uses_background_and_draws_text() {
        let image = render_preview(&request(BackgroundColor::Blue), &ContactInfo::default());

        assert_eq!(image.dimensions(), (PREVIEW_WIDTH, PREVIEW_HEIGHT));
        assert_eq!(image.get_pixel(PREVIEW_WIDTH - 1, PREVIEW_HEIGHT - 1).0, BackgroundColor::Blue.rgb());
        let inked = image.pixels().filter(|p| p.0 == [0, 0, 0]).count();
        assert!(inked > 100);
    }

    #[test]
    fn preview_lines_show_package_index() {
        let lines = preview_lines(&request(BackgroundColor::White));
        assert_eq!(lines[3], ("N° Paquete", "4".to_string()));
        assert_eq!(lines[5].0, "Orden Compra");
    }

    #[test]
    fn png_encoding_round_trips_dimensions() {
        let image = render_preview(&request(BackgroundColor::Red), &ContactInfo::default());
        let png = encode_png(&image).unwrap();
        assert!(png.starts_with(b"\x89PNG"));

        let decoded = image::load_from_memory(&png).unwrap();
        assert_eq!(decoded.width(), PREVIEW_WIDTH);
        assert_eq!(decoded.height(), PREVIEW_HEIGHT);
    }
}
