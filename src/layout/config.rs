use super::geometry::{mm, Size};

/// Fixed geometry of a printed label sheet. All lengths are in points.
#[derive(Debug, Clone)]
pub struct LayoutConfig {
    /// Physical page (A4 portrait)
    pub page_size: Size,
    pub columns: u32,
    pub rows: u32,

    /// Inset from the cell edge for text, QR and logos
    pub margin: f32,
    pub border_width: f32,
    pub font_size: f32,

    /// Baseline offsets below the inner top edge, one per text line:
    /// client, product, quantity, lot, dates, contact, care
    pub line_offsets: [f32; 7],
    /// Where the second field of a combined line starts, from the text origin
    pub second_column: f32,

    pub qr_size: f32,

    pub logo_size: Size,
    /// Distance from the cell top edge down to the logo's bottom edge
    pub logo_top_offset: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            page_size: Size::from_mm(210.0, 297.0),
            columns: 2,
            rows: 4,
            margin: mm(5.0),
            border_width: 1.0,
            font_size: 8.0,
            line_offsets: [25.0, 35.0, 45.0, 55.0, 65.0, 85.0, 105.0],
            second_column: mm(46.0),
            qr_size: mm(16.0),
            logo_size: Size::from_mm(20.0, 8.0),
            logo_top_offset: mm(12.0),
        }
    }
}
