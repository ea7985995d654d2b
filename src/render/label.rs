//! Drawing of a single label inside one grid cell.

use chrono::NaiveDate;
use image::DynamicImage;

use super::canvas::{Command, Document, ImageId, ImageResource, ImageSource};
use super::ContactInfo;
use crate::error::{Error, Result};
use crate::layout::{CellPlacement, LayoutConfig, Point, Rect};
use crate::models::{LabelRequest, LogoSlot};
use crate::qr::{self, QrFields};

const BLACK: [u8; 3] = [0, 0, 0];
const DATE_FORMAT: &str = "%d/%m/%Y";
const CARE_LINE: &str = "Mantener seco  |  FIFO  |  Frágil";

/// One label of a run: the request plus its position and dates.
#[derive(Debug, Clone)]
pub struct RenderedLabel<'a> {
    pub request: &'a LabelRequest,
    /// 1-based position within the run
    pub index: u32,
    pub total: u32,
    pub production_date: NaiveDate,
    pub expiry_date: NaiveDate,
}

/// A text line; combined lines carry a second field drawn at a fixed column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextLine {
    pub left: String,
    pub right: Option<String>,
}

impl TextLine {
    fn single(left: String) -> Self {
        Self { left, right: None }
    }

    fn pair(left: String, right: String) -> Self {
        Self {
            left,
            right: Some(right),
        }
    }
}

impl RenderedLabel<'_> {
    pub fn position(&self) -> String {
        format!("{}/{}", self.index, self.total)
    }

    pub fn qr_fields(&self) -> QrFields {
        let req = self.request;
        let mut fields = QrFields::new();
        fields
            .push("Cliente", &req.client)
            .push("Producto", &req.product)
            .push("Cantidad", req.quantity)
            .push("Paquete", self.position())
            .push("Lote", &req.lot_code)
            .push("Orden", &req.purchase_order);
        fields
    }

    pub fn text_lines(&self, contact: &ContactInfo) -> Vec<TextLine> {
        let req = self.request;
        vec![
            TextLine::single(format!("CLIENTE: {}", req.client)),
            TextLine::single(format!("PRODUCTO: {}", req.product)),
            TextLine::pair(
                format!("CANTIDAD: {} unid", req.quantity),
                format!("N° PAQUETE: {}", self.position()),
            ),
            TextLine::pair(
                format!("LOTE: {}", req.lot_code),
                format!("ORDEN COMPRA: {}", req.purchase_order),
            ),
            TextLine::pair(
                format!("F. PRODUCCIÓN: {}", self.production_date.format(DATE_FORMAT)),
                format!("F. VENCE: {}", self.expiry_date.format(DATE_FORMAT)),
            ),
            TextLine::single(contact.combined_line()),
            TextLine::single(CARE_LINE.to_string()),
        ]
    }
}

/// Logos registered once per document and shared by every label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LogoImages {
    pub left: Option<ImageId>,
    pub right: Option<ImageId>,
}

impl LogoImages {
    /// Decode the stored logo bytes and add them to `doc`.
    ///
    /// Absent slots are skipped; undecodable bytes fail with
    /// [`Error::AssetDecode`].
    pub fn register(
        doc: &mut Document,
        left: Option<&[u8]>,
        right: Option<&[u8]>,
    ) -> Result<Self> {
        let mut logos = LogoImages::default();
        for (slot, bytes) in [(LogoSlot::Left, left), (LogoSlot::Right, right)] {
            let Some(bytes) = bytes else { continue };
            let image = decode_logo(slot, bytes)?;
            let id = doc.add_image(ImageResource::from_dynamic(&image, ImageSource::Logo(slot)));
            match slot {
                LogoSlot::Left => logos.left = Some(id),
                LogoSlot::Right => logos.right = Some(id),
            }
        }
        Ok(logos)
    }
}

pub fn decode_logo(slot: LogoSlot, bytes: &[u8]) -> Result<DynamicImage> {
    image::load_from_memory(bytes).map_err(|source| Error::AssetDecode { slot, source })
}

/// Draw `label` into `cell` on the current page of `doc`.
pub fn draw_label(
    doc: &mut Document,
    cell: &CellPlacement,
    label: &RenderedLabel<'_>,
    logos: &LogoImages,
    contact: &ContactInfo,
    config: &LayoutConfig,
) -> Result<()> {
    let rect = cell.rect();

    doc.push(Command::FillRect {
        rect,
        color: label.request.background_color.rgb(),
    });
    let inset = config.border_width / 2.0;
    doc.push(Command::StrokeRect {
        rect: Rect::new(
            rect.left() + inset,
            rect.bottom() + inset,
            rect.size.width - config.border_width,
            rect.size.height - config.border_width,
        ),
        color: BLACK,
        width: config.border_width,
    });

    let text_x = rect.left() + config.margin;
    let text_top = rect.top() - config.margin;
    for (line, offset) in label.text_lines(contact).into_iter().zip(config.line_offsets) {
        let y = text_top - offset;
        doc.push(Command::Text {
            origin: Point::new(text_x, y),
            size: config.font_size,
            text: line.left,
        });
        if let Some(right) = line.right {
            doc.push(Command::Text {
                origin: Point::new(text_x + config.second_column, y),
                size: config.font_size,
                text: right,
            });
        }
    }

    let fields = label.qr_fields();
    let qr_image = qr::encode(&fields)?;
    let qr_id = doc.add_image(ImageResource::from_gray(
        qr_image,
        ImageSource::Qr {
            payload: fields.payload(),
        },
    ));
    doc.push(Command::Image {
        image: qr_id,
        rect: Rect::new(
            rect.right() - config.margin - config.qr_size,
            rect.bottom() + config.margin,
            config.qr_size,
            config.qr_size,
        ),
    });

    let logo_y = rect.top() - config.logo_top_offset;
    let logo = config.logo_size;
    if let Some(left) = logos.left {
        doc.push(Command::Image {
            image: left,
            rect: Rect::new(rect.left() + config.margin, logo_y, logo.width, logo.height),
        });
    }
    if let Some(right) = logos.right {
        doc.push(Command::Image {
            image: right,
            rect: Rect::new(
                rect.right() - config.margin - logo.width,
                logo_y,
                logo.width,
                logo.height,
            ),
        });
    }

    Ok(())
}
