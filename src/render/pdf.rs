//! Serialize a [`Document`] into PDF bytes with `pdf-writer`.

use miniz_oxide::deflate::compress_to_vec_zlib;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect as PdfRect, Ref, Str};

use super::canvas::{Command, Document, ImagePixels, ImageResource, Page};
use super::text::to_winansi;

const FONT_NAME: Name<'static> = Name(b"F1");
const COMPRESSION_LEVEL: u8 = 6;

/// Hands out sequential object ids.
struct RefAllocator {
    next: i32,
}

impl RefAllocator {
    fn new() -> Self {
        Self { next: 1 }
    }

    fn alloc(&mut self) -> Ref {
        let id = Ref::new(self.next);
        self.next += 1;
        id
    }
}

fn unit(color: [u8; 3]) -> (f32, f32, f32) {
    (
        color[0] as f32 / 255.0,
        color[1] as f32 / 255.0,
        color[2] as f32 / 255.0,
    )
}

fn image_name(id: usize) -> String {
    format!("Im{id}")
}

fn write_image(pdf: &mut Pdf, refs: &mut RefAllocator, id: Ref, image: &ImageResource) {
    let (data, gray, alpha) = match &image.pixels {
        ImagePixels::Gray(luma) => (luma, true, None),
        ImagePixels::Rgb { rgb, alpha } => (rgb, false, alpha.as_ref()),
    };

    let mask_id = alpha.map(|alpha| {
        let mask_id = refs.alloc();
        let compressed = compress_to_vec_zlib(alpha, COMPRESSION_LEVEL);
        let mut mask = pdf.image_xobject(mask_id, &compressed);
        mask.filter(Filter::FlateDecode);
        mask.width(image.width as i32);
        mask.height(image.height as i32);
        mask.color_space().device_gray();
        mask.bits_per_component(8);
        mask.finish();
        mask_id
    });

    let compressed = compress_to_vec_zlib(data, COMPRESSION_LEVEL);
    let mut xobject = pdf.image_xobject(id, &compressed);
    xobject.filter(Filter::FlateDecode);
    xobject.width(image.width as i32);
    xobject.height(image.height as i32);
    if gray {
        xobject.color_space().device_gray();
    } else {
        xobject.color_space().device_rgb();
    }
    xobject.bits_per_component(8);
    if let Some(mask_id) = mask_id {
        xobject.s_mask(mask_id);
    }
    xobject.finish();
}

/// Flate-compressed content stream for one page.
fn page_content(commands: &[Command]) -> Vec<u8> {
    let mut content = Content::new();
    for command in commands {
        match command {
            Command::FillRect { rect, color } => {
                let (r, g, b) = unit(*color);
                content.set_fill_rgb(r, g, b);
                content.rect(rect.left(), rect.bottom(), rect.size.width, rect.size.height);
                content.fill_nonzero();
            }
            Command::StrokeRect { rect, color, width } => {
                let (r, g, b) = unit(*color);
                content.set_stroke_rgb(r, g, b);
                content.set_line_width(*width);
                content.rect(rect.left(), rect.bottom(), rect.size.width, rect.size.height);
                content.stroke();
            }
            Command::Text { origin, size, text } => {
                let encoded = to_winansi(text);
                content.set_fill_gray(0.0);
                content.begin_text();
                content.set_font(FONT_NAME, *size);
                content.next_line(origin.x, origin.y);
                content.show(Str(&encoded));
                content.end_text();
            }
            Command::Image { image, rect } => {
                let name = image_name(*image);
                content.save_state();
                content.transform([
                    rect.size.width,
                    0.0,
                    0.0,
                    rect.size.height,
                    rect.left(),
                    rect.bottom(),
                ]);
                content.x_object(Name(name.as_bytes()));
                content.restore_state();
            }
        }
    }
    let raw = content.finish();
    compress_to_vec_zlib(raw.as_slice(), COMPRESSION_LEVEL)
}

/// Produce a complete PDF for `doc`. A document without pages still gets
/// one empty page so the output stays a valid file.
pub fn document_to_pdf(doc: &Document) -> Vec<u8> {
    let mut refs = RefAllocator::new();
    let mut pdf = Pdf::new();

    let catalog_id = refs.alloc();
    let tree_id = refs.alloc();
    let font_id = refs.alloc();

    pdf.catalog(catalog_id).pages(tree_id);
    pdf.type1_font(font_id)
        .base_font(Name(b"Helvetica"))
        .encoding_predefined(Name(b"WinAnsiEncoding"));

    let image_ids: Vec<Ref> = doc
        .images
        .iter()
        .map(|image| {
            let id = refs.alloc();
            write_image(&mut pdf, &mut refs, id, image);
            id
        })
        .collect();

    let media_box = PdfRect::new(0.0, 0.0, doc.page_size.width, doc.page_size.height);
    let empty = [Page::default()];
    let pages = if doc.pages.is_empty() {
        &empty[..]
    } else {
        &doc.pages[..]
    };

    let mut page_ids = Vec::with_capacity(pages.len());
    for page in pages {
        let page_id = refs.alloc();
        let content_id = refs.alloc();
        page_ids.push(page_id);

        let compressed = page_content(&page.commands);
        pdf.stream(content_id, &compressed).filter(Filter::FlateDecode);

        let names: Vec<(String, Ref)> = page
            .image_ids()
            .into_iter()
            .filter_map(|id| image_ids.get(id).map(|r| (image_name(id), *r)))
            .collect();

        let mut writer = pdf.page(page_id);
        writer.media_box(media_box);
        writer.parent(tree_id);
        writer.contents(content_id);
        let mut resources = writer.resources();
        resources.fonts().pair(FONT_NAME, font_id);
        if !names.is_empty() {
            let mut x_objects = resources.x_objects();
            for (name, id) in &names {
                x_objects.pair(Name(name.as_bytes()), *id);
            }
        }
        resources.finish();
        writer.finish();
    }

    let count = page_ids.len() as i32;
    pdf.pages(tree_id).kids(page_ids).count(count);
    pdf.finish()
}
