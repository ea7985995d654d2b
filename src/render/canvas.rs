//! Backend-neutral drawing model for label sheets.
//!
//! Renderers push [`Command`]s onto the current [`Page`] of a [`Document`];
//! `render::pdf` turns the finished document into PDF bytes.

use std::collections::BTreeSet;

use image::{DynamicImage, GrayImage};

use crate::layout::{CellPlacement, Point, Rect, Size};
use crate::models::LogoSlot;

pub type ImageId = usize;

#[derive(Debug, Clone, PartialEq)]
pub enum ImageSource {
    Qr { payload: String },
    Logo(LogoSlot),
}

#[derive(Debug, Clone, PartialEq)]
pub enum ImagePixels {
    Gray(Vec<u8>),
    Rgb { rgb: Vec<u8>, alpha: Option<Vec<u8>> },
}

/// Raster embedded in the document, referenced by [`ImageId`].
#[derive(Debug, Clone, PartialEq)]
pub struct ImageResource {
    pub source: ImageSource,
    pub width: u32,
    pub height: u32,
    pub pixels: ImagePixels,
}

impl ImageResource {
    pub fn from_gray(image: GrayImage, source: ImageSource) -> Self {
        let (width, height) = image.dimensions();
        Self {
            source,
            width,
            height,
            pixels: ImagePixels::Gray(image.into_raw()),
        }
    }

    /// Splits color and alpha; the alpha plane is dropped when fully opaque.
    pub fn from_dynamic(image: &DynamicImage, source: ImageSource) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let rgb = rgba
            .pixels()
            .flat_map(|p| [p.0[0], p.0[1], p.0[2]])
            .collect();
        let alpha = has_alpha.then(|| rgba.pixels().map(|p| p.0[3]).collect());

        Self {
            source,
            width,
            height,
            pixels: ImagePixels::Rgb { rgb, alpha },
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    FillRect { rect: Rect, color: [u8; 3] },
    StrokeRect { rect: Rect, color: [u8; 3], width: f32 },
    /// Black text, baseline starting at `origin`
    Text { origin: Point, size: f32, text: String },
    Image { image: ImageId, rect: Rect },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub commands: Vec<Command>,
    pub cells: Vec<CellPlacement>,
}

impl Page {
    pub fn image_ids(&self) -> BTreeSet<ImageId> {
        self.commands
            .iter()
            .filter_map(|command| match command {
                Command::Image { image, .. } => Some(*image),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub page_size: Size,
    pub pages: Vec<Page>,
    pub images: Vec<ImageResource>,
}

impl Document {
    pub fn new(page_size: Size) -> Self {
        Self {
            page_size,
            pages: Vec::new(),
            images: Vec::new(),
        }
    }

    pub fn start_page(&mut self) {
        self.pages.push(Page::default());
    }

    /// The page being drawn. Opens the first page on demand.
    pub fn current_page(&mut self) -> &mut Page {
        if self.pages.is_empty() {
            self.start_page();
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn push(&mut self, command: Command) {
        self.current_page().commands.push(command);
    }

    pub fn add_image(&mut self, image: ImageResource) -> ImageId {
        self.images.push(image);
        self.images.len() - 1
    }
}
