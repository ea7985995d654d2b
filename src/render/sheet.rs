//! One synchronous pass from a label request to a paged document.

use anyhow::anyhow;
use chrono::{Days, Local, NaiveDate};

use super::canvas::Document;
use super::label::{draw_label, LogoImages, RenderedLabel};
use super::pdf::document_to_pdf;
use super::ContactInfo;
use crate::error::{Error, Result};
use crate::layout::{GridSpec, LayoutConfig, Paginator};
use crate::models::LabelRequest;

/// Raw logo bytes as stored; `None` slots are left blank.
#[derive(Debug, Clone, Copy, Default)]
pub struct SheetLogos<'a> {
    pub left: Option<&'a [u8]>,
    pub right: Option<&'a [u8]>,
}

#[derive(Debug, Clone)]
pub struct SheetOptions {
    /// Defaults to today when unset
    pub production_date: Option<NaiveDate>,
    pub shelf_life_days: u32,
    pub contact: ContactInfo,
    pub layout: LayoutConfig,
}

impl Default for SheetOptions {
    fn default() -> Self {
        Self {
            production_date: None,
            shelf_life_days: 365,
            contact: ContactInfo::default(),
            layout: LayoutConfig::default(),
        }
    }
}

impl SheetOptions {
    /// Production and expiry dates. A shelf life running past the last
    /// representable date is a settings error.
    fn dates(&self) -> Result<(NaiveDate, NaiveDate)> {
        let production = self
            .production_date
            .unwrap_or_else(|| Local::now().date_naive());
        let expiry = production
            .checked_add_days(Days::new(u64::from(self.shelf_life_days)))
            .ok_or_else(|| {
                Error::Settings(anyhow!(
                    "shelf life of {} days from {} is out of range",
                    self.shelf_life_days,
                    production
                ))
            })?;
        Ok((production, expiry))
    }
}

/// Draw `request.total_count` labels onto as many pages as the grid needs.
///
/// Logos are decoded once up front, so a corrupt asset fails before any
/// label is drawn.
pub fn build_sheet(
    request: &LabelRequest,
    logos: SheetLogos<'_>,
    options: &SheetOptions,
) -> Result<Document> {
    let config = &options.layout;
    let paginator = Paginator::new(GridSpec::try_from(config)?);
    let (production_date, expiry_date) = options.dates()?;

    let total = request.total_count;
    let page_count = paginator.page_count(total);
    let mut doc = Document::new(config.page_size);
    doc.pages.reserve(page_count as usize);
    let logo_ids = LogoImages::register(&mut doc, logos.left, logos.right)?;

    for cell in paginator.cells(total) {
        if cell.index == 0 || cell.starts_new_page {
            doc.start_page();
        }
        let label = RenderedLabel {
            request,
            index: cell.index + 1,
            total,
            production_date,
            expiry_date,
        };
        draw_label(&mut doc, &cell, &label, &logo_ids, &options.contact, config)?;
        doc.current_page().cells.push(cell);
    }

    log::debug!("Built label sheet: {} labels on {} pages", total, page_count);
    Ok(doc)
}

/// [`build_sheet`] followed by PDF serialization.
pub fn generate_pdf(
    request: &LabelRequest,
    logos: SheetLogos<'_>,
    options: &SheetOptions,
) -> Result<Vec<u8>> {
    let doc = build_sheet(request, logos, options)?;
    Ok(document_to_pdf(&doc))
}
