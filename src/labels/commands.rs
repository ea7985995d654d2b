use std::fs;
use std::io::ErrorKind;

use chrono::NaiveDate;

use crate::{
    db::models::LabelRecord,
    error::Result,
    models::{LabelRequest, LogoSlot},
    print::PrintError,
    render::{self, label::decode_logo, SheetLogos},
    AppState,
};
use crate::{log_info, log_warn};

const ENABLE_LOGS: bool = true;

/// A generated sheet plus the print dispatch outcome.
#[derive(Debug)]
pub struct PrintOutcome {
    pub pdf: Vec<u8>,
    /// Set when the sheet could not be handed to the printer
    pub warning: Option<PrintError>,
}

/// PNG preview of `request` with the configured contact lines.
pub fn preview_label(state: &AppState, request: &LabelRequest) -> Result<Vec<u8>> {
    request.validate()?;
    let contact = state.settings.settings().contact();
    render::encode_png(&render::render_preview(request, &contact))
}

pub fn save_label(state: &AppState, request: &LabelRequest) -> Result<LabelRecord> {
    request.validate()?;
    let record = state.db.insert_label_record(request)?;
    log_info!("Saved label {} for {}", record.id, record.client);
    Ok(record)
}

/// Full PDF sheet for `request.total_count` labels using the stored logos.
pub fn generate_label_pdf(
    state: &AppState,
    request: &LabelRequest,
    production_date: Option<NaiveDate>,
) -> Result<Vec<u8>> {
    request.validate()?;

    let left = state.db.get_logo(LogoSlot::Left)?;
    let right = state.db.get_logo(LogoSlot::Right)?;
    let mut options = state.settings.settings().sheet_options();
    options.production_date = production_date;

    let logos = SheetLogos {
        left: left.as_deref(),
        right: right.as_deref(),
    };
    let pdf = render::generate_pdf(request, logos, &options)?;
    log_info!(
        "Generated {} labels for {} ({} bytes)",
        request.total_count,
        request.client,
        pdf.len()
    );
    Ok(pdf)
}

/// Generate the sheet and send it to the configured printer. A failed
/// dispatch is returned as a warning next to the PDF.
pub fn print_labels(
    state: &AppState,
    request: &LabelRequest,
    production_date: Option<NaiveDate>,
) -> Result<PrintOutcome> {
    let pdf = generate_label_pdf(state, request, production_date)?;
    let printer = state.settings.settings().printer;

    let warning = match state.print_sink.print(&pdf, printer.as_deref()) {
        Ok(()) => None,
        Err(err) => {
            log_warn!("Printing failed, PDF kept: {}", err);
            Some(err)
        }
    };
    Ok(PrintOutcome { pdf, warning })
}

pub fn list_history(state: &AppState) -> Result<Vec<LabelRecord>> {
    state.db.list_label_records()
}

/// The request stored under `id`, ready to be edited and re-issued.
pub fn reuse_from_history(state: &AppState, id: i64) -> Result<Option<LabelRequest>> {
    Ok(state.db.get_label_record(id)?.map(|record| record.request()))
}

pub fn delete_history_entry(state: &AppState, id: i64) -> Result<bool> {
    let deleted = state.db.delete_label_record(id)?;
    if deleted {
        log_info!("Deleted history entry {}", id);
    }
    Ok(deleted)
}

pub fn export_history(state: &AppState) -> Result<Vec<u8>> {
    state.db.export_all_as_spreadsheet()
}

/// Replace the logo in `slot`. Bytes that do not decode are rejected.
pub fn upload_logo(state: &AppState, slot: LogoSlot, image_bytes: &[u8]) -> Result<()> {
    decode_logo(slot, image_bytes)?;
    state.db.upsert_logo(slot, image_bytes)?;
    log_info!("Stored {} logo ({} bytes)", slot, image_bytes.len());
    Ok(())
}

/// First-run import of the default logo files into empty slots.
///
/// Missing or undecodable files are logged and skipped. Returns the slots
/// that were filled.
pub fn seed_default_logos(state: &AppState) -> Result<Vec<LogoSlot>> {
    let settings = state.settings.settings();
    let mut seeded = Vec::new();

    for slot in LogoSlot::ALL {
        if state.db.logo_exists(slot)? {
            continue;
        }

        let path = state.settings.resolve(settings.default_logo(slot));
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log_warn!("Default {} logo not found at {}", slot, path.display());
                continue;
            }
            Err(err) => return Err(err.into()),
        };

        if let Err(err) = decode_logo(slot, &bytes) {
            log_warn!("Skipping default logo {}: {}", path.display(), err);
            continue;
        }
        state.db.upsert_logo(slot, &bytes)?;
        log_info!("Seeded {} logo from {}", slot, path.display());
        seeded.push(slot);
    }

    Ok(seeded)
}
