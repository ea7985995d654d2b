use std::io::Cursor;

use chrono::NaiveDate;
use image::{ImageFormat, Rgba, RgbaImage};
use rotulos_lib::db::Database;
use rotulos_lib::labels::commands;
use rotulos_lib::models::{BackgroundColor, LabelRequest, LogoSlot};
use rotulos_lib::print::{PrintResult, PrintSink};
use rotulos_lib::render::{build_sheet, SheetLogos, SheetOptions};
use rotulos_lib::settings::SettingsStore;
use rotulos_lib::AppState;
use tempfile::TempDir;

struct NullSink;

impl PrintSink for NullSink {
    fn print(&self, _pdf: &[u8], _printer: Option<&str>) -> PrintResult<()> {
        Ok(())
    }
}

fn acme(total_count: u32) -> LabelRequest {
    LabelRequest {
        client: "ACME".into(),
        product: "Widget".into(),
        quantity: 25,
        package_index: 1,
        total_count,
        lot_code: "L1".into(),
        purchase_order: "PO9".into(),
        background_color: BackgroundColor::White,
    }
}

fn translucent_png() -> Vec<u8> {
    let image = RgbaImage::from_fn(12, 6, |x, _| Rgba([0, 80, 160, if x < 6 { 255 } else { 90 }]));
    let mut bytes = Cursor::new(Vec::new());
    image.write_to(&mut bytes, ImageFormat::Png).unwrap();
    bytes.into_inner()
}

fn state() -> (TempDir, AppState) {
    let dir = tempfile::tempdir().unwrap();
    let state = AppState::open(
        dir.path().join("rotulos.json"),
        Some(dir.path().join("history").join("rotulos.sqlite3")),
    )
    .unwrap();
    let state = AppState::new(state.db, state.settings, Box::new(NullSink));
    (dir, state)
}

fn pdf_pages(bytes: &[u8]) -> usize {
    lopdf::Document::load_mem(bytes).unwrap().get_pages().len()
}

#[test]
fn ten_acme_labels_print_on_two_pages() {
    let (_dir, state) = state();
    let date = NaiveDate::from_ymd_opt(2025, 3, 1);

    let pdf = commands::generate_label_pdf(&state, &acme(10), date).unwrap();
    assert_eq!(pdf_pages(&pdf), 2);
}

#[test]
fn page_count_rounds_up_by_eight() {
    let (_dir, state) = state();
    for (total, pages) in [(1, 1), (8, 1), (9, 2), (16, 2), (17, 3)] {
        let pdf = commands::generate_label_pdf(&state, &acme(total), None).unwrap();
        assert_eq!(pdf_pages(&pdf), pages, "total {total}");
    }
}

#[test]
fn logos_with_alpha_are_embedded_and_stored_byte_identical() {
    let (_dir, state) = state();
    let logo = translucent_png();
    commands::upload_logo(&state, LogoSlot::Left, &logo).unwrap();
    commands::upload_logo(&state, LogoSlot::Right, &logo).unwrap();
    assert_eq!(state.db.get_logo(LogoSlot::Left).unwrap(), Some(logo));

    let pdf = commands::generate_label_pdf(&state, &acme(3), None).unwrap();
    let parsed = lopdf::Document::load_mem(&pdf).unwrap();
    assert_eq!(parsed.get_pages().len(), 1);

    let masked = parsed
        .objects
        .values()
        .filter_map(|object| object.as_stream().ok())
        .filter(|stream| stream.dict.has(b"SMask"))
        .count();
    assert_eq!(masked, 2);
}

#[test]
fn history_round_trip_through_the_actions() {
    let (_dir, state) = state();
    let first = commands::save_label(&state, &acme(4)).unwrap();
    let mut other = acme(2);
    other.client = "Bodega Sur".into();
    let second = commands::save_label(&state, &other).unwrap();

    let history = commands::list_history(&state).unwrap();
    let ids: Vec<i64> = history.iter().map(|record| record.id).collect();
    assert_eq!(ids, [second.id, first.id]);

    assert!(commands::delete_history_entry(&state, first.id).unwrap());
    assert!(!commands::delete_history_entry(&state, first.id + 100).unwrap());
    assert_eq!(commands::list_history(&state).unwrap().len(), 1);

    let xlsx = commands::export_history(&state).unwrap();
    assert!(xlsx.starts_with(b"PK"));
}

#[test]
fn database_reopens_with_existing_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("rotulos.sqlite3");
    let record = Database::new(path.clone())
        .unwrap()
        .insert_label_record(&acme(1))
        .unwrap();

    let reopened = Database::new(path).unwrap();
    assert_eq!(reopened.get_label_record(record.id).unwrap(), Some(record));
}

#[test]
fn sheet_without_logos_matches_sheet_with_logos_apart_from_images() {
    let settings = SettingsStore::new(tempfile::tempdir().unwrap().path().join("s.json")).unwrap();
    let options = SheetOptions {
        production_date: NaiveDate::from_ymd_opt(2025, 3, 1),
        ..settings.settings().sheet_options()
    };
    let logo = translucent_png();

    let plain = build_sheet(&acme(10), SheetLogos::default(), &options).unwrap();
    let decorated = build_sheet(
        &acme(10),
        SheetLogos {
            left: Some(&logo),
            right: None,
        },
        &options,
    )
    .unwrap();

    assert_eq!(plain.pages.len(), decorated.pages.len());
    for (a, b) in plain.pages.iter().zip(&decorated.pages) {
        assert_eq!(a.cells, b.cells);
    }
}
