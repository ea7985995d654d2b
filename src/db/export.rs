use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::db::{helpers::format_datetime, models::LabelRecord, Database};
use crate::error::Result;

const SHEET_NAME: &str = "Historial";

const COLUMNS: [&str; 10] = [
    "id",
    "client",
    "product",
    "quantity",
    "package_index",
    "total_count",
    "lot_code",
    "purchase_order",
    "background_color",
    "created_at",
];

impl Database {
    /// Serialize the whole history as an `.xlsx` workbook, in the same order
    /// as [`Database::list_label_records`].
    pub fn export_all_as_spreadsheet(&self) -> Result<Vec<u8>> {
        let records = self.list_label_records()?;
        let bytes = records_to_xlsx(&records)?;
        log::info!(
            "Exported {} label records ({} bytes)",
            records.len(),
            bytes.len()
        );
        Ok(bytes)
    }
}

fn records_to_xlsx(records: &[LabelRecord]) -> std::result::Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, name) in COLUMNS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, &header)?;
    }

    for (index, record) in records.iter().enumerate() {
        let row = index as u32 + 1;
        sheet.write_number(row, 0, record.id as f64)?;
        sheet.write_string(row, 1, record.client.as_str())?;
        sheet.write_string(row, 2, record.product.as_str())?;
        sheet.write_number(row, 3, f64::from(record.quantity))?;
        sheet.write_number(row, 4, f64::from(record.package_index))?;
        sheet.write_number(row, 5, f64::from(record.total_count))?;
        sheet.write_string(row, 6, record.lot_code.as_str())?;
        sheet.write_string(row, 7, record.purchase_order.as_str())?;
        sheet.write_string(row, 8, record.background_color.as_str())?;
        sheet.write_string(row, 9, format_datetime(&record.created_at))?;
    }

    workbook.save_to_buffer()
}
