use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    helpers::{format_datetime, parse_datetime, to_u32},
    models::LabelRecord,
    Database,
};
use crate::error::Result as StoreResult;
use crate::models::{BackgroundColor, LabelRequest};

const SELECT_COLUMNS: &str = "SELECT id, client, product, quantity, package_index, total_count,
        lot_code, purchase_order, background_color, created_at
 FROM label_records";

fn row_to_label_record(row: &Row) -> Result<LabelRecord> {
    let created_at: String = row.get("created_at")?;
    let background_color: String = row.get("background_color")?;

    Ok(LabelRecord {
        id: row.get("id")?,
        client: row.get("client")?,
        product: row.get("product")?,
        quantity: to_u32(row.get("quantity")?, "quantity")?,
        package_index: to_u32(row.get("package_index")?, "package_index")?,
        total_count: to_u32(row.get("total_count")?, "total_count")?,
        lot_code: row.get("lot_code")?,
        purchase_order: row.get("purchase_order")?,
        background_color: BackgroundColor::from_name(&background_color),
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    /// Append a history entry stamped with the current time.
    pub fn insert_label_record(&self, request: &LabelRequest) -> StoreResult<LabelRecord> {
        self.execute(|conn| {
            let created_at = Utc::now();

            conn.execute(
                "INSERT INTO label_records (
                    client, product, quantity, package_index, total_count,
                    lot_code, purchase_order, background_color, created_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    request.client,
                    request.product,
                    request.quantity,
                    request.package_index,
                    request.total_count,
                    request.lot_code,
                    request.purchase_order,
                    request.background_color.as_str(),
                    format_datetime(&created_at),
                ],
            )?;

            let id = conn.last_insert_rowid();
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
            let mut rows = stmt.query(params![id])?;
            match rows.next()? {
                Some(row) => row_to_label_record(row),
                None => Err(anyhow!("label record {id} not found after insert")),
            }
        })
    }

    /// All history entries, most recent first. Entries sharing a timestamp
    /// come back in reverse insertion order.
    pub fn list_label_records(&self) -> StoreResult<Vec<LabelRecord>> {
        self.execute(|conn| {
            let mut stmt =
                conn.prepare(&format!("{SELECT_COLUMNS} ORDER BY created_at DESC, id DESC"))?;

            let mut rows = stmt.query([])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(row_to_label_record(row)?);
            }

            Ok(records)
        })
    }

    pub fn get_label_record(&self, id: i64) -> StoreResult<Option<LabelRecord>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))?;
            let record = stmt
                .query_row(params![id], |row| Ok(row_to_label_record(row)))
                .optional()?
                .transpose()?;
            Ok(record)
        })
    }

    /// Returns whether a row was removed. Unknown ids are not an error.
    pub fn delete_label_record(&self, id: i64) -> StoreResult<bool> {
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM label_records WHERE id = ?1", params![id])?;
            Ok(rows_affected > 0)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_db() -> (TempDir, Database) {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("history.sqlite3")).unwrap();
        (dir, db)
    }

    fn request(client: &str) -> LabelRequest {
        LabelRequest {
            client: client.into(),
            product: "Widget".into(),
            quantity: 12,
            package_index: 3,
            total_count: 10,
            lot_code: "L1".into(),
            purchase_order: "PO9".into(),
            background_color: BackgroundColor::Blue,
        }
    }

    #[test]
    fn insert_assigns_increasing_ids() {
        let (_dir, db) = open_db();
        let first = db.insert_label_record(&request("A")).unwrap();
        let second = db.insert_label_record(&request("B")).unwrap();

        assert!(second.id > first.id);
        assert_eq!(first.request(), request("A"));
        assert_eq!(second.background_color, BackgroundColor::Blue);
    }

    #[test]
    fn list_is_most_recent_first() {
        let (_dir, db) = open_db();
        assert!(db.list_label_records().unwrap().is_empty());

        for client in ["A", "B", "C", "D"] {
            db.insert_label_record(&request(client)).unwrap();
        }

        let records = db.list_label_records().unwrap();
        let clients: Vec<_> = records.iter().map(|r| r.client.as_str()).collect();
        assert_eq!(clients, ["D", "C", "B", "A"]);
        assert!(records
            .windows(2)
            .all(|pair| pair[0].created_at >= pair[1].created_at));
    }

    #[test]
    fn identical_timestamps_keep_last_insert_first() {
        let (_dir, db) = open_db();
        db.execute(|conn| {
            for client in ["first", "second"] {
                conn.execute(
                    "INSERT INTO label_records (
                        client, product, quantity, package_index, total_count,
                        lot_code, purchase_order, background_color, created_at
                     ) VALUES (?1, 'P', 1, 1, 1, 'L', 'O', 'White', '2025-01-01T00:00:00.000000Z')",
                    params![client],
                )?;
            }
            Ok(())
        })
        .unwrap();

        let records = db.list_label_records().unwrap();
        assert_eq!(records[0].client, "second");
        assert_eq!(records[1].client, "first");
    }

    #[test]
    fn delete_unknown_id_is_a_no_op() {
        let (_dir, db) = open_db();
        let kept = db.insert_label_record(&request("A")).unwrap();

        assert!(!db.delete_label_record(kept.id + 100).unwrap());
        assert_eq!(db.list_label_records().unwrap().len(), 1);
    }

    #[test]
    fn delete_removes_exactly_one_record() {
        let (_dir, db) = open_db();
        let a = db.insert_label_record(&request("A")).unwrap();
        let b = db.insert_label_record(&request("B")).unwrap();

        assert!(db.delete_label_record(a.id).unwrap());
        assert!(!db.delete_label_record(a.id).unwrap());

        let remaining = db.list_label_records().unwrap();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id, b.id);
        assert!(db.get_label_record(a.id).unwrap().is_none());
        assert_eq!(db.get_label_record(b.id).unwrap().unwrap().client, "B");
    }

    #[test]
    fn unknown_stored_color_reads_as_white() {
        let (_dir, db) = open_db();
        let record = db.insert_label_record(&request("A")).unwrap();
        db.execute(move |conn| {
            conn.execute(
                "UPDATE label_records SET background_color = 'Magenta' WHERE id = ?1",
                params![record.id],
            )?;
            Ok(())
        })
        .unwrap();

        let loaded = db.get_label_record(record.id).unwrap().unwrap();
        assert_eq!(loaded.background_color, BackgroundColor::White);
    }
}
