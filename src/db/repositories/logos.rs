use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{
    helpers::{format_datetime, parse_datetime, parse_slot},
    models::LogoAsset,
    Database,
};
use crate::error::Result as StoreResult;
use crate::models::LogoSlot;

fn row_to_logo(row: &Row) -> Result<LogoAsset> {
    let slot: String = row.get("slot")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(LogoAsset {
        slot: parse_slot(&slot)?,
        image_bytes: row.get("image")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

impl Database {
    /// Replace the image for `slot`, creating it on first upload.
    pub fn upsert_logo(&self, slot: LogoSlot, image_bytes: &[u8]) -> StoreResult<()> {
        self.execute(|conn| {
            conn.execute(
                "INSERT INTO logos (slot, image, updated_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(slot) DO UPDATE SET
                     image = excluded.image,
                     updated_at = excluded.updated_at",
                params![slot.as_str(), image_bytes, format_datetime(&Utc::now())],
            )?;
            Ok(())
        })
    }

    pub fn get_logo(&self, slot: LogoSlot) -> StoreResult<Option<Vec<u8>>> {
        self.execute(move |conn| {
            let bytes = conn
                .query_row(
                    "SELECT image FROM logos WHERE slot = ?1",
                    params![slot.as_str()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(bytes)
        })
    }

    pub fn get_logo_asset(&self, slot: LogoSlot) -> StoreResult<Option<LogoAsset>> {
        self.execute(move |conn| {
            let mut stmt =
                conn.prepare("SELECT slot, image, updated_at FROM logos WHERE slot = ?1")?;
            let mut rows = stmt.query(params![slot.as_str()])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_logo(row)?)),
                None => Ok(None),
            }
        })
    }

    pub fn logo_exists(&self, slot: LogoSlot) -> StoreResult<bool> {
        self.execute(move |conn| {
            let found: Option<i64> = conn
                .query_row(
                    "SELECT 1 FROM logos WHERE slot = ?1",
                    params![slot.as_str()],
                    |row| row.get(0),
                )
                .optional()?;
            Ok(found.is_some())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_round_trip_is_byte_identical() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("logos.sqlite3")).unwrap();
        let bytes: Vec<u8> = (0..=255u8).cycle().take(4_096).collect();

        assert!(!db.logo_exists(LogoSlot::Left).unwrap());
        assert!(db.get_logo(LogoSlot::Left).unwrap().is_none());

        db.upsert_logo(LogoSlot::Left, &bytes).unwrap();

        assert!(db.logo_exists(LogoSlot::Left).unwrap());
        assert!(!db.logo_exists(LogoSlot::Right).unwrap());
        assert_eq!(db.get_logo(LogoSlot::Left).unwrap().unwrap(), bytes);
    }

    #[test]
    fn upsert_replaces_existing_slot() {
        let dir = tempfile::tempdir().unwrap();
        let db = Database::new(dir.path().join("logos.sqlite3")).unwrap();

        db.upsert_logo(LogoSlot::Right, b"old").unwrap();
        db.upsert_logo(LogoSlot::Right, b"new").unwrap();

        let asset = db.get_logo_asset(LogoSlot::Right).unwrap().unwrap();
        assert_eq!(asset.slot, LogoSlot::Right);
        assert_eq!(asset.image_bytes, b"new");

        let rows: i64 = db
            .execute(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM logos", [], |row| row.get(0))?))
            .unwrap();
        assert_eq!(rows, 1);
    }
}
