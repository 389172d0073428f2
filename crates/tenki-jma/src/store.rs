//! Persisted forecast cache.
//!
//! One SQLite table with a unique constraint on `(area_code, date)`. Rows
//! are inserted with insert-or-skip semantics: the first successful write
//! for a key wins permanently, later collisions are silent no-ops. There is
//! no update, delete, or retention path.

use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

use crate::error::StoreError;
use crate::types::ForecastRecord;

pub struct ForecastStore {
    conn: Connection,
}

impl ForecastStore {
    /// Open (or create) the store at `path`. The schema is created
    /// idempotently, so calling this on every startup is safe.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(StoreError::Open)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    /// In-memory store for isolated test instances.
    pub fn in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::Open)?;
        let store = Self { conn };
        store.init_schema()?;
        Ok(store)
    }

    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS forecasts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                area_code TEXT NOT NULL,
                date TEXT NOT NULL,
                weather TEXT NOT NULL,
                temp_min INTEGER,
                temp_max INTEGER,
                UNIQUE (area_code, date)
            );
            "#,
        )?;
        Ok(())
    }

    /// Insert-or-skip. A row already cached for `(area_code, date)` is left
    /// untouched; whether the row was newly created is not reported.
    pub fn upsert(&self, record: &ForecastRecord) -> Result<(), StoreError> {
        self.conn.execute(
            "INSERT OR IGNORE INTO forecasts (area_code, date, weather, temp_min, temp_max)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                record.area_code,
                record.date,
                record.weather,
                record.temp_min,
                record.temp_max,
            ],
        )?;
        Ok(())
    }

    /// Records for an area ordered by ascending date, at most `limit` rows.
    pub fn recent(&self, area_code: &str, limit: usize) -> Result<Vec<ForecastRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT area_code, date, weather, temp_min, temp_max
             FROM forecasts
             WHERE area_code = ?1
             ORDER BY date ASC
             LIMIT ?2",
        )?;

        let records = stmt
            .query_map(params![area_code, limit as i64], Self::record_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    /// The single record for `(area_code, date)`, or `None` when nothing is
    /// cached for that day.
    pub fn by_date(
        &self,
        area_code: &str,
        date: NaiveDate,
    ) -> Result<Option<ForecastRecord>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT area_code, date, weather, temp_min, temp_max
             FROM forecasts
             WHERE area_code = ?1 AND date = ?2",
        )?;

        let record = stmt
            .query_row(params![area_code, date], Self::record_from_row)
            .optional()?;
        Ok(record)
    }

    fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ForecastRecord> {
        Ok(ForecastRecord {
            area_code: row.get(0)?,
            date: row.get(1)?,
            weather: row.get(2)?,
            temp_min: row.get(3)?,
            temp_max: row.get(4)?,
        })
    }
}
