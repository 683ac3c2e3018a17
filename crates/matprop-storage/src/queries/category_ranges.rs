//! Queries for the category_ranges table.

use matprop_core::errors::StorageError;
use matprop_core::CategoryRange;
use rusqlite::{params, Connection, OptionalExtension, Row};

use super::{format_timestamp, parse_method, parse_timestamp};
use crate::to_storage_err;

const COLUMNS: &str = "category, property, min_value, max_value, unit, confidence, method,
                       auto_generated, qualitative, updated_at";

/// Raw row before the method and timestamp text are decoded.
struct RangeRow {
    category: String,
    property: String,
    min: Option<f64>,
    max: Option<f64>,
    unit: String,
    confidence: f64,
    method: String,
    auto_generated: bool,
    qualitative: bool,
    updated_at: String,
}

impl RangeRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            category: row.get(0)?,
            property: row.get(1)?,
            min: row.get(2)?,
            max: row.get(3)?,
            unit: row.get(4)?,
            confidence: row.get(5)?,
            method: row.get(6)?,
            auto_generated: row.get(7)?,
            qualitative: row.get(8)?,
            updated_at: row.get(9)?,
        })
    }

    fn into_range(self) -> Result<CategoryRange, StorageError> {
        Ok(CategoryRange {
            category: self.category,
            property: self.property,
            min: self.min,
            max: self.max,
            unit: self.unit,
            confidence: self.confidence,
            method: parse_method(&self.method)?,
            auto_generated: self.auto_generated,
            qualitative: self.qualitative,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

/// Fetch one range.
pub fn get(
    conn: &Connection,
    category: &str,
    property: &str,
) -> Result<Option<CategoryRange>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM category_ranges WHERE category = ?1 AND property = ?2"
        ))
        .map_err(to_storage_err)?;
    let row = stmt
        .query_row(params![category, property], RangeRow::from_row)
        .optional()
        .map_err(to_storage_err)?;
    row.map(RangeRow::into_range).transpose()
}

/// Insert or replace the row for the range's key.
pub fn upsert(conn: &Connection, range: &CategoryRange) -> Result<(), StorageError> {
    conn.execute(
        "INSERT INTO category_ranges
            (category, property, min_value, max_value, unit, confidence, method,
             auto_generated, qualitative, updated_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         ON CONFLICT(category, property) DO UPDATE SET
            min_value = excluded.min_value,
            max_value = excluded.max_value,
            unit = excluded.unit,
            confidence = excluded.confidence,
            method = excluded.method,
            auto_generated = excluded.auto_generated,
            qualitative = excluded.qualitative,
            updated_at = excluded.updated_at",
        params![
            range.category,
            range.property,
            range.min,
            range.max,
            range.unit,
            range.confidence,
            range.method.as_str(),
            range.auto_generated,
            range.qualitative,
            format_timestamp(&range.updated_at),
        ],
    )
    .map_err(to_storage_err)?;
    Ok(())
}

/// Insert unless a row exists. Returns true when this call inserted.
pub fn insert_if_absent(conn: &Connection, range: &CategoryRange) -> Result<bool, StorageError> {
    let inserted = conn
        .execute(
            "INSERT INTO category_ranges
                (category, property, min_value, max_value, unit, confidence, method,
                 auto_generated, qualitative, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             ON CONFLICT(category, property) DO NOTHING",
            params![
                range.category,
                range.property,
                range.min,
                range.max,
                range.unit,
                range.confidence,
                range.method.as_str(),
                range.auto_generated,
                range.qualitative,
                format_timestamp(&range.updated_at),
            ],
        )
        .map_err(to_storage_err)?;
    Ok(inserted > 0)
}

/// All ranges for one category, ordered by property.
pub fn for_category(conn: &Connection, category: &str) -> Result<Vec<CategoryRange>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM category_ranges WHERE category = ?1 ORDER BY property"
        ))
        .map_err(to_storage_err)?;
    let rows = stmt
        .query_map(params![category], RangeRow::from_row)
        .map_err(to_storage_err)?;
    collect(rows)
}

/// Every range, ordered by (category, property).
pub fn all(conn: &Connection) -> Result<Vec<CategoryRange>, StorageError> {
    let mut stmt = conn
        .prepare_cached(&format!(
            "SELECT {COLUMNS} FROM category_ranges ORDER BY category, property"
        ))
        .map_err(to_storage_err)?;
    let rows = stmt.query_map([], RangeRow::from_row).map_err(to_storage_err)?;
    collect(rows)
}

/// Total number of range rows.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM category_ranges", [], |row| row.get(0))
        .map_err(to_storage_err)
}

fn collect(
    rows: impl Iterator<Item = rusqlite::Result<RangeRow>>,
) -> Result<Vec<CategoryRange>, StorageError> {
    rows.map(|r| r.map_err(to_storage_err).and_then(RangeRow::into_range))
        .collect()
}
