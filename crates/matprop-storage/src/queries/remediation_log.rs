//! Queries for the remediation_log table. Insert and select only.

use matprop_core::errors::StorageError;
use matprop_core::RemediationRecord;
use rusqlite::{params, Connection};

use super::{format_timestamp, parse_method, parse_timestamp};
use crate::to_storage_err;

/// Append one record. Returns the row id.
pub fn insert(conn: &Connection, record: &RemediationRecord) -> Result<i64, StorageError> {
    conn.execute(
        "INSERT INTO remediation_log
            (material, category, property, min_value, max_value, unit, method,
             confidence, recorded_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.material,
            record.category,
            record.property,
            record.min,
            record.max,
            record.unit,
            record.method.as_str(),
            record.confidence,
            format_timestamp(&record.recorded_at),
        ],
    )
    .map_err(to_storage_err)?;
    Ok(conn.last_insert_rowid())
}

/// Every record in insertion order.
pub fn all(conn: &Connection) -> Result<Vec<RemediationRecord>, StorageError> {
    let mut stmt = conn
        .prepare_cached(
            "SELECT material, category, property, min_value, max_value, unit, method,
                    confidence, recorded_at
             FROM remediation_log ORDER BY id",
        )
        .map_err(to_storage_err)?;

    let rows = stmt
        .query_map([], |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, Option<f64>>(3)?,
                row.get::<_, Option<f64>>(4)?,
                row.get::<_, String>(5)?,
                row.get::<_, String>(6)?,
                row.get::<_, f64>(7)?,
                row.get::<_, String>(8)?,
            ))
        })
        .map_err(to_storage_err)?;

    let mut out = Vec::new();
    for row in rows {
        let (material, category, property, min, max, unit, method, confidence, recorded_at) =
            row.map_err(to_storage_err)?;
        out.push(RemediationRecord {
            material,
            category,
            property,
            min,
            max,
            unit,
            method: parse_method(&method)?,
            confidence,
            recorded_at: parse_timestamp(&recorded_at)?,
        });
    }
    Ok(out)
}

/// Total number of log rows.
pub fn count(conn: &Connection) -> Result<i64, StorageError> {
    conn.query_row("SELECT COUNT(*) FROM remediation_log", [], |row| row.get(0))
        .map_err(to_storage_err)
}
