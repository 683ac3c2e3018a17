//! V002: remediation_log, the append-only audit trail of researched ranges.
//!
//! UPDATE and DELETE are rejected by triggers.

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS remediation_log (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    material TEXT NOT NULL,
    category TEXT NOT NULL,
    property TEXT NOT NULL,
    min_value REAL,
    max_value REAL,
    unit TEXT NOT NULL,
    method TEXT NOT NULL,
    confidence REAL NOT NULL,
    recorded_at TEXT NOT NULL
) STRICT;

CREATE INDEX IF NOT EXISTS idx_remediation_key ON remediation_log(category, property);

CREATE TRIGGER IF NOT EXISTS remediation_log_no_update
BEFORE UPDATE ON remediation_log
BEGIN
    SELECT RAISE(ABORT, 'remediation_log is append-only');
END;

CREATE TRIGGER IF NOT EXISTS remediation_log_no_delete
BEFORE DELETE ON remediation_log
BEGIN
    SELECT RAISE(ABORT, 'remediation_log is append-only');
END;
"#;
