//! V001: category_ranges, one row per (category, canonical property).

pub const MIGRATION_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS category_ranges (
    category TEXT NOT NULL,
    property TEXT NOT NULL,
    min_value REAL,
    max_value REAL,
    unit TEXT NOT NULL,
    confidence REAL NOT NULL CHECK (confidence >= 0.0 AND confidence <= 1.0),
    method TEXT NOT NULL,
    auto_generated INTEGER NOT NULL DEFAULT 0,
    qualitative INTEGER NOT NULL DEFAULT 0,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (category, property),
    CHECK (min_value IS NULL OR max_value IS NULL OR min_value <= max_value),
    CHECK (qualitative = 0 OR (min_value IS NULL AND max_value IS NULL AND auto_generated = 0))
) STRICT;

CREATE INDEX IF NOT EXISTS idx_category_ranges_method ON category_ranges(method);
"#;
