//! Metadata types for the provider boundary.
//!
//! These are the only shapes the builder and the quality assessor depend on.
//! How they were obtained (live introspection, a JSON snapshot, a test
//! fixture) is the provider's business.

use serde::{Deserialize, Serialize};

/// Complete metadata for one table or view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Table name as reported by the database.
    pub name: String,
    /// Physical schema the table lives in, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,
    /// Table comment / documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Columns in ordinal order.
    pub columns: Vec<ColumnMetadata>,
    /// Sampled content statistics, when the provider collected them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_stats: Option<ContentStats>,
}

impl TableMetadata {
    /// Create table metadata with no columns.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            schema: None,
            description: None,
            columns: Vec::new(),
            content_stats: None,
        }
    }

    /// Builder-style: set the physical schema.
    #[must_use]
    pub fn with_schema(mut self, schema: impl Into<String>) -> Self {
        self.schema = Some(schema.into());
        self
    }

    /// Builder-style: set the table documentation.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder-style: append a column.
    #[must_use]
    pub fn with_column(mut self, column: ColumnMetadata) -> Self {
        self.columns.push(column);
        self
    }

    /// Builder-style: attach content statistics.
    #[must_use]
    pub fn with_content_stats(mut self, stats: ContentStats) -> Self {
        self.content_stats = Some(stats);
        self
    }

    /// Physical source identifier (`schema.table` when the schema is known).
    pub fn physical_source(&self) -> String {
        match &self.schema {
            Some(schema) if !schema.is_empty() => format!("{}.{}", schema, self.name),
            _ => self.name.clone(),
        }
    }

    /// Get a column by name (case-insensitive).
    pub fn get_column(&self, name: &str) -> Option<&ColumnMetadata> {
        self.columns.iter().find(|c| c.name.eq_ignore_ascii_case(name))
    }

    /// Primary key column names, in ordinal order.
    pub fn primary_key_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .filter(|c| c.is_primary_key)
            .map(|c| c.name.as_str())
            .collect()
    }

    /// Whether the table declares at least one primary key column.
    pub fn has_primary_key(&self) -> bool {
        self.columns.iter().any(|c| c.is_primary_key)
    }

    /// Column statistics for a column, if content stats were sampled.
    pub fn column_stats(&self, column: &str) -> Option<&ColumnContentStats> {
        self.content_stats
            .as_ref()
            .and_then(|s| s.per_column.iter().find(|c| c.column.eq_ignore_ascii_case(column)))
    }
}

/// Metadata for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnMetadata {
    /// Column name.
    pub name: String,
    /// Database-specific type name (e.g. `VARCHAR(255)`, `NUMBER(38,0)`).
    pub physical_type: String,
    /// Whether NULL values are allowed.
    #[serde(default = "default_nullable")]
    pub nullable: bool,
    /// Whether the column is (part of) the primary key.
    #[serde(default)]
    pub is_primary_key: bool,
    /// Declared foreign key, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreign_key: Option<ForeignKeyRef>,
    /// Column comment / documentation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn default_nullable() -> bool {
    true
}

impl ColumnMetadata {
    /// Create a nullable, non-key column.
    pub fn new(name: impl Into<String>, physical_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            physical_type: physical_type.into(),
            nullable: true,
            is_primary_key: false,
            foreign_key: None,
            description: None,
        }
    }

    /// Builder-style: mark as primary key (implies NOT NULL).
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self.nullable = false;
        self
    }

    /// Builder-style: declare a foreign key.
    #[must_use]
    pub fn references(mut self, table: impl Into<String>, column: impl Into<String>) -> Self {
        self.foreign_key = Some(ForeignKeyRef {
            target_table: table.into(),
            target_column: column.into(),
        });
        self
    }

    /// Builder-style: set nullability.
    #[must_use]
    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }

    /// Builder-style: set documentation.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Target of a declared foreign key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKeyRef {
    /// Referenced table name.
    pub target_table: String,
    /// Referenced column name.
    pub target_column: String,
}

/// Sampled content statistics for a table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentStats {
    /// Number of rows sampled.
    pub row_count: u64,
    /// Per-column statistics.
    #[serde(default)]
    pub per_column: Vec<ColumnContentStats>,
    /// Number of fully duplicated rows in the sample.
    #[serde(default)]
    pub duplicate_row_count: u64,
}

impl ContentStats {
    /// Create empty stats for a sample of `row_count` rows.
    pub fn new(row_count: u64) -> Self {
        Self {
            row_count,
            per_column: Vec::new(),
            duplicate_row_count: 0,
        }
    }

    /// Builder-style: add column statistics.
    #[must_use]
    pub fn with_column(mut self, stats: ColumnContentStats) -> Self {
        self.per_column.push(stats);
        self
    }

    /// Builder-style: set the duplicate row count.
    #[must_use]
    pub fn with_duplicates(mut self, duplicate_row_count: u64) -> Self {
        self.duplicate_row_count = duplicate_row_count;
        self
    }
}

/// Sampled statistics for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnContentStats {
    /// Column name.
    pub column: String,
    /// NULL values in the sample.
    #[serde(default)]
    pub null_count: u64,
    /// Distinct non-NULL values in the sample.
    #[serde(default)]
    pub distinct_count: u64,
    /// Dominant shape of the sampled values, if the sampler classified them.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<ValuePattern>,
    /// Whether text values mix upper- and lower-case spellings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mixed_case: Option<bool>,
}

impl ColumnContentStats {
    /// Create column stats with null and distinct counts.
    pub fn new(column: impl Into<String>, null_count: u64, distinct_count: u64) -> Self {
        Self {
            column: column.into(),
            null_count,
            distinct_count,
            pattern: None,
            mixed_case: None,
        }
    }

    /// Builder-style: set the sampled value pattern.
    #[must_use]
    pub fn with_pattern(mut self, pattern: ValuePattern) -> Self {
        self.pattern = Some(pattern);
        self
    }

    /// Builder-style: flag mixed-case formatting.
    #[must_use]
    pub fn with_mixed_case(mut self, mixed_case: bool) -> Self {
        self.mixed_case = Some(mixed_case);
        self
    }
}

/// Shape of sampled values, as classified by the sampler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuePattern {
    /// Every value parses as a number.
    Numeric,
    /// Every value parses as a date or timestamp.
    Temporal,
    /// Free text.
    Text,
    /// No dominant shape.
    Mixed,
}

/// Sampled rows for one table, fed to the graph codec's content mode.
///
/// Rows are kept in the order the sampler produced them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSample {
    /// Table name (matched against model table names after normalization).
    pub table: String,
    /// Column names, one per value in each row.
    pub columns: Vec<String>,
    /// Row values.
    pub rows: Vec<Vec<serde_json::Value>>,
}

impl TableSample {
    /// Create an empty sample.
    pub fn new(table: impl Into<String>, columns: Vec<String>) -> Self {
        Self {
            table: table.into(),
            columns,
            rows: Vec::new(),
        }
    }

    /// Builder-style: append a row.
    #[must_use]
    pub fn with_row(mut self, row: Vec<serde_json::Value>) -> Self {
        self.rows.push(row);
        self
    }
}

/// A metadata snapshot: everything a provider returned for one database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetadataSnapshot {
    /// Table metadata.
    #[serde(default)]
    pub tables: Vec<TableMetadata>,
    /// Sampled rows (optional).
    #[serde(default)]
    pub samples: Vec<TableSample>,
}
