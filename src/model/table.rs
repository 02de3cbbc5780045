//! Logical tables and columns.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::types::TypeFamily;

/// What role a column plays in analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SemanticKind {
    /// Primary or foreign key.
    Identifier,
    /// Grouping attribute with a small or textual domain.
    DimensionCategorical,
    /// Date or time attribute.
    DimensionTemporal,
    /// Numeric attribute that should not be aggregated.
    DimensionNumeric,
    /// Numeric column eligible for aggregation.
    MeasureCandidate,
}

impl SemanticKind {
    /// All kinds, in declaration order.
    pub const ALL: [SemanticKind; 5] = [
        SemanticKind::Identifier,
        SemanticKind::DimensionCategorical,
        SemanticKind::DimensionTemporal,
        SemanticKind::DimensionNumeric,
        SemanticKind::MeasureCandidate,
    ];

    /// Stable string form (`dimension-categorical`, ...).
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticKind::Identifier => "identifier",
            SemanticKind::DimensionCategorical => "dimension-categorical",
            SemanticKind::DimensionTemporal => "dimension-temporal",
            SemanticKind::DimensionNumeric => "dimension-numeric",
            SemanticKind::MeasureCandidate => "measure-candidate",
        }
    }

    /// Any of the three dimension kinds.
    pub fn is_dimension(self) -> bool {
        matches!(
            self,
            SemanticKind::DimensionCategorical
                | SemanticKind::DimensionTemporal
                | SemanticKind::DimensionNumeric
        )
    }
}

impl fmt::Display for SemanticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SemanticKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SemanticKind::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| format!("unknown semantic kind '{}'", s))
    }
}

/// A column of a logical table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// Physical type as reported by the source database.
    pub physical_type: String,
    pub kind: SemanticKind,
    pub nullable: bool,
    /// Part of the table's primary key.
    pub primary_key: bool,
    pub description: Option<String>,
}

impl Column {
    /// Create a nullable, non-key column.
    pub fn new(name: impl Into<String>, physical_type: impl Into<String>, kind: SemanticKind) -> Self {
        Self {
            name: name.into(),
            physical_type: physical_type.into(),
            kind,
            nullable: true,
            primary_key: false,
            description: None,
        }
    }

    /// Builder-style: mark as primary key (implies NOT NULL).
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self.nullable = false;
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

    /// Family of the physical type.
    pub fn type_family(&self) -> TypeFamily {
        TypeFamily::from_physical(&self.physical_type)
    }
}

/// A logical table: the semantic view of one physical table or view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogicalTable {
    pub name: String,
    /// Physical source identifier (`schema.table` or `table`).
    pub source: String,
    pub columns: Vec<Column>,
    pub description: Option<String>,
}

impl LogicalTable {
    /// Create a table whose source is its own name.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            source: name.clone(),
            name,
            columns: Vec::new(),
            description: None,
        }
    }

    /// Builder-style: set the physical source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Builder-style: append a column.
    #[must_use]
    pub fn with_column(mut self, column: Column) -> Self {
        self.columns.push(column);
        self
    }

    /// Builder-style: set documentation.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Primary key columns, in column order.
    pub fn primary_key_columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(|c| c.primary_key)
    }

    /// The primary key column when the key has exactly one column.
    pub fn single_primary_key(&self) -> Option<&Column> {
        let mut keys = self.primary_key_columns();
        match (keys.next(), keys.next()) {
            (Some(key), None) => Some(key),
            _ => None,
        }
    }

    /// Columns of the given kind.
    pub fn columns_of_kind(&self, kind: SemanticKind) -> impl Iterator<Item = &Column> {
        self.columns.iter().filter(move |c| c.kind == kind)
    }
}
