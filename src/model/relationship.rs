//! Relationships between logical tables.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Cardinality of a relationship, read from source to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Cardinality {
    ManyToOne,
    OneToOne,
    OneToMany,
}

impl Cardinality {
    pub fn as_str(self) -> &'static str {
        match self {
            Cardinality::ManyToOne => "many_to_one",
            Cardinality::OneToOne => "one_to_one",
            Cardinality::OneToMany => "one_to_many",
        }
    }
}

impl fmt::Display for Cardinality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Cardinality {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "many_to_one" => Ok(Cardinality::ManyToOne),
            "one_to_one" => Ok(Cardinality::OneToOne),
            "one_to_many" => Ok(Cardinality::OneToMany),
            other => Err(format!("unknown cardinality '{}'", other)),
        }
    }
}

/// A directed edge from a source column to a target column.
///
/// Endpoints are names, resolved against the owning model on lookup.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Relationship {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    pub cardinality: Cardinality,
}

impl Relationship {
    pub fn new(
        source_table: impl Into<String>,
        source_column: impl Into<String>,
        target_table: impl Into<String>,
        target_column: impl Into<String>,
        cardinality: Cardinality,
    ) -> Self {
        Self {
            source_table: source_table.into(),
            source_column: source_column.into(),
            target_table: target_table.into(),
            target_column: target_column.into(),
            cardinality,
        }
    }

    /// `table.column -> table.column`, for messages.
    pub fn describe(&self) -> String {
        format!(
            "{}.{} -> {}.{}",
            self.source_table, self.source_column, self.target_table, self.target_column
        )
    }
}
