//! Canonical semantic model.
//!
//! A [`SemanticModel`] is the database-agnostic description every other part
//! of the crate produces or consumes: the builder creates one from metadata,
//! the codecs move it between formats.
//!
//! ```text
//! SemanticModel
//! ├── LogicalTable*          (sorted by name)
//! │   └── Column*            (sorted by name, each with a SemanticKind)
//! ├── Relationship*          source.column -> target.column
//! ├── Metric*                aggregation over table[.column]
//! └── VerifiedQuery*         tables + metrics + query text
//! ```
//!
//! Relationships, metrics and verified queries refer to tables, columns and
//! metrics by name. [`SemanticModel::new`] is the only constructor; it sorts
//! every collection and checks that every reference resolves, so a model
//! that exists is always valid and has exactly one canonical form. There is
//! no mutation API.

mod error;
mod hash;
mod metric;
mod names;
mod relationship;
mod table;
mod types;

pub use error::{ValidationError, ValidationResult};
pub use hash::compute_hash;
pub use metric::{Aggregation, Metric, VerifiedQuery};
pub use names::normalize_name;
pub use relationship::{Cardinality, Relationship};
pub use table::{Column, LogicalTable, SemanticKind};
pub use types::TypeFamily;

use std::collections::{BTreeMap, HashSet};
use std::fmt;

use serde::Serialize;

/// The root aggregate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SemanticModel {
    name: String,
    description: Option<String>,
    tables: Vec<LogicalTable>,
    relationships: Vec<Relationship>,
    metrics: Vec<Metric>,
    verified_queries: Vec<VerifiedQuery>,
}

impl SemanticModel {
    /// Validate and assemble a model.
    ///
    /// Collections are sorted into canonical order (tables, columns, metrics
    /// and queries by name; relationships by source then target) before
    /// validation, so the same parts in any order produce an identical model.
    ///
    /// # Errors
    /// Returns a [`ValidationError`] naming the first offending entity when a
    /// name is empty or collides after normalization, or a reference does not
    /// resolve.
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        mut tables: Vec<LogicalTable>,
        mut relationships: Vec<Relationship>,
        mut metrics: Vec<Metric>,
        mut verified_queries: Vec<VerifiedQuery>,
    ) -> ValidationResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName {
                entity: "model".to_string(),
            });
        }

        tables.sort_by(|a, b| a.name.cmp(&b.name));
        for table in &mut tables {
            table.columns.sort_by(|a, b| a.name.cmp(&b.name));
        }
        relationships.sort();
        metrics.sort_by(|a, b| a.name.cmp(&b.name));
        verified_queries.sort_by(|a, b| a.name.cmp(&b.name));

        let model = Self {
            name,
            description,
            tables,
            relationships,
            metrics,
            verified_queries,
        };
        model.validate()?;
        Ok(model)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn tables(&self) -> &[LogicalTable] {
        &self.tables
    }

    pub fn relationships(&self) -> &[Relationship] {
        &self.relationships
    }

    pub fn metrics(&self) -> &[Metric] {
        &self.metrics
    }

    pub fn verified_queries(&self) -> &[VerifiedQuery] {
        &self.verified_queries
    }

    /// Look up a table by name.
    pub fn table(&self, name: &str) -> Option<&LogicalTable> {
        self.tables
            .binary_search_by(|t| t.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.tables[idx])
    }

    /// Look up a metric by name.
    pub fn metric(&self, name: &str) -> Option<&Metric> {
        self.metrics
            .binary_search_by(|m| m.name.as_str().cmp(name))
            .ok()
            .map(|idx| &self.metrics[idx])
    }

    /// The relationship that starts at `table.column`, if any.
    pub fn relationship_from(&self, table: &str, column: &str) -> Option<&Relationship> {
        self.relationships
            .iter()
            .find(|r| r.source_table == table && r.source_column == column)
    }

    /// Counts and structural warnings.
    pub fn summary(&self) -> ModelSummary {
        let mut warnings = Vec::new();
        for table in &self.tables {
            if !table.columns.iter().any(|c| c.kind.is_dimension()) {
                warnings.push(format!("table '{}' has no dimensions", table.name));
            }
            if !table.columns.iter().any(|c| c.primary_key) {
                warnings.push(format!("table '{}' has no primary key", table.name));
            }
        }

        ModelSummary {
            name: self.name.clone(),
            tables: self.tables.len(),
            columns: self.tables.iter().map(|t| t.columns.len()).sum(),
            relationships: self.relationships.len(),
            metrics: self.metrics.len(),
            verified_queries: self.verified_queries.len(),
            warnings,
        }
    }

    /// SHA-256 of the model's canonical JSON form.
    ///
    /// Equal models have equal fingerprints.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        compute_hash(self)
    }

    fn validate(&self) -> ValidationResult<()> {
        self.validate_tables()?;
        self.validate_relationships()?;
        self.validate_metrics()?;
        self.validate_verified_queries()
    }

    fn validate_tables(&self) -> ValidationResult<()> {
        let mut seen_tables: BTreeMap<String, &str> = BTreeMap::new();
        for table in &self.tables {
            let normalized = normalize_name(&table.name);
            if normalized.is_empty() {
                return Err(ValidationError::EmptyName {
                    entity: format!("table '{}'", table.name),
                });
            }
            if let Some(first) = seen_tables.insert(normalized.clone(), &table.name) {
                return Err(ValidationError::DuplicateTable {
                    first: first.to_string(),
                    second: table.name.clone(),
                    normalized,
                });
            }

            let mut seen_columns: BTreeMap<String, &str> = BTreeMap::new();
            for column in &table.columns {
                let normalized = normalize_name(&column.name);
                if normalized.is_empty() {
                    return Err(ValidationError::EmptyName {
                        entity: format!("column '{}.{}'", table.name, column.name),
                    });
                }
                if let Some(first) = seen_columns.insert(normalized.clone(), &column.name) {
                    return Err(ValidationError::DuplicateColumn {
                        table: table.name.clone(),
                        first: first.to_string(),
                        second: column.name.clone(),
                        normalized,
                    });
                }
            }
        }
        Ok(())
    }

    fn validate_relationships(&self) -> ValidationResult<()> {
        let mut sources = HashSet::new();
        for rel in &self.relationships {
            let owner = format!("relationship {}", rel.describe());
            self.resolve_column(&owner, &rel.source_table, &rel.source_column)?;
            self.resolve_column(&owner, &rel.target_table, &rel.target_column)?;

            if rel.source_table == rel.target_table && rel.source_column == rel.target_column {
                return Err(ValidationError::SelfReferentialForeignKey {
                    table: rel.source_table.clone(),
                    column: rel.source_column.clone(),
                });
            }
            if !sources.insert((rel.source_table.as_str(), rel.source_column.as_str())) {
                return Err(ValidationError::DuplicateRelationship {
                    table: rel.source_table.clone(),
                    column: rel.source_column.clone(),
                });
            }
        }
        Ok(())
    }

    fn validate_metrics(&self) -> ValidationResult<()> {
        let mut names = HashSet::new();
        for metric in &self.metrics {
            if metric.name.trim().is_empty() {
                return Err(ValidationError::EmptyName {
                    entity: format!("metric on '{}'", metric.table),
                });
            }
            if !names.insert(metric.name.as_str()) {
                return Err(ValidationError::DuplicateMetric(metric.name.clone()));
            }

            let owner = format!("metric '{}'", metric.name);
            match &metric.column {
                Some(column) => self.resolve_column(&owner, &metric.table, column)?,
                None => {
                    self.resolve_table(&owner, &metric.table)?;
                    if metric.aggregation.requires_column() {
                        return Err(ValidationError::MissingMetricColumn {
                            metric: metric.name.clone(),
                            aggregation: metric.aggregation.to_string(),
                        });
                    }
                }
            }
        }
        Ok(())
    }

    fn validate_verified_queries(&self) -> ValidationResult<()> {
        let mut names = HashSet::new();
        for query in &self.verified_queries {
            if query.name.trim().is_empty() {
                return Err(ValidationError::EmptyName {
                    entity: "verified query".to_string(),
                });
            }
            if !names.insert(query.name.as_str()) {
                return Err(ValidationError::DuplicateVerifiedQuery(query.name.clone()));
            }

            let owner = format!("verified query '{}'", query.name);
            for table in &query.tables {
                self.resolve_table(&owner, table)?;
            }
            for metric in &query.metrics {
                if self.metric(metric).is_none() {
                    return Err(ValidationError::UnknownMetric {
                        referenced_by: owner.clone(),
                        metric: metric.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    fn resolve_table(&self, owner: &str, table: &str) -> ValidationResult<&LogicalTable> {
        self.table(table).ok_or_else(|| ValidationError::UnknownTable {
            referenced_by: owner.to_string(),
            table: table.to_string(),
        })
    }

    fn resolve_column(&self, owner: &str, table: &str, column: &str) -> ValidationResult<()> {
        let resolved = self.resolve_table(owner, table)?;
        if resolved.column(column).is_none() {
            return Err(ValidationError::UnknownColumn {
                referenced_by: owner.to_string(),
                table: table.to_string(),
                column: column.to_string(),
            });
        }
        Ok(())
    }
}

/// Counts and warnings describing a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModelSummary {
    pub name: String,
    pub tables: usize,
    pub columns: usize,
    pub relationships: usize,
    pub metrics: usize,
    pub verified_queries: usize,
    /// Structural gaps such as tables without a primary key.
    pub warnings: Vec<String>,
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Model: {}", self.name)?;
        writeln!(f, "  tables:           {}", self.tables)?;
        writeln!(f, "  columns:          {}", self.columns)?;
        writeln!(f, "  relationships:    {}", self.relationships)?;
        writeln!(f, "  metrics:          {}", self.metrics)?;
        write!(f, "  verified queries: {}", self.verified_queries)?;
        for warning in &self.warnings {
            write!(f, "\n  warning: {}", warning)?;
        }
        Ok(())
    }
}
