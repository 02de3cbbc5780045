//! Semantic model builder.
//!
//! Turns a metadata snapshot into a [`SemanticModel`] plus advisories.

use serde::{Deserialize, Serialize};

use crate::metadata::TableMetadata;
use crate::model::{Column, LogicalTable, Relationship, Cardinality, SemanticModel, ValidationResult};

use super::advisory::{Advisory, AmbiguousInferenceWarning};
use super::canonical::{canonicalize, CanonicalSnapshot};
use super::inference::{
    infer_kind, resolve_foreign_keys, synthesize_metrics, synthesize_verified_queries, thresholds,
    ColumnFacts, ForeignKeyResolution,
};

/// Builder options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildOptions {
    /// Name of the produced model.
    pub model_name: String,
    pub description: Option<String>,
    /// Distinct-value ceiling for treating a sampled column as an enumeration.
    pub enum_max_distinct: u64,
    /// Infer implicit foreign keys from `<table>_id` column names.
    pub naming_fallback: bool,
    /// Emit one verified query per relationship.
    pub synthesize_verified_queries: bool,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self {
            model_name: "semantic_model".to_string(),
            description: None,
            enum_max_distinct: thresholds::ENUM_MAX_DISTINCT,
            naming_fallback: true,
            synthesize_verified_queries: true,
        }
    }
}

impl BuildOptions {
    /// Default options with a model name.
    pub fn named(model_name: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            ..Self::default()
        }
    }
}

/// A built model and everything the builder wants the caller to know.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildOutcome {
    pub model: SemanticModel,
    pub advisories: Vec<Advisory>,
}

impl BuildOutcome {
    /// Only the ambiguous naming-convention matches.
    pub fn ambiguous_warnings(&self) -> impl Iterator<Item = &AmbiguousInferenceWarning> {
        self.advisories.iter().filter_map(|a| match a {
            Advisory::AmbiguousInference(w) => Some(w),
            _ => None,
        })
    }
}

/// Builds semantic models from metadata snapshots.
///
/// # Example
///
/// ```ignore
/// use semantiaz::semantic::{BuildOptions, SemanticModelBuilder};
///
/// let builder = SemanticModelBuilder::new(BuildOptions::named("clinical"));
/// let outcome = builder.build(&tables)?;
/// for advisory in &outcome.advisories {
///     eprintln!("{}", advisory);
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SemanticModelBuilder {
    options: BuildOptions,
}

impl SemanticModelBuilder {
    pub fn new(options: BuildOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &BuildOptions {
        &self.options
    }

    /// Build a model.
    ///
    /// The input order of tables and columns does not matter; the snapshot is
    /// canonicalized first.
    ///
    /// # Errors
    /// A [`ValidationError`](crate::model::ValidationError) when names collide
    /// after normalization or a column declares a foreign key to itself.
    pub fn build(&self, tables: &[TableMetadata]) -> ValidationResult<BuildOutcome> {
        let snapshot = canonicalize(tables)?;
        let fks = resolve_foreign_keys(&snapshot, self.options.naming_fallback)?;

        let logical_tables = self.logical_tables(&snapshot, &fks);
        let relationships: Vec<Relationship> = fks
            .resolved
            .iter()
            .map(|fk| {
                Relationship::new(
                    &fk.source_table,
                    &fk.source_column,
                    &fk.target_table,
                    &fk.target_column,
                    Cardinality::ManyToOne,
                )
            })
            .collect();

        let metrics = synthesize_metrics(&logical_tables);
        let verified_queries = if self.options.synthesize_verified_queries {
            synthesize_verified_queries(&logical_tables, &relationships, &metrics)
        } else {
            Vec::new()
        };

        let model = SemanticModel::new(
            self.options.model_name.clone(),
            self.options.description.clone(),
            logical_tables,
            relationships,
            metrics,
            verified_queries,
        )?;

        log::info!(
            "built model '{}': {} tables, {} relationships, {} metrics, {} verified queries, {} advisories",
            model.name(),
            model.tables().len(),
            model.relationships().len(),
            model.metrics().len(),
            model.verified_queries().len(),
            fks.advisories.len()
        );

        Ok(BuildOutcome {
            model,
            advisories: fks.advisories,
        })
    }

    fn logical_tables(&self, snapshot: &CanonicalSnapshot<'_>, fks: &ForeignKeyResolution) -> Vec<LogicalTable> {
        snapshot
            .tables
            .iter()
            .map(|table| {
                let row_count = table.row_count();
                let columns = table
                    .columns
                    .iter()
                    .map(|col| {
                        let facts = ColumnFacts {
                            primary_key: col.meta.is_primary_key,
                            resolved_foreign_key: fks.is_resolved(&table.name, &col.name),
                            dangling_foreign_key: fks.is_dangling(&table.name, &col.name),
                            family: col.family,
                            distinct_count: col.stats.map(|s| s.distinct_count),
                            row_count,
                        };
                        let (kind, rule) = infer_kind(&facts, self.options.enum_max_distinct);
                        log::debug!("{}.{}: {} (rule '{}')", table.name, col.name, kind, rule);

                        Column {
                            name: col.name.clone(),
                            physical_type: col.meta.physical_type.clone(),
                            kind,
                            nullable: col.meta.nullable,
                            primary_key: col.meta.is_primary_key,
                            description: col.meta.description.clone(),
                        }
                    })
                    .collect();

                LogicalTable {
                    name: table.name.clone(),
                    source: table.meta.physical_source(),
                    columns,
                    description: table.meta.description.clone(),
                }
            })
            .collect()
    }
}

/// Build a model with the given options.
pub fn build(tables: &[TableMetadata], options: &BuildOptions) -> ValidationResult<BuildOutcome> {
    SemanticModelBuilder::new(options.clone()).build(tables)
}
