//! Foreign key resolution.
//!
//! Declared foreign keys are resolved against the snapshot first. Columns
//! without one may get an implicit key from the naming convention
//! `<singular-of-target>_id`, but only when exactly one plausible target
//! table exists.

use std::collections::HashSet;

use crate::model::{normalize_name, ValidationError, ValidationResult};
use crate::semantic::advisory::{Advisory, AmbiguousInferenceWarning};
use crate::semantic::canonical::{CanonicalColumn, CanonicalSnapshot, CanonicalTable};

use super::inflection::table_matches_stem;

/// Where a resolved foreign key came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeyOrigin {
    Declared,
    NamingConvention,
}

/// A foreign key whose both endpoints exist (normalized names).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedForeignKey {
    pub source_table: String,
    pub source_column: String,
    pub target_table: String,
    pub target_column: String,
    pub origin: ForeignKeyOrigin,
}

/// Result of foreign key resolution over a whole snapshot.
#[derive(Debug, Default)]
pub struct ForeignKeyResolution {
    /// Resolved keys, in table then column order.
    pub resolved: Vec<ResolvedForeignKey>,
    /// `(table, column)` pairs whose declared key was dropped.
    pub dangling: HashSet<(String, String)>,
    pub advisories: Vec<Advisory>,
}

impl ForeignKeyResolution {
    pub fn is_resolved(&self, table: &str, column: &str) -> bool {
        self.resolved
            .iter()
            .any(|fk| fk.source_table == table && fk.source_column == column)
    }

    pub fn is_dangling(&self, table: &str, column: &str) -> bool {
        self.dangling.contains(&(table.to_string(), column.to_string()))
    }
}

/// Resolve declared foreign keys and apply the naming-convention fallback.
///
/// # Errors
/// [`ValidationError::SelfReferentialForeignKey`] when a column declares a
/// foreign key to itself.
pub(crate) fn resolve_foreign_keys(
    snapshot: &CanonicalSnapshot<'_>,
    naming_fallback: bool,
) -> ValidationResult<ForeignKeyResolution> {
    let mut resolution = ForeignKeyResolution::default();

    for table in &snapshot.tables {
        for column in &table.columns {
            match &column.meta.foreign_key {
                Some(fk) => {
                    let target_table = normalize_name(&fk.target_table);
                    let target_column = normalize_name(&fk.target_column);
                    if target_table == table.name && target_column == column.name {
                        return Err(ValidationError::SelfReferentialForeignKey {
                            table: table.meta.name.clone(),
                            column: column.meta.name.clone(),
                        });
                    }

                    let resolves = snapshot
                        .table(&target_table)
                        .is_some_and(|t| t.column(&target_column).is_some());
                    if resolves {
                        resolution.resolved.push(ResolvedForeignKey {
                            source_table: table.name.clone(),
                            source_column: column.name.clone(),
                            target_table,
                            target_column,
                            origin: ForeignKeyOrigin::Declared,
                        });
                    } else {
                        log::warn!(
                            "dropping foreign key {}.{} -> {}.{}: target not in snapshot",
                            table.name,
                            column.name,
                            fk.target_table,
                            fk.target_column
                        );
                        resolution
                            .dangling
                            .insert((table.name.clone(), column.name.clone()));
                        resolution.advisories.push(Advisory::DroppedForeignKey {
                            table: table.name.clone(),
                            column: column.name.clone(),
                            target_table: fk.target_table.clone(),
                            target_column: fk.target_column.clone(),
                        });
                    }
                }
                None if naming_fallback => {
                    match naming_candidates(snapshot, table, column).as_slice() {
                        [] => {}
                        [(target, key)] => {
                            log::debug!(
                                "naming convention: {}.{} -> {}.{}",
                                table.name,
                                column.name,
                                target,
                                key
                            );
                            resolution.resolved.push(ResolvedForeignKey {
                                source_table: table.name.clone(),
                                source_column: column.name.clone(),
                                target_table: target.clone(),
                                target_column: key.clone(),
                                origin: ForeignKeyOrigin::NamingConvention,
                            });
                        }
                        many => {
                            let warning = AmbiguousInferenceWarning {
                                table: table.name.clone(),
                                column: column.name.clone(),
                                candidates: many.iter().map(|(t, _)| t.clone()).collect(),
                            };
                            log::warn!("{}", warning);
                            resolution
                                .advisories
                                .push(Advisory::AmbiguousInference(warning));
                        }
                    }
                }
                None => {}
            }
        }
    }

    Ok(resolution)
}

/// Plausible `(table, key column)` targets for a column by naming convention.
///
/// A target must be another table whose name spells the column's stem, with
/// a single-column primary key of a join-compatible type. When both sides
/// carry stats, the column may not have more distinct values than the key.
/// Candidates come back sorted by table name.
fn naming_candidates(
    snapshot: &CanonicalSnapshot<'_>,
    table: &CanonicalTable<'_>,
    column: &CanonicalColumn<'_>,
) -> Vec<(String, String)> {
    let Some(stem) = column.name.strip_suffix("_id").filter(|s| !s.is_empty()) else {
        return Vec::new();
    };

    snapshot
        .tables
        .iter()
        .filter(|target| target.name != table.name && table_matches_stem(&target.name, stem))
        .filter_map(|target| {
            let key = target.single_primary_key()?;
            if !column.family.is_join_compatible(key.family) {
                return None;
            }
            if let (Some(src), Some(dst)) = (column.stats, key.stats) {
                if src.distinct_count > dst.distinct_count {
                    return None;
                }
            }
            Some((target.name.clone(), key.name.clone()))
        })
        .collect()
}
