//! Input canonicalization.
//!
//! Normalizes every table and column name, rejects collisions, and sorts the
//! snapshot so that inference always sees the same order no matter how the
//! provider delivered it.

use std::collections::HashMap;

use crate::metadata::{ColumnContentStats, ColumnMetadata, TableMetadata};
use crate::model::{normalize_name, TypeFamily, ValidationError, ValidationResult};

/// A column with its normalized name and derived facts.
#[derive(Debug)]
pub struct CanonicalColumn<'a> {
    pub name: String,
    pub meta: &'a ColumnMetadata,
    pub family: TypeFamily,
    pub stats: Option<&'a ColumnContentStats>,
}

/// A table with its normalized name and sorted columns.
#[derive(Debug)]
pub struct CanonicalTable<'a> {
    pub name: String,
    pub meta: &'a TableMetadata,
    pub columns: Vec<CanonicalColumn<'a>>,
}

impl<'a> CanonicalTable<'a> {
    pub fn column(&self, name: &str) -> Option<&CanonicalColumn<'a>> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// The primary key column when the key has exactly one column.
    pub fn single_primary_key(&self) -> Option<&CanonicalColumn<'a>> {
        let mut keys = self.columns.iter().filter(|c| c.meta.is_primary_key);
        match (keys.next(), keys.next()) {
            (Some(key), None) => Some(key),
            _ => None,
        }
    }

    /// Sampled row count, when content stats exist.
    pub fn row_count(&self) -> Option<u64> {
        self.meta.content_stats.as_ref().map(|s| s.row_count)
    }
}

/// The canonicalized snapshot, sorted by normalized table name.
#[derive(Debug)]
pub struct CanonicalSnapshot<'a> {
    pub tables: Vec<CanonicalTable<'a>>,
    index: HashMap<String, usize>,
}

impl<'a> CanonicalSnapshot<'a> {
    /// Look up a table by normalized name.
    pub fn table(&self, name: &str) -> Option<&CanonicalTable<'a>> {
        self.index.get(name).map(|&idx| &self.tables[idx])
    }
}

/// Normalize and sort a metadata snapshot.
///
/// # Errors
/// [`ValidationError::EmptyName`] for names that normalize to nothing,
/// [`ValidationError::DuplicateTable`] / [`ValidationError::DuplicateColumn`]
/// for collisions after normalization.
pub fn canonicalize(tables: &[TableMetadata]) -> ValidationResult<CanonicalSnapshot<'_>> {
    let mut canonical = Vec::with_capacity(tables.len());
    for meta in tables {
        let name = normalize_name(&meta.name);
        if name.is_empty() {
            return Err(ValidationError::EmptyName {
                entity: format!("table '{}'", meta.name),
            });
        }
        let columns = canonicalize_columns(meta)?;
        canonical.push(CanonicalTable { name, meta, columns });
    }

    // Original names break ties so collision errors are reported the same
    // way for every input order.
    canonical.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.meta.name.cmp(&b.meta.name)));
    if let Some(pair) = canonical.windows(2).find(|w| w[0].name == w[1].name) {
        return Err(ValidationError::DuplicateTable {
            first: pair[0].meta.name.clone(),
            second: pair[1].meta.name.clone(),
            normalized: pair[0].name.clone(),
        });
    }

    let index = canonical
        .iter()
        .enumerate()
        .map(|(idx, t)| (t.name.clone(), idx))
        .collect();
    Ok(CanonicalSnapshot {
        tables: canonical,
        index,
    })
}

fn canonicalize_columns(meta: &TableMetadata) -> ValidationResult<Vec<CanonicalColumn<'_>>> {
    let mut columns = Vec::with_capacity(meta.columns.len());
    for col in &meta.columns {
        let name = normalize_name(&col.name);
        if name.is_empty() {
            return Err(ValidationError::EmptyName {
                entity: format!("column '{}.{}'", meta.name, col.name),
            });
        }
        columns.push(CanonicalColumn {
            name,
            meta: col,
            family: TypeFamily::from_physical(&col.physical_type),
            stats: meta.column_stats(&col.name),
        });
    }

    columns.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.meta.name.cmp(&b.meta.name)));
    if let Some(pair) = columns.windows(2).find(|w| w[0].name == w[1].name) {
        return Err(ValidationError::DuplicateColumn {
            table: meta.name.clone(),
            first: pair[0].meta.name.clone(),
            second: pair[1].meta.name.clone(),
            normalized: pair[0].name.clone(),
        });
    }
    Ok(columns)
}
