//! SnapshotMetadataProvider implementation.
//!
//! Serves metadata from an in-memory [`MetadataSnapshot`], typically loaded
//! from a JSON file produced by an external introspection job. This is the
//! provider the CLI uses, and the one tests use in place of a live database.

use std::path::Path;

use async_trait::async_trait;

use super::provider::{MetadataError, MetadataProvider, MetadataResult};
use super::types::{MetadataSnapshot, TableMetadata, TableSample};

/// MetadataProvider backed by a metadata snapshot.
///
/// # Example
///
/// ```ignore
/// use semantiaz::metadata::{MetadataProvider, SnapshotMetadataProvider};
///
/// let provider = SnapshotMetadataProvider::from_file("clinical.json").await?;
/// let tables = provider.list_tables().await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct SnapshotMetadataProvider {
    snapshot: MetadataSnapshot,
}

impl SnapshotMetadataProvider {
    /// Create a provider over an existing snapshot.
    pub fn new(snapshot: MetadataSnapshot) -> Self {
        Self { snapshot }
    }

    /// Create a provider over a list of tables with no samples.
    pub fn from_tables(tables: Vec<TableMetadata>) -> Self {
        Self::new(MetadataSnapshot {
            tables,
            samples: Vec::new(),
        })
    }

    /// Parse a snapshot from a JSON string.
    ///
    /// Accepts either a full snapshot object (`{"tables": [...], "samples": [...]}`)
    /// or a bare array of tables.
    pub fn from_json_str(json: &str) -> MetadataResult<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        let snapshot = if value.is_array() {
            MetadataSnapshot {
                tables: serde_json::from_value(value)?,
                samples: Vec::new(),
            }
        } else {
            serde_json::from_value(value)?
        };
        Ok(Self::new(snapshot))
    }

    /// Load a snapshot from a JSON file.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> MetadataResult<Self> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| MetadataError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        log::debug!("loaded metadata snapshot from {}", path.display());
        Self::from_json_str(&content)
    }

    /// The underlying snapshot.
    pub fn snapshot(&self) -> &MetadataSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl MetadataProvider for SnapshotMetadataProvider {
    async fn list_tables(&self) -> MetadataResult<Vec<String>> {
        Ok(self.snapshot.tables.iter().map(|t| t.name.clone()).collect())
    }

    async fn get_table(&self, table: &str) -> MetadataResult<TableMetadata> {
        self.snapshot
            .tables
            .iter()
            .find(|t| t.name == table)
            .cloned()
            .ok_or_else(|| MetadataError::TableNotFound(table.to_string()))
    }

    async fn sample_rows(&self, table: &str, limit: usize) -> MetadataResult<TableSample> {
        if let Some(sample) = self.snapshot.samples.iter().find(|s| s.table == table) {
            let mut sample = sample.clone();
            sample.rows.truncate(limit);
            return Ok(sample);
        }

        // Known table without sampled rows: an empty sample, not an error.
        let meta = self.get_table(table).await?;
        Ok(TableSample::new(
            meta.name,
            meta.columns.into_iter().map(|c| c.name).collect(),
        ))
    }
}
