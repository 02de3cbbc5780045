//! MetadataProvider trait definition.
//!
//! The MetadataProvider trait abstracts over different ways of obtaining
//! database metadata. Fetching is the expensive, blocking part of the
//! pipeline, so the batch helpers fetch tables with bounded parallelism and
//! then restore a canonical (name-sorted) order before handing the list to
//! the builder or the assessor.

use std::path::PathBuf;

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use thiserror::Error;

use super::types::{TableMetadata, TableSample};

/// Result type for metadata operations.
pub type MetadataResult<T> = Result<T, MetadataError>;

/// Errors raised by metadata providers.
#[derive(Error, Debug)]
pub enum MetadataError {
    /// Failed to read a snapshot file.
    #[error("failed to read metadata snapshot '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content is not valid JSON for the expected shape.
    #[error("invalid metadata snapshot: {0}")]
    Json(#[from] serde_json::Error),

    /// The requested table does not exist.
    #[error("table not found: {0}")]
    TableNotFound(String),

    /// Provider-specific failure while fetching a table.
    #[error("failed to fetch '{table}': {message}")]
    Fetch { table: String, message: String },
}

/// A table that could not be fetched.
#[derive(Debug)]
pub struct FetchFailure {
    /// Table name that was requested.
    pub table: String,
    /// Why the fetch failed.
    pub error: MetadataError,
}

/// Output of a batch fetch.
///
/// `tables` is always sorted by table name, independent of the order in which
/// the concurrent fetches completed. Failed tables are reported separately; a
/// partial list is ordinary input for the builder and the assessor.
#[derive(Debug, Default)]
pub struct CollectedMetadata {
    /// Successfully fetched tables, sorted by name.
    pub tables: Vec<TableMetadata>,
    /// Sampled rows, sorted by table name (empty unless samples were requested).
    pub samples: Vec<TableSample>,
    /// Tables that failed to fetch.
    pub failures: Vec<FetchFailure>,
}

impl CollectedMetadata {
    /// Returns true when every requested table was fetched.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Default number of tables fetched at once.
pub const DEFAULT_MAX_CONCURRENCY: usize = 8;

/// Trait for fetching database metadata.
///
/// Implementations own connections, credentials, timeouts and retries. The
/// core only sees the returned [`TableMetadata`].
///
/// # Example
///
/// ```ignore
/// use semantiaz::metadata::{MetadataProvider, SnapshotMetadataProvider};
///
/// let provider = SnapshotMetadataProvider::from_file("snapshot.json").await?;
/// let collected = provider.collect_all(8).await?;
/// let outcome = semantiaz::semantic::build(&collected.tables, &Default::default())?;
/// ```
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// List the names of all tables the provider can describe.
    async fn list_tables(&self) -> MetadataResult<Vec<String>>;

    /// Get complete metadata for one table.
    async fn get_table(&self, table: &str) -> MetadataResult<TableMetadata>;

    /// Sample up to `limit` rows from a table.
    async fn sample_rows(&self, table: &str, limit: usize) -> MetadataResult<TableSample>;

    /// Fetch several tables with at most `max_concurrency` requests in flight.
    ///
    /// Failures do not abort the batch; they are collected alongside the
    /// successfully fetched tables.
    async fn get_tables_batch(&self, tables: &[String], max_concurrency: usize) -> CollectedMetadata {
        let results: Vec<(String, MetadataResult<TableMetadata>)> = stream::iter(tables.iter().cloned())
            .map(|name| async move {
                let result = self.get_table(&name).await;
                (name, result)
            })
            .buffer_unordered(max_concurrency.max(1))
            .collect()
            .await;

        let mut collected = CollectedMetadata::default();
        for (table, result) in results {
            match result {
                Ok(meta) => collected.tables.push(meta),
                Err(error) => {
                    log::warn!("metadata fetch failed for '{}': {}", table, error);
                    collected.failures.push(FetchFailure { table, error });
                }
            }
        }

        collected.tables.sort_by(|a, b| a.name.cmp(&b.name));
        collected.failures.sort_by(|a, b| a.table.cmp(&b.table));
        collected
    }

    /// Sample several tables with bounded parallelism.
    ///
    /// Rows inside each sample keep the order the provider returned them in.
    async fn sample_tables_batch(
        &self,
        tables: &[String],
        limit: usize,
        max_concurrency: usize,
    ) -> (Vec<TableSample>, Vec<FetchFailure>) {
        let results: Vec<(String, MetadataResult<TableSample>)> = stream::iter(tables.iter().cloned())
            .map(|name| async move {
                let result = self.sample_rows(&name, limit).await;
                (name, result)
            })
            .buffer_unordered(max_concurrency.max(1))
            .collect()
            .await;

        let mut samples = Vec::new();
        let mut failures = Vec::new();
        for (table, result) in results {
            match result {
                Ok(sample) => samples.push(sample),
                Err(error) => {
                    log::warn!("row sampling failed for '{}': {}", table, error);
                    failures.push(FetchFailure { table, error });
                }
            }
        }

        samples.sort_by(|a, b| a.table.cmp(&b.table));
        failures.sort_by(|a, b| a.table.cmp(&b.table));
        (samples, failures)
    }

    /// List every table and fetch them all.
    async fn collect_all(&self, max_concurrency: usize) -> MetadataResult<CollectedMetadata> {
        let names = self.list_tables().await?;
        let collected = self.get_tables_batch(&names, max_concurrency).await;
        log::info!(
            "collected metadata for {}/{} tables",
            collected.tables.len(),
            names.len()
        );
        Ok(collected)
    }

    /// Like [`collect_all`](Self::collect_all), also sampling up to
    /// `row_limit` rows per fetched table.
    async fn collect_with_samples(
        &self,
        max_concurrency: usize,
        row_limit: usize,
    ) -> MetadataResult<CollectedMetadata> {
        let mut collected = self.collect_all(max_concurrency).await?;
        let names: Vec<String> = collected.tables.iter().map(|t| t.name.clone()).collect();
        let (samples, failures) = self
            .sample_tables_batch(&names, row_limit, max_concurrency)
            .await;
        collected.samples = samples;
        collected.failures.extend(failures);
        Ok(collected)
    }
}
