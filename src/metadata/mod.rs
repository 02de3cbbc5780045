//! Metadata provider module.
//!
//! This module defines the boundary between the core and whatever introspects
//! the database: the [`TableMetadata`] shape, the [`MetadataProvider`] trait
//! and a snapshot-backed implementation.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MetadataProvider                           │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │  Per-table fetch (async)    │  Batch helpers               │  │
//! │  │  - list_tables()            │  - get_tables_batch()        │  │
//! │  │  - get_table()              │    (bounded parallelism,     │  │
//! │  │  - sample_rows()            │     name-sorted output)      │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//!                           │
//!                           ▼
//!            [TableMetadata] sorted by table name
//!                           │
//!              ┌────────────┴────────────┐
//!              ▼                         ▼
//!     semantic::build()          quality::assess()
//! ```
//!
//! # Example
//!
//! ```ignore
//! use semantiaz::metadata::{MetadataProvider, SnapshotMetadataProvider};
//!
//! let provider = SnapshotMetadataProvider::from_file("./metadata.json").await?;
//! let collected = provider.collect_all(8).await?;
//! for failure in &collected.failures {
//!     eprintln!("skipped {}: {}", failure.table, failure.error);
//! }
//! ```

mod provider;
mod snapshot_provider;
mod types;

pub use provider::{
    CollectedMetadata, FetchFailure, MetadataError, MetadataProvider, MetadataResult,
    DEFAULT_MAX_CONCURRENCY,
};
pub use snapshot_provider::SnapshotMetadataProvider;
pub use types::*;
