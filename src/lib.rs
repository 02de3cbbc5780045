//! # semantiaz
//!
//! Builds a database-agnostic semantic model from relational metadata,
//! converts it between formats, and scores a database's readiness for a
//! semantic layer.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────┐
//! │              MetadataProvider (boundary)                 │
//! │         tables, columns, keys, content stats             │
//! └─────────────────────────────────────────────────────────┘
//!               │                              │
//!               ▼ [semantic]                   ▼ [quality]
//! ┌───────────────────────────┐   ┌───────────────────────────┐
//! │      SemanticModel        │   │      QualityReport        │
//! │ tables, relationships,    │   │ structural + content      │
//! │ metrics, verified queries │   │ score, tier, advice       │
//! └───────────────────────────┘   └───────────────────────────┘
//!               │
//!               ▼ [convert]
//! ┌─────────────────────────────────────────────────────────┐
//! │   schema (YAML/JSON)  ·  ontology (Turtle)  ·  Cypher    │
//! └─────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything below the provider is synchronous and pure: the same metadata
//! always produces byte-identical output.

pub mod config;
pub mod convert;
pub mod metadata;
pub mod model;
pub mod quality;
pub mod semantic;

/// Re-exports for convenient usage.
pub mod prelude {
    pub use crate::convert::{
        ConversionError, Decoder, Encoder, GraphCodec, ModelField, OntologyCodec, SchemaCodec,
    };
    pub use crate::metadata::{
        ColumnMetadata, ContentStats, MetadataProvider, SnapshotMetadataProvider, TableMetadata,
    };
    pub use crate::model::{
        Aggregation, Cardinality, Column, LogicalTable, Metric, Relationship, SemanticKind,
        SemanticModel, ValidationError, VerifiedQuery,
    };
    pub use crate::quality::{assess, QualityReport, Tier};
    pub use crate::semantic::{build, Advisory, BuildOptions, BuildOutcome, SemanticModelBuilder};
}
