//! Cross-format conversion.
//!
//! Each format is a codec: a pure `encode` from a [`SemanticModel`] to text
//! and, where the format supports it, a pure `decode` back. Every codec
//! declares the model fields it cannot carry, so loss is explicit.
//!
//! ```text
//!                      ┌──────────────┐
//!             ┌───────►│ SchemaCodec  │ YAML / JSON   lossless, both ways
//!             │        └──────────────┘
//! SemanticModel        ┌──────────────┐
//!             ├───────►│ OntologyCodec│ Turtle        metrics regenerated
//!             │        └──────────────┘
//!             │        ┌──────────────┐
//!             └───────►│ GraphCodec   │ Cypher        encode only
//!                      └──────────────┘
//! ```

mod error;
pub mod graph;
pub mod ontology;
pub mod schema;

pub use error::{ConversionError, ConversionResult};
pub use graph::{GraphCodec, GraphOptions};
pub use ontology::{OntologyCodec, OntologyStats};
pub use schema::{SchemaCodec, SchemaDocument, SchemaFormat};

use std::fmt;

use serde::Serialize;

use crate::model::SemanticModel;

/// A part of the model a codec may be unable to represent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModelField {
    ModelName,
    ModelDescription,
    TableSource,
    TableDescription,
    ColumnPhysicalType,
    ColumnKind,
    ColumnNullability,
    ColumnPrimaryKey,
    ColumnDescription,
    Metrics,
    VerifiedQueries,
}

impl fmt::Display for ModelField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ModelField::ModelName => "model name",
            ModelField::ModelDescription => "model description",
            ModelField::TableSource => "table source",
            ModelField::TableDescription => "table description",
            ModelField::ColumnPhysicalType => "column physical type",
            ModelField::ColumnKind => "column kind",
            ModelField::ColumnNullability => "column nullability",
            ModelField::ColumnPrimaryKey => "column primary key",
            ModelField::ColumnDescription => "column description",
            ModelField::Metrics => "metrics",
            ModelField::VerifiedQueries => "verified queries",
        };
        f.write_str(name)
    }
}

/// Model to text.
pub trait Encoder {
    /// Format name, for logs and CLI output.
    fn format_name(&self) -> &'static str;

    /// Fields this format drops on the way out (or cannot read back).
    fn unrepresented(&self) -> &'static [ModelField];

    fn encode(&self, model: &SemanticModel) -> ConversionResult<String>;
}

/// Text to model.
pub trait Decoder {
    /// Decode a document. Either a complete, valid model or an error.
    fn decode(&self, input: &str) -> ConversionResult<SemanticModel>;
}
