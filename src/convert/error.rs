//! Conversion errors.

use thiserror::Error;

use crate::model::ValidationError;

/// Result type for codec operations.
pub type ConversionResult<T> = Result<T, ConversionError>;

/// A document could not be encoded or decoded.
///
/// A decode call that fails produces no model at all.
#[derive(Error, Debug)]
pub enum ConversionError {
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Malformed Turtle. `offset` is a byte offset into the input.
    #[error("syntax error at byte {offset}: {message}")]
    Syntax { offset: usize, message: String },

    /// A property resource without an `rdfs:domain`.
    #[error("property <{resource}> has no domain class")]
    MissingDomain { resource: String },

    /// A resource points at something that is not declared.
    #[error("<{resource}> references undeclared resource <{target}>")]
    DanglingReference { resource: String, target: String },

    /// A resource is declared but unusable.
    #[error("<{resource}>: {message}")]
    InvalidResource { resource: String, message: String },

    /// The document has no ontology header.
    #[error("document declares no owl:Ontology")]
    MissingOntology,

    /// The namespace cannot be used to mint IRIs.
    #[error("invalid namespace '{0}'")]
    InvalidNamespace(String),

    /// The document decoded, but the resulting model is invalid.
    #[error("decoded model is invalid: {0}")]
    Invalid(#[from] ValidationError),
}
