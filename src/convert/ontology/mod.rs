//! OWL ontology codec (Turtle).
//!
//! ```text
//! <ns>                     owl:Ontology          model name, description
//! <ns>/<table>             owl:Class             one per table
//! <ns>/<table>/<column>    owl:DatatypeProperty  scalar column
//!                          owl:ObjectProperty    relationship source column,
//!                                                range = target class
//! ```
//!
//! Table and column names are normalized into IRIs; the original names
//! travel as `rdfs:label`. Column details OWL has no term for (physical type,
//! kind, nullability, primary key, target column, cardinality) are written
//! as `sl:` annotations, so decode recovers everything except metrics and
//! verified queries. Metrics are regenerated on decode.
//!
//! Decoding is lexer → triple parser → reader:
//!
//! ```text
//! &str ──lex──► tokens ──parse──► Vec<Triple> ──read──► SemanticModel
//! ```

mod lexer;
mod parser;
mod reader;
pub mod vocab;
mod writer;

pub use parser::{parse_turtle, Term, Triple};

use serde::Serialize;

use crate::model::SemanticModel;

use super::{ConversionResult, Decoder, Encoder, ModelField};

/// Namespace used when none is configured.
pub const DEFAULT_NAMESPACE: &str = "http://semantiaz.dev/ontology";

/// Resource counts in a Turtle document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct OntologyStats {
    pub classes: usize,
    pub object_properties: usize,
    pub datatype_properties: usize,
    pub triples: usize,
}

/// Turtle encoder and decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OntologyCodec {
    namespace: String,
}

impl Default for OntologyCodec {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.to_string(),
        }
    }
}

impl OntologyCodec {
    /// Codec minting IRIs under `namespace`.
    ///
    /// The namespace is checked on [`encode`](Encoder::encode), not here.
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Count classes, properties and triples without building a model.
    pub fn stats(&self, input: &str) -> ConversionResult<OntologyStats> {
        let triples = parse_turtle(input)?;
        let mut stats = OntologyStats {
            triples: triples.len(),
            ..OntologyStats::default()
        };
        for triple in triples.iter().filter(|t| t.predicate == vocab::RDF_TYPE) {
            match triple.object.as_iri() {
                Some(vocab::OWL_CLASS) => stats.classes += 1,
                Some(vocab::OWL_OBJECT_PROPERTY) => stats.object_properties += 1,
                Some(vocab::OWL_DATATYPE_PROPERTY) => stats.datatype_properties += 1,
                _ => {}
            }
        }
        Ok(stats)
    }
}

impl Encoder for OntologyCodec {
    fn format_name(&self) -> &'static str {
        "owl-turtle"
    }

    fn unrepresented(&self) -> &'static [ModelField] {
        &[ModelField::Metrics, ModelField::VerifiedQueries]
    }

    fn encode(&self, model: &SemanticModel) -> ConversionResult<String> {
        let namespace = writer::validate_namespace(&self.namespace)?;
        Ok(writer::write_turtle(model, &namespace))
    }
}

impl Decoder for OntologyCodec {
    /// Decode any conforming Turtle document; the namespace is not needed.
    fn decode(&self, input: &str) -> ConversionResult<SemanticModel> {
        let triples = parse_turtle(input)?;
        reader::read_model(&triples)
    }
}
