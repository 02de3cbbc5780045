//! Vocabulary IRIs.

pub const RDF: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#";
pub const RDFS: &str = "http://www.w3.org/2000/01/rdf-schema#";
pub const OWL: &str = "http://www.w3.org/2002/07/owl#";
pub const XSD: &str = "http://www.w3.org/2001/XMLSchema#";
/// Annotation properties for what OWL has no term for.
pub const SL: &str = "urn:semantiaz:vocab#";

/// Prefixes written at the top of every document, in output order.
pub const PREFIXES: [(&str, &str); 5] = [("owl", OWL), ("rdf", RDF), ("rdfs", RDFS), ("sl", SL), ("xsd", XSD)];

pub const RDF_TYPE: &str = "http://www.w3.org/1999/02/22-rdf-syntax-ns#type";

pub const RDFS_LABEL: &str = "http://www.w3.org/2000/01/rdf-schema#label";
pub const RDFS_COMMENT: &str = "http://www.w3.org/2000/01/rdf-schema#comment";
pub const RDFS_DOMAIN: &str = "http://www.w3.org/2000/01/rdf-schema#domain";
pub const RDFS_RANGE: &str = "http://www.w3.org/2000/01/rdf-schema#range";

pub const OWL_ONTOLOGY: &str = "http://www.w3.org/2002/07/owl#Ontology";
pub const OWL_CLASS: &str = "http://www.w3.org/2002/07/owl#Class";
pub const OWL_DATATYPE_PROPERTY: &str = "http://www.w3.org/2002/07/owl#DatatypeProperty";
pub const OWL_OBJECT_PROPERTY: &str = "http://www.w3.org/2002/07/owl#ObjectProperty";

pub const XSD_INTEGER: &str = "http://www.w3.org/2001/XMLSchema#integer";
pub const XSD_DECIMAL: &str = "http://www.w3.org/2001/XMLSchema#decimal";
pub const XSD_BOOLEAN: &str = "http://www.w3.org/2001/XMLSchema#boolean";

pub const SL_PHYSICAL_SOURCE: &str = "urn:semantiaz:vocab#physicalSource";
pub const SL_PHYSICAL_TYPE: &str = "urn:semantiaz:vocab#physicalType";
pub const SL_SEMANTIC_KIND: &str = "urn:semantiaz:vocab#semanticKind";
pub const SL_NULLABLE: &str = "urn:semantiaz:vocab#nullable";
pub const SL_PRIMARY_KEY: &str = "urn:semantiaz:vocab#primaryKey";
pub const SL_TARGET_COLUMN: &str = "urn:semantiaz:vocab#targetColumn";
pub const SL_CARDINALITY: &str = "urn:semantiaz:vocab#cardinality";
