#[path = "../common/mod.rs"]
mod common;

use semantiaz::convert::{ConversionError, Decoder, Encoder, ModelField, OntologyCodec};
use semantiaz::model::{Cardinality, SemanticKind};

const NS: &str = "https://data.example.org/hospital";

fn codec() -> OntologyCodec {
    OntologyCodec::new(NS)
}

#[test]
fn test_round_trip_keeps_structure() {
    let model = common::hospital_model();
    let decoded = codec().decode(&codec().encode(&model).unwrap()).unwrap();

    assert_eq!(decoded.name(), "hospital");
    assert_eq!(decoded.description(), Some("Sites, patients and visits"));
    assert_eq!(decoded.tables(), model.tables());
    assert_eq!(decoded.relationships(), model.relationships());
    assert!(decoded.verified_queries().is_empty());
    assert!(!decoded.metrics().is_empty());
}

#[test]
fn test_second_round_trip_is_a_fixed_point() {
    let once = codec().decode(&codec().encode(&common::hospital_model()).unwrap()).unwrap();
    let twice = codec().decode(&codec().encode(&once).unwrap()).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn test_declares_what_it_drops() {
    assert_eq!(
        codec().unrepresented(),
        &[ModelField::Metrics, ModelField::VerifiedQueries]
    );
    assert_eq!(codec().format_name(), "owl-turtle");
}

#[test]
fn test_output_is_byte_stable() {
    let a = codec().encode(&common::hospital_model()).unwrap();
    let b = codec().encode(&common::hospital_model()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_relationship_becomes_object_property() {
    let text = codec().encode(&common::hospital_model()).unwrap();
    assert!(text.starts_with("@prefix owl: <http://www.w3.org/2002/07/owl#> .\n"));
    assert!(text.contains(&format!(
        "<{ns}/patients/site_id> a owl:ObjectProperty ;\n    rdfs:label \"site_id\" ;\n    rdfs:domain <{ns}/patients> ;\n    rdfs:range <{ns}/sites> ;\n    sl:targetColumn <{ns}/sites/site_id> ;\n    sl:cardinality \"many_to_one\"",
        ns = NS
    )));
    assert!(text.contains(&format!(
        "<{ns}/visits/cost> a owl:DatatypeProperty ;\n    rdfs:label \"cost\" ;\n    rdfs:domain <{ns}/visits> ;\n    rdfs:range xsd:decimal",
        ns = NS
    )));
}

#[test]
fn test_descriptions_are_escaped() {
    let text = codec().encode(&common::hospital_model()).unwrap();
    assert!(text.contains(r#"rdfs:comment "Self-reported \"gender\"""#));

    let decoded = codec().decode(&text).unwrap();
    let gender = decoded.table("patients").unwrap().column("gender").unwrap();
    assert_eq!(gender.description.as_deref(), Some("Self-reported \"gender\""));
}

#[test]
fn test_stats_count_resources() {
    let text = codec().encode(&common::hospital_model()).unwrap();
    let stats = codec().stats(&text).unwrap();
    assert_eq!(stats.classes, 3);
    assert_eq!(stats.object_properties, 2);
    assert_eq!(stats.datatype_properties, 8);
}

#[test]
fn test_trailing_slash_namespace_is_equivalent() {
    let model = common::clinical_model();
    let plain = OntologyCodec::new("urn:clinical").encode(&model).unwrap();
    let slashed = OntologyCodec::new("urn:clinical/").encode(&model).unwrap();
    assert_eq!(plain, slashed);
}

#[test]
fn test_hand_written_ontology_with_defaults() {
    let ttl = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
@prefix xsd: <http://www.w3.org/2001/XMLSchema#> .
@prefix sl: <urn:semantiaz:vocab#> .
@base <http://example.org/shop/> .

<http://example.org/shop> a owl:Ontology .

<customers> a owl:Class .
<customers/id> a owl:DatatypeProperty ;
    rdfs:domain <customers> ;
    rdfs:range xsd:integer ;
    sl:primaryKey true .

<orders> a owl:Class ; rdfs:comment "Orders" .
<orders/placed_on> a owl:DatatypeProperty ;
    rdfs:domain <orders> ;
    rdfs:range xsd:date .
<orders/customer> a owl:ObjectProperty ;
    rdfs:domain <orders> ;
    rdfs:range <customers> .
"#;
    let model = codec().decode(ttl).unwrap();

    assert_eq!(model.name(), "shop");
    let orders = model.table("orders").unwrap();
    assert_eq!(orders.description.as_deref(), Some("Orders"));
    assert_eq!(orders.column("placed_on").unwrap().kind, SemanticKind::DimensionTemporal);
    assert_eq!(orders.column("customer").unwrap().kind, SemanticKind::Identifier);

    let rel = &model.relationships()[0];
    assert_eq!(rel.describe(), "orders.customer -> customers.id");
    assert_eq!(rel.cardinality, Cardinality::ManyToOne);
}

#[test]
fn test_property_without_domain() {
    let ttl = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
<urn:x> a owl:Ontology .
<urn:x/t> a owl:Class .
<urn:x/t/c> a owl:DatatypeProperty .
"#;
    assert!(matches!(
        codec().decode(ttl),
        Err(ConversionError::MissingDomain { resource }) if resource == "urn:x/t/c"
    ));
}

#[test]
fn test_range_that_is_not_a_class() {
    let ttl = r#"
@prefix owl: <http://www.w3.org/2002/07/owl#> .
@prefix rdfs: <http://www.w3.org/2000/01/rdf-schema#> .
<urn:x> a owl:Ontology .
<urn:x/t> a owl:Class .
<urn:x/t/other> a owl:ObjectProperty ; rdfs:domain <urn:x/t> ; rdfs:range <urn:x/missing> .
"#;
    assert!(matches!(
        codec().decode(ttl),
        Err(ConversionError::DanglingReference { target, .. }) if target == "urn:x/missing"
    ));
}

#[test]
fn test_document_without_ontology_header() {
    let ttl = "<urn:x/t> a <http://www.w3.org/2002/07/owl#Class> .\n";
    assert!(matches!(codec().decode(ttl), Err(ConversionError::MissingOntology)));
}

#[test]
fn test_malformed_turtle_reports_offset() {
    let err = codec().decode("<urn:x> a <urn:y>\n").unwrap_err();
    match err {
        ConversionError::Syntax { offset, .. } => assert!(offset >= 17),
        other => panic!("expected a syntax error, got {other:?}"),
    }
}

#[test]
fn test_invalid_namespace() {
    let err = OntologyCodec::new("no scheme here").encode(&common::clinical_model()).unwrap_err();
    assert!(matches!(err, ConversionError::InvalidNamespace(ns) if ns == "no scheme here"));
}
