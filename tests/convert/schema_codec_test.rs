#[path = "../common/mod.rs"]
mod common;

use semantiaz::convert::{ConversionError, Decoder, Encoder, SchemaCodec, SchemaDocument};
use semantiaz::model::{Aggregation, Metric, SemanticModel, ValidationError};

#[test]
fn test_yaml_round_trip() {
    let model = common::hospital_model();
    let codec = SchemaCodec::yaml();
    let text = codec.encode(&model).unwrap();
    assert_eq!(codec.decode(&text).unwrap(), model);
}

#[test]
fn test_json_round_trip() {
    let model = common::hospital_model();
    let codec = SchemaCodec::json();
    let text = codec.encode(&model).unwrap();
    assert!(text.ends_with("}\n"));
    assert_eq!(codec.decode(&text).unwrap(), model);
}

#[test]
fn test_yaml_and_json_carry_the_same_document() {
    let model = common::hospital_model();
    let from_yaml: SchemaDocument =
        serde_yaml_ng::from_str(&SchemaCodec::yaml().encode(&model).unwrap()).unwrap();
    let from_json: SchemaDocument =
        serde_json::from_str(&SchemaCodec::json().encode(&model).unwrap()).unwrap();
    assert_eq!(from_yaml, from_json);
    assert_eq!(from_yaml, SchemaDocument::from(&model));
}

#[test]
fn test_encoding_is_byte_stable() {
    let a = SchemaCodec::yaml().encode(&common::hospital_model()).unwrap();
    let b = SchemaCodec::yaml().encode(&common::hospital_model()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_relationships_live_on_source_columns() {
    let text = SchemaCodec::yaml().encode(&common::clinical_model()).unwrap();
    let doc: SchemaDocument = serde_yaml_ng::from_str(&text).unwrap();

    let patients = doc.tables.iter().find(|t| t.name == "patients").unwrap();
    let site_id = patients.columns.iter().find(|c| c.name == "site_id").unwrap();
    let reference = site_id.references.as_ref().unwrap();
    assert_eq!(reference.table, "sites");
    assert_eq!(reference.column, "site_id");

    let top_level: serde_yaml_ng::Value = serde_yaml_ng::from_str(&text).unwrap();
    let keys: Vec<&str> = top_level
        .as_mapping()
        .unwrap()
        .keys()
        .map(|k| k.as_str().unwrap())
        .collect();
    assert_eq!(keys, vec!["model_name", "tables", "metrics", "verified_queries"]);
}

#[test]
fn test_hand_written_document() {
    let yaml = r#"
model_name: sales
description: Order facts
tables:
  - name: orders
    source: dw.fact_orders
    columns:
      - name: order_id
        physical_type: BIGINT
        kind: identifier
        nullable: false
        primary_key: true
      - name: amount
        physical_type: DECIMAL(12,2)
        kind: measure-candidate
      - name: customer_id
        physical_type: BIGINT
        kind: identifier
        references:
          table: customers
          column: customer_id
  - name: customers
    columns:
      - name: customer_id
        physical_type: BIGINT
        kind: identifier
        primary_key: true
metrics:
  - name: revenue
    aggregation: sum
    table: orders
    column: amount
    filter: "amount > 0"
    description: Booked revenue
verified_queries:
  - name: revenue_by_customer
    tables: [orders, customers]
    metrics: [revenue]
    query: SELECT customer_id, SUM(amount) FROM dw.fact_orders GROUP BY customer_id
"#;

    let model = SchemaCodec::yaml().decode(yaml).unwrap();
    assert_eq!(model.description(), Some("Order facts"));
    assert_eq!(model.tables()[0].name, "customers");
    assert_eq!(model.tables()[0].source, "customers");
    assert_eq!(model.relationships()[0].describe(), "orders.customer_id -> customers.customer_id");
    assert_eq!(
        model.metric("revenue"),
        Some(
            &Metric::new("revenue", Aggregation::Sum, "orders", "amount")
                .with_filter("amount > 0")
                .with_description("Booked revenue")
        )
    );
    assert_eq!(model.verified_queries()[0].metrics, vec!["revenue".to_string()]);
}

#[test]
fn test_metric_on_missing_column_is_rejected() {
    let json = r#"{
        "model_name": "m",
        "tables": [{"name": "t", "columns": [{"name": "a", "physical_type": "INT", "kind": "measure-candidate"}]}],
        "metrics": [{"name": "sum_b", "aggregation": "sum", "table": "t", "column": "b"}]
    }"#;
    let err = SchemaCodec::json().decode(json).unwrap_err();
    assert!(matches!(
        err,
        ConversionError::Invalid(ValidationError::UnknownColumn { .. })
    ));
}

#[test]
fn test_unknown_kind_is_a_format_error() {
    let yaml = "model_name: m\ntables:\n- name: t\n  columns:\n  - name: c\n    physical_type: INT\n    kind: fact\n";
    assert!(matches!(
        SchemaCodec::yaml().decode(yaml),
        Err(ConversionError::Yaml(_))
    ));
}

#[test]
fn test_decode_failure_yields_no_model() {
    let result: Result<SemanticModel, _> = SchemaCodec::yaml().decode("model_name: [unclosed");
    assert!(result.is_err());
}
