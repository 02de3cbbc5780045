#[path = "../common/mod.rs"]
mod common;

use semantiaz::convert::{Encoder, GraphCodec, ModelField};
use semantiaz::metadata::TableSample;
use serde_json::json;

#[test]
fn test_clinical_statements() {
    let text = GraphCodec::default().encode(&common::clinical_model()).unwrap();
    insta::assert_snapshot!(text, @r"
    CREATE (:`patients`:LogicalTable {name: 'patients', source: 'patients', columns: ['age', 'gender', 'patient_id', 'site_id']});
    CREATE (:`sites`:LogicalTable {name: 'sites', source: 'sites', columns: ['site_id']});
    MATCH (s:`patients`), (t:`sites`) WHERE s.`site_id` = t.`site_id` CREATE (s)-[:RELATED_TO {source_column: 'site_id', target_column: 'site_id', cardinality: 'many_to_one'}]->(t);
    ");
}

#[test]
fn test_nodes_come_before_edges() {
    let statements = GraphCodec::default().statements(&common::hospital_model());
    assert_eq!(statements.len(), 5);
    assert!(statements[..3].iter().all(|s| s.starts_with("CREATE (:")));
    assert!(statements[3..].iter().all(|s| s.starts_with("MATCH ")));
    assert!(statements[0].contains("source: 'clinical.patients'"));
    assert!(statements[1].contains("source: 'ref.sites'"));
}

#[test]
fn test_samples_respect_row_limit_and_order() {
    let sample = TableSample::new("sites", vec!["site_id".to_string(), "region".to_string()])
        .with_row(vec![json!(3), json!("North")])
        .with_row(vec![json!(1), json!(null)])
        .with_row(vec![json!(2), json!("South")]);

    let statements =
        GraphCodec::with_row_limit(2).statements_with_samples(&common::hospital_model(), &[sample]);

    let rows: Vec<&String> = statements.iter().filter(|s| s.starts_with("CREATE (:`sites` {")).collect();
    assert_eq!(
        rows,
        vec![
            "CREATE (:`sites` {`site_id`: 3, `region`: 'North'});",
            "CREATE (:`sites` {`site_id`: 1});",
        ]
    );
    // Row nodes sit between table nodes and edges.
    assert!(statements[5].starts_with("MATCH "));
}

#[test]
fn test_ragged_sample_rows_are_skipped() {
    let sample = TableSample::new("sites", vec!["site_id".to_string(), "region".to_string()])
        .with_row(vec![json!(7)])
        .with_row(vec![json!(3), json!("North")])
        .with_row(vec![json!(4), json!("East"), json!("extra")])
        .with_row(vec![json!(1), json!("South")]);

    let statements =
        GraphCodec::with_row_limit(2).statements_with_samples(&common::hospital_model(), &[sample]);

    let rows: Vec<&String> = statements.iter().filter(|s| s.starts_with("CREATE (:`sites` {")).collect();
    assert_eq!(
        rows,
        vec![
            "CREATE (:`sites` {`site_id`: 3, `region`: 'North'});",
            "CREATE (:`sites` {`site_id`: 1, `region`: 'South'});",
        ]
    );
}

#[test]
fn test_sample_for_unknown_table_is_skipped() {
    let sample = TableSample::new("ghosts", vec!["id".to_string()]).with_row(vec![json!(1)]);
    let model = common::clinical_model();
    assert_eq!(
        GraphCodec::default().statements_with_samples(&model, &[sample]),
        GraphCodec::default().statements(&model)
    );
}

#[test]
fn test_hostile_names_are_quoted() {
    let sample = TableSample::new("sites", vec!["site_id".to_string(), "region".to_string()])
        .with_row(vec![json!(1), json!("x'}) DETACH DELETE n //")]);
    let statements = GraphCodec::default().statements_with_samples(&common::hospital_model(), &[sample]);
    assert!(statements.contains(&r"CREATE (:`sites` {`site_id`: 1, `region`: 'x\'}) DETACH DELETE n //'});".to_string()));
}

#[test]
fn test_graph_codec_drops_most_fields() {
    assert_eq!(
        GraphCodec::default().unrepresented(),
        &[
            ModelField::ModelName,
            ModelField::ModelDescription,
            ModelField::TableDescription,
            ModelField::ColumnPhysicalType,
            ModelField::ColumnKind,
            ModelField::ColumnNullability,
            ModelField::ColumnPrimaryKey,
            ModelField::ColumnDescription,
            ModelField::Metrics,
            ModelField::VerifiedQueries,
        ]
    );
}
