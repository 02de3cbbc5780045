#[path = "../common/mod.rs"]
mod common;

use semantiaz::metadata::{ColumnContentStats, ColumnMetadata, ContentStats, TableMetadata};
use semantiaz::model::{Cardinality, SemanticKind, ValidationError};
use semantiaz::semantic::{build, Advisory, BuildOptions, SemanticModelBuilder};

#[test]
fn test_hospital_relationships() {
    let model = common::hospital_model();
    let described: Vec<String> = model.relationships().iter().map(|r| r.describe()).collect();
    assert_eq!(
        described,
        vec![
            "patients.site_id -> sites.site_id".to_string(),
            "visits.patient_id -> patients.patient_id".to_string(),
        ]
    );
    assert!(model
        .relationships()
        .iter()
        .all(|r| r.cardinality == Cardinality::ManyToOne));
}

#[test]
fn test_hospital_kinds() {
    let model = common::hospital_model();
    let kind = |table: &str, column: &str| model.table(table).unwrap().column(column).unwrap().kind;

    assert_eq!(kind("sites", "region"), SemanticKind::DimensionCategorical);
    assert_eq!(kind("patients", "birth_date"), SemanticKind::DimensionTemporal);
    assert_eq!(kind("visits", "visited_at"), SemanticKind::DimensionTemporal);
    assert_eq!(kind("visits", "cost"), SemanticKind::MeasureCandidate);
    // Inferred through the naming convention, so an identifier too.
    assert_eq!(kind("visits", "patient_id"), SemanticKind::Identifier);
}

#[test]
fn test_hospital_metrics_and_queries() {
    let model = common::hospital_model();
    let names: Vec<&str> = model.metrics().iter().map(|m| m.name.as_str()).collect();
    assert_eq!(
        names,
        vec![
            "avg_cost",
            "count_distinct_patient_id",
            "count_distinct_site_id",
            "count_distinct_visit_id",
            "count_patients",
            "count_sites",
            "count_visits",
            "max_cost",
            "min_cost",
            "sum_cost",
        ]
    );

    assert_eq!(model.verified_queries().len(), 1);
    let query = &model.verified_queries()[0];
    assert_eq!(query.name, "count_sites_by_patients");
    assert_eq!(query.tables, vec!["patients".to_string(), "sites".to_string()]);
    assert_eq!(query.metrics, vec!["count_sites".to_string()]);
    assert!(query.query.contains("FROM clinical.patients AS s JOIN ref.sites AS t"));
}

#[test]
fn test_verified_queries_aggregate_their_metric() {
    let model = common::hospital_model();
    for query in model.verified_queries() {
        for name in &query.metrics {
            let metric = model.metric(name).unwrap();
            let expected = format!("{} AS {}", metric.to_sql(Some("t")), metric.name);
            assert!(query.query.contains(&expected), "{} does not compute {}", query.name, expected);
        }
    }
    let query = &model.verified_queries()[0].query;
    assert!(query.contains("COUNT(*) AS count_sites"));
    assert!(!query.contains("DISTINCT"));
}

#[test]
fn test_model_description_and_sources() {
    let model = common::hospital_model();
    assert_eq!(model.name(), "hospital");
    assert_eq!(model.description(), Some("Sites, patients and visits"));
    assert_eq!(model.table("sites").unwrap().source, "ref.sites");
    assert_eq!(model.table("visits").unwrap().source, "clinical.visits");
}

#[test]
fn test_input_order_does_not_matter() {
    let mut reversed = common::hospital_tables();
    reversed.reverse();
    for table in &mut reversed {
        table.columns.reverse();
    }
    let options = BuildOptions {
        description: Some("Sites, patients and visits".to_string()),
        ..BuildOptions::named("hospital")
    };
    let model = build(&reversed, &options).unwrap().model;

    assert_eq!(model, common::hospital_model());
    assert_eq!(model.fingerprint().unwrap(), common::hospital_model().fingerprint().unwrap());
}

#[test]
fn test_ambiguous_naming_match_is_reported_not_guessed() {
    let tables = vec![
        TableMetadata::new("site").with_column(ColumnMetadata::new("id", "INT").primary_key()),
        TableMetadata::new("sites").with_column(ColumnMetadata::new("id", "INT").primary_key()),
        TableMetadata::new("patients")
            .with_column(ColumnMetadata::new("patient_id", "INT").primary_key())
            .with_column(ColumnMetadata::new("site_id", "INT")),
    ];

    let outcome = build(&tables, &BuildOptions::default()).unwrap();
    assert!(outcome.model.relationships().is_empty());

    let warnings: Vec<_> = outcome.ambiguous_warnings().collect();
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].table, "patients");
    assert_eq!(warnings[0].column, "site_id");
    assert_eq!(warnings[0].candidates, vec!["site".to_string(), "sites".to_string()]);
}

#[test]
fn test_naming_fallback_respects_distinct_counts() {
    let tables = vec![
        TableMetadata::new("sites")
            .with_column(ColumnMetadata::new("site_id", "INT").primary_key())
            .with_content_stats(ContentStats::new(3).with_column(ColumnContentStats::new("site_id", 0, 3))),
        TableMetadata::new("patients")
            .with_column(ColumnMetadata::new("site_id", "INT"))
            .with_content_stats(ContentStats::new(50).with_column(ColumnContentStats::new("site_id", 0, 40))),
    ];

    let outcome = build(&tables, &BuildOptions::default()).unwrap();
    assert!(outcome.model.relationships().is_empty());
    assert!(outcome.advisories.is_empty());
}

#[test]
fn test_naming_fallback_can_be_disabled() {
    let tables = vec![
        common::sites(),
        TableMetadata::new("patients").with_column(ColumnMetadata::new("site_id", "INT")),
    ];
    let options = BuildOptions {
        naming_fallback: false,
        ..BuildOptions::default()
    };
    let outcome = SemanticModelBuilder::new(options).build(&tables).unwrap();
    assert!(outcome.model.relationships().is_empty());
}

#[test]
fn test_normalized_table_collision_is_fatal() {
    let tables = vec![
        TableMetadata::new("Lab Results").with_column(ColumnMetadata::new("id", "INT")),
        TableMetadata::new("lab_results").with_column(ColumnMetadata::new("id", "INT")),
    ];
    let err = build(&tables, &BuildOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::DuplicateTable {
            first: "Lab Results".to_string(),
            second: "lab_results".to_string(),
            normalized: "lab_results".to_string(),
        }
    );
}

#[test]
fn test_normalized_column_collision_is_fatal() {
    let tables = vec![TableMetadata::new("t")
        .with_column(ColumnMetadata::new("Order Date", "DATE"))
        .with_column(ColumnMetadata::new("order_date", "DATE"))];
    let err = build(&tables, &BuildOptions::default()).unwrap_err();
    assert!(matches!(err, ValidationError::DuplicateColumn { .. }));
    assert!(err.to_string().contains("order_date"));
}

#[test]
fn test_self_referential_foreign_key_is_fatal() {
    let tables = vec![TableMetadata::new("employees")
        .with_column(ColumnMetadata::new("employee_id", "INT").references("employees", "employee_id"))];
    let err = build(&tables, &BuildOptions::default()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::SelfReferentialForeignKey {
            table: "employees".to_string(),
            column: "employee_id".to_string(),
        }
    );
}

#[test]
fn test_hierarchy_within_one_table_is_allowed() {
    let tables = vec![TableMetadata::new("employees")
        .with_column(ColumnMetadata::new("employee_id", "INT").primary_key())
        .with_column(ColumnMetadata::new("manager_id", "INT").references("employees", "employee_id"))];
    let model = build(&tables, &BuildOptions::default()).unwrap().model;
    assert_eq!(model.relationships()[0].describe(), "employees.manager_id -> employees.employee_id");
}

#[test]
fn test_dropped_key_advisory_names_original_target() {
    let tables = vec![TableMetadata::new("patients")
        .with_column(ColumnMetadata::new("patient_id", "INT").primary_key())
        .with_column(ColumnMetadata::new("ward_id", "INT").references("Wards", "Ward_ID"))];
    let outcome = build(&tables, &BuildOptions::default()).unwrap();
    assert_eq!(
        outcome.advisories,
        vec![Advisory::DroppedForeignKey {
            table: "patients".to_string(),
            column: "ward_id".to_string(),
            target_table: "Wards".to_string(),
            target_column: "Ward_ID".to_string(),
        }]
    );
}

#[test]
fn test_summary_warnings() {
    let tables = vec![TableMetadata::new("events").with_column(ColumnMetadata::new("amount", "DECIMAL(8,2)"))];
    let summary = build(&tables, &BuildOptions::default()).unwrap().model.summary();
    assert_eq!(summary.tables, 1);
    assert_eq!(summary.metrics, 5);
    assert_eq!(
        summary.warnings,
        vec![
            "table 'events' has no dimensions".to_string(),
            "table 'events' has no primary key".to_string(),
        ]
    );
}

#[test]
fn test_junction_table_keys_relate_by_name() {
    let tables = vec![
        TableMetadata::new("enrollments")
            .with_column(ColumnMetadata::new("patient_id", "INT").primary_key())
            .with_column(ColumnMetadata::new("trial_id", "INT").primary_key()),
        TableMetadata::new("patients").with_column(ColumnMetadata::new("patient_id", "INT").primary_key()),
        TableMetadata::new("trials").with_column(ColumnMetadata::new("trial_id", "INT").primary_key()),
    ];

    let outcome = build(&tables, &BuildOptions::default()).unwrap();
    let described: Vec<String> = outcome.model.relationships().iter().map(|r| r.describe()).collect();
    assert_eq!(
        described,
        vec![
            "enrollments.patient_id -> patients.patient_id".to_string(),
            "enrollments.trial_id -> trials.trial_id".to_string(),
        ]
    );
    assert!(outcome.advisories.is_empty());
}
