//! End-to-end behaviour on the two-table clinical fixture.

#[path = "../common/mod.rs"]
mod common;

use semantiaz::metadata::{ColumnMetadata, TableMetadata};
use semantiaz::model::{Cardinality, Relationship, SemanticKind};
use semantiaz::quality::{assess, Tier};
use semantiaz::semantic::{build, Advisory, BuildOptions};

#[test]
fn test_undocumented_tables_without_stats() {
    let report = assess(&common::clinical_tables());

    assert_eq!(report.structural_score, 70.0);
    assert_eq!(report.overall_score, 70.0);
    assert_eq!(report.tier, Tier::MinorImprovements);
    assert_eq!(report.tier.to_string(), "Minor Improvements");
    assert!(report.content_unavailable);
    assert_eq!(report.content_score, None);

    let patients = report.table("patients").unwrap();
    assert_eq!(patients.doc_coverage, 0.0);
    assert!(patients.pk_present);
    assert_eq!(patients.fk_resolved_ratio, 100.0);
    assert_eq!(patients.null_ratio, None);
}

#[test]
fn test_fully_documented_tables() {
    let report = assess(&common::documented_clinical_tables());

    assert_eq!(report.structural_score, 100.0);
    assert_eq!(report.overall_score, 100.0);
    assert_eq!(report.tier, Tier::Ready);
    assert!(report.recommendations.is_empty());
}

#[test]
fn test_builder_on_clinical_tables() {
    let outcome = build(&common::clinical_tables(), &BuildOptions::named("clinical")).unwrap();
    let model = &outcome.model;

    assert_eq!(
        model.relationships(),
        &[Relationship::new(
            "patients",
            "site_id",
            "sites",
            "site_id",
            Cardinality::ManyToOne
        )]
    );

    let patients = model.table("patients").unwrap();
    assert_eq!(patients.column("age").unwrap().kind, SemanticKind::MeasureCandidate);
    assert_eq!(patients.column("gender").unwrap().kind, SemanticKind::DimensionCategorical);

    for metric in [
        "sum_age",
        "avg_age",
        "min_age",
        "max_age",
        "count_patients",
        "count_distinct_patient_id",
    ] {
        assert!(model.metric(metric).is_some(), "missing metric {}", metric);
    }
    assert!(outcome.advisories.is_empty());
}

#[test]
fn test_foreign_key_to_absent_table() {
    let tables = vec![TableMetadata::new("patients")
        .with_column(ColumnMetadata::new("patient_id", "INT").primary_key())
        .with_column(ColumnMetadata::new("site_id", "INT").references("sites", "site_id"))
        .with_column(ColumnMetadata::new("age", "INT"))
        .with_column(ColumnMetadata::new("gender", "STRING"))];

    let outcome = build(&tables, &BuildOptions::default()).unwrap();
    let model = &outcome.model;

    assert!(model.relationships().is_empty());
    let site_id = model.table("patients").unwrap().column("site_id").unwrap();
    assert!(site_id.kind.is_dimension());
    assert_eq!(site_id.kind, SemanticKind::DimensionNumeric);
    assert!(model.metric("sum_site_id").is_none());
    assert!(matches!(
        outcome.advisories.as_slice(),
        [Advisory::DroppedForeignKey { table, column, .. }] if table == "patients" && column == "site_id"
    ));
}
