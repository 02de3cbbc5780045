#[path = "../common/mod.rs"]
mod common;

use semantiaz::metadata::{ColumnContentStats, ColumnMetadata, ContentStats, TableMetadata, ValuePattern};
use semantiaz::quality::{assess, Tier};

fn close(actual: f64, expected: f64) -> bool {
    (actual - expected).abs() < 0.005
}

/// One table with every structural and content problem the assessor looks for.
fn messy_orders() -> TableMetadata {
    TableMetadata::new("orders")
        .with_column(ColumnMetadata::new("order_id", "INT"))
        .with_column(ColumnMetadata::new("customer_id", "INT"))
        .with_column(ColumnMetadata::new("amount", "VARCHAR(20)"))
        .with_column(ColumnMetadata::new("notes", "TEXT"))
        .with_content_stats(
            ContentStats::new(10)
                .with_duplicates(2)
                .with_column(ColumnContentStats::new("amount", 0, 9).with_pattern(ValuePattern::Numeric))
                .with_column(ColumnContentStats::new("notes", 8, 2).with_mixed_case(true)),
        )
}

#[test]
fn test_clean_content_lifts_the_overall_score() {
    let report = assess(&common::clinical_tables_with_stats());

    assert!(close(report.structural_score, 70.0));
    assert_eq!(report.content_score, Some(100.0));
    assert!(!report.content_unavailable);
    assert!(close(report.overall_score, 82.0));
    assert_eq!(report.tier, Tier::Ready);
    assert_eq!(report.sub_scores.len(), 7);
    assert_eq!(
        report.recommendations,
        vec!["Add descriptions to tables and columns".to_string()]
    );
}

#[test]
fn test_messy_table() {
    let report = assess(&[messy_orders()]);

    assert!(close(report.structural_score, 15.0));
    assert!(close(report.content_score.unwrap(), 71.0));
    assert!(close(report.overall_score, 37.4));
    assert_eq!(report.tier, Tier::MajorImprovements);

    let types = report.sub_score("Data Type Appropriateness").unwrap();
    assert!(close(types.score, 75.0));
    assert_eq!(types.issues, vec!["orders.amount: VARCHAR(20)".to_string()]);

    let nulls = report.sub_score("Null Value Quality").unwrap();
    assert!(close(nulls.score, 80.0));
    assert_eq!(nulls.issues, vec!["orders.notes: 80.0% null".to_string()]);

    let duplicates = report.sub_score("Duplicate Records").unwrap();
    assert_eq!(duplicates.issues, vec!["orders: 2 duplicates (20.0%)".to_string()]);

    assert_eq!(
        report.recommendations,
        vec![
            "Add descriptions to tables and columns",
            "Define primary keys for all tables",
            "Establish foreign key relationships between tables",
            "Standardize data formatting across columns",
            "orders: declare a primary key",
            "orders: declare foreign keys for its key-like columns",
            "orders: deduplicate rows",
        ]
    );
}

#[test]
fn test_per_table_breakdown() {
    let mut tables = common::clinical_tables_with_stats();
    tables.push(messy_orders());
    let report = assess(&tables);

    let names: Vec<&str> = report.per_table.iter().map(|t| t.table_name.as_str()).collect();
    assert_eq!(names, vec!["orders", "patients", "sites"]);

    let orders = report.table("orders").unwrap();
    assert!(!orders.pk_present);
    assert_eq!(orders.doc_coverage, 0.0);
    assert_eq!(orders.fk_resolved_ratio, 0.0);
    assert_eq!(orders.null_ratio, Some(20.0));
    assert_eq!(orders.duplicate_ratio, Some(20.0));

    let patients = report.table("patients").unwrap();
    assert!(patients.pk_present);
    assert_eq!(patients.fk_resolved_ratio, 100.0);
    assert_eq!(patients.null_ratio, Some(0.0));
}

#[test]
fn test_content_is_averaged_over_tables_with_stats() {
    let mut tables = common::clinical_tables();
    tables.push(messy_orders());
    let report = assess(&tables);

    // Only `orders` carries stats.
    assert!(close(report.content_score.unwrap(), 71.0));
    assert_eq!(report.table("sites").unwrap().null_ratio, None);
}

#[test]
fn test_issues_are_capped() {
    let mut table = TableMetadata::new("wide");
    for i in 0..12 {
        table = table.with_column(ColumnMetadata::new(format!("c{}", i), "INT"));
    }
    let report = assess(&[table]);
    let docs = report.sub_score("Documentation Coverage").unwrap();
    assert_eq!(docs.issues.len(), 5);
    assert_eq!(docs.details, "0/13 tables and columns are documented");
}

#[test]
fn test_assessment_ignores_input_order() {
    let mut tables = common::clinical_tables_with_stats();
    tables.push(messy_orders());
    let forward = assess(&tables);
    tables.reverse();
    assert_eq!(assess(&tables), forward);
}

#[test]
fn test_report_rendering() {
    let report = assess(&common::clinical_tables());
    let text = report.to_string();
    assert!(text.starts_with("Overall: 70.0 (Minor Improvements)\n"));
    assert!(text.contains("Content: unavailable"));
    assert!(text.contains("1. Add descriptions to tables and columns"));

    let json = serde_json::to_value(&report).unwrap();
    assert_eq!(json["tier"], "Minor Improvements");
    assert_eq!(json["content_score"], serde_json::Value::Null);
}
