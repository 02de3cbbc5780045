//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use semantiaz::metadata::{ColumnContentStats, ColumnMetadata, ContentStats, TableMetadata};
use semantiaz::model::SemanticModel;
use semantiaz::semantic::{build, BuildOptions};

pub fn sites() -> TableMetadata {
    TableMetadata::new("sites").with_column(ColumnMetadata::new("site_id", "INT").primary_key())
}

pub fn patients() -> TableMetadata {
    TableMetadata::new("patients")
        .with_column(ColumnMetadata::new("patient_id", "INT").primary_key())
        .with_column(ColumnMetadata::new("site_id", "INT").references("sites", "site_id"))
        .with_column(ColumnMetadata::new("age", "INT"))
        .with_column(ColumnMetadata::new("gender", "STRING"))
}

/// `sites` and `patients`, undocumented and without content stats.
pub fn clinical_tables() -> Vec<TableMetadata> {
    vec![sites(), patients()]
}

/// The same tables with every table and column documented.
pub fn documented_clinical_tables() -> Vec<TableMetadata> {
    clinical_tables()
        .into_iter()
        .map(|mut table| {
            table.description = Some(format!("All {}", table.name));
            for column in &mut table.columns {
                column.description = Some(format!("The {} of a row", column.name));
            }
            table
        })
        .collect()
}

/// Clinical tables with clean content stats (no nulls, no duplicates).
pub fn clinical_tables_with_stats() -> Vec<TableMetadata> {
    vec![
        sites().with_content_stats(ContentStats::new(3).with_column(ColumnContentStats::new("site_id", 0, 3))),
        patients().with_content_stats(
            ContentStats::new(100)
                .with_column(ColumnContentStats::new("patient_id", 0, 100))
                .with_column(ColumnContentStats::new("site_id", 0, 3))
                .with_column(ColumnContentStats::new("age", 0, 60))
                .with_column(ColumnContentStats::new("gender", 0, 2).with_mixed_case(false)),
        ),
    ]
}

pub fn clinical_model() -> SemanticModel {
    build(&clinical_tables(), &BuildOptions::named("clinical"))
        .expect("clinical fixture builds")
        .model
}

/// A wider model: documented tables, a schema-qualified source, a temporal
/// column and a chain of relationships.
pub fn hospital_tables() -> Vec<TableMetadata> {
    vec![
        TableMetadata::new("sites")
            .with_schema("ref")
            .with_description("Hospital sites")
            .with_column(ColumnMetadata::new("site_id", "INT").primary_key())
            .with_column(ColumnMetadata::new("region", "VARCHAR(32)")),
        TableMetadata::new("patients")
            .with_schema("clinical")
            .with_column(ColumnMetadata::new("patient_id", "BIGINT").primary_key())
            .with_column(ColumnMetadata::new("site_id", "INT").references("sites", "site_id"))
            .with_column(ColumnMetadata::new("birth_date", "DATE"))
            .with_column(ColumnMetadata::new("gender", "VARCHAR(1)").with_description("Self-reported \"gender\"")),
        TableMetadata::new("visits")
            .with_schema("clinical")
            .with_column(ColumnMetadata::new("visit_id", "BIGINT").primary_key())
            .with_column(ColumnMetadata::new("patient_id", "BIGINT"))
            .with_column(ColumnMetadata::new("visited_at", "TIMESTAMP"))
            .with_column(ColumnMetadata::new("cost", "DECIMAL(10,2)").nullable(false)),
    ]
}

pub fn hospital_model() -> SemanticModel {
    let mut options = BuildOptions::named("hospital");
    options.description = Some("Sites, patients and visits".to_string());
    build(&hospital_tables(), &options).expect("hospital fixture builds").model
}
