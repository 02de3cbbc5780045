#[path = "../common/mod.rs"]
mod common;

use std::io::Write;

use async_trait::async_trait;
use serde_json::json;

use semantiaz::metadata::{
    MetadataError, MetadataProvider, MetadataResult, MetadataSnapshot, SnapshotMetadataProvider,
    TableMetadata, TableSample,
};

fn snapshot_file(snapshot: &MetadataSnapshot) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(serde_json::to_string_pretty(snapshot).unwrap().as_bytes())
        .unwrap();
    file
}

#[tokio::test]
async fn test_snapshot_file_round_trip() {
    let snapshot = MetadataSnapshot {
        tables: common::hospital_tables(),
        samples: vec![TableSample::new("sites", vec!["site_id".to_string(), "region".to_string()])
            .with_row(vec![json!(1), json!("North")])],
    };
    let file = snapshot_file(&snapshot);

    let provider = SnapshotMetadataProvider::from_file(file.path()).await.unwrap();
    assert_eq!(provider.snapshot(), &snapshot);
    assert_eq!(provider.list_tables().await.unwrap(), vec!["sites", "patients", "visits"]);
}

#[tokio::test]
async fn test_missing_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = SnapshotMetadataProvider::from_file(&path).await.unwrap_err();
    assert!(matches!(err, MetadataError::Io { path: p, .. } if p == path));
}

#[tokio::test]
async fn test_collect_all_sorts_by_name() {
    let provider = SnapshotMetadataProvider::from_tables(common::hospital_tables());
    let collected = provider.collect_all(2).await.unwrap();

    let names: Vec<&str> = collected.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["patients", "sites", "visits"]);
    assert!(collected.is_complete());
    assert!(collected.samples.is_empty());
}

#[tokio::test]
async fn test_collect_with_samples_truncates_rows() {
    let sample = TableSample::new("sites", vec!["site_id".to_string()])
        .with_row(vec![json!(1)])
        .with_row(vec![json!(2)])
        .with_row(vec![json!(3)]);
    let provider = SnapshotMetadataProvider::new(MetadataSnapshot {
        tables: common::clinical_tables(),
        samples: vec![sample],
    });

    let collected = provider.collect_with_samples(4, 2).await.unwrap();
    assert_eq!(collected.samples.len(), 2);
    // Tables without sampled rows still get an empty sample with their columns.
    assert_eq!(collected.samples[0].table, "patients");
    assert!(collected.samples[0].rows.is_empty());
    assert_eq!(collected.samples[0].columns.len(), 4);
    assert_eq!(collected.samples[1].rows, vec![vec![json!(1)], vec![json!(2)]]);
}

/// Lists a table it cannot return.
struct FlakyProvider {
    inner: SnapshotMetadataProvider,
}

#[async_trait]
impl MetadataProvider for FlakyProvider {
    async fn list_tables(&self) -> MetadataResult<Vec<String>> {
        let mut names = self.inner.list_tables().await?;
        names.push("broken".to_string());
        Ok(names)
    }

    async fn get_table(&self, table: &str) -> MetadataResult<TableMetadata> {
        if table == "broken" {
            return Err(MetadataError::Fetch {
                table: table.to_string(),
                message: "permission denied".to_string(),
            });
        }
        self.inner.get_table(table).await
    }

    async fn sample_rows(&self, table: &str, limit: usize) -> MetadataResult<TableSample> {
        self.inner.sample_rows(table, limit).await
    }
}

#[tokio::test]
async fn test_failures_do_not_abort_the_batch() {
    let provider = FlakyProvider {
        inner: SnapshotMetadataProvider::from_tables(common::clinical_tables()),
    };
    let collected = provider.collect_all(8).await.unwrap();

    assert_eq!(collected.tables.len(), 2);
    assert!(!collected.is_complete());
    assert_eq!(collected.failures.len(), 1);
    assert_eq!(collected.failures[0].table, "broken");
    assert_eq!(
        collected.failures[0].error.to_string(),
        "failed to fetch 'broken': permission denied"
    );

    // A partial list is still ordinary builder input.
    let outcome = semantiaz::semantic::build(&collected.tables, &Default::default()).unwrap();
    assert_eq!(outcome.model.tables().len(), 2);
}

#[tokio::test]
async fn test_unknown_table() {
    let provider = SnapshotMetadataProvider::from_tables(common::clinical_tables());
    assert!(matches!(
        provider.get_table("ghosts").await,
        Err(MetadataError::TableNotFound(name)) if name == "ghosts"
    ));
}

#[tokio::test]
async fn test_batch_fetch_of_named_tables() {
    let provider = SnapshotMetadataProvider::from_tables(common::hospital_tables());
    let names = vec!["visits".to_string(), "ghosts".to_string(), "sites".to_string()];

    let collected = provider.get_tables_batch(&names, 1).await;
    let fetched: Vec<&str> = collected.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(fetched, vec!["sites", "visits"]);
    assert_eq!(collected.failures.len(), 1);
    assert_eq!(collected.failures[0].table, "ghosts");

    let (samples, failures) = provider.sample_tables_batch(&names, 5, 3).await;
    let sampled: Vec<&str> = samples.iter().map(|s| s.table.as_str()).collect();
    assert_eq!(sampled, vec!["sites", "visits"]);
    assert_eq!(failures[0].table, "ghosts");
}
