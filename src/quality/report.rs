//! Assessment results.

use std::fmt;

use serde::Serialize;

use super::thresholds;

/// Readiness tier derived from the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Tier {
    #[serde(rename = "Ready")]
    Ready,
    #[serde(rename = "Minor Improvements")]
    MinorImprovements,
    #[serde(rename = "Major Improvements")]
    MajorImprovements,
}

impl Tier {
    /// Tier for a 0-100 score. Both lower bounds are inclusive.
    pub fn from_score(score: f64) -> Self {
        if score >= thresholds::READY {
            Tier::Ready
        } else if score >= thresholds::MINOR_IMPROVEMENTS {
            Tier::MinorImprovements
        } else {
            Tier::MajorImprovements
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Tier::Ready => "Ready",
            Tier::MinorImprovements => "Minor Improvements",
            Tier::MajorImprovements => "Major Improvements",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One named component of the structural or content score.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubScore {
    pub name: &'static str,
    /// 0-100.
    pub score: f64,
    /// One-line summary, e.g. `"1/2 tables have a primary key"`.
    pub details: String,
    /// Offending entities, at most [`thresholds::MAX_ISSUES`].
    pub issues: Vec<String>,
}

/// Per-table breakdown. All ratios are percentages.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableQuality {
    pub table_name: String,
    /// Share of the table and its columns that carry documentation.
    pub doc_coverage: f64,
    pub pk_present: bool,
    /// Share of foreign-key-shaped columns whose declared key resolves.
    pub fk_resolved_ratio: f64,
    /// `None` without content stats.
    pub null_ratio: Option<f64>,
    /// `None` without content stats.
    pub duplicate_ratio: Option<f64>,
}

/// Full assessment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityReport {
    pub overall_score: f64,
    pub tier: Tier,
    pub structural_score: f64,
    /// `None` when no table carries content stats.
    pub content_score: Option<f64>,
    pub content_unavailable: bool,
    pub per_table: Vec<TableQuality>,
    /// Structural components first, then content components when available.
    pub sub_scores: Vec<SubScore>,
    pub recommendations: Vec<String>,
}

impl QualityReport {
    pub fn table(&self, name: &str) -> Option<&TableQuality> {
        self.per_table.iter().find(|t| t.table_name == name)
    }

    pub fn sub_score(&self, name: &str) -> Option<&SubScore> {
        self.sub_scores.iter().find(|s| s.name == name)
    }
}

impl fmt::Display for QualityReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Overall: {:.1} ({})", self.overall_score, self.tier)?;
        writeln!(f, "Structural: {:.1}", self.structural_score)?;
        match self.content_score {
            Some(score) => writeln!(f, "Content: {:.1}", score)?,
            None => writeln!(f, "Content: unavailable")?,
        }
        for sub in &self.sub_scores {
            writeln!(f, "  {:<28} {:>6.1}  {}", sub.name, sub.score, sub.details)?;
        }
        if !self.recommendations.is_empty() {
            writeln!(f, "Recommendations:")?;
            for (i, rec) in self.recommendations.iter().enumerate() {
                writeln!(f, "  {}. {}", i + 1, rec)?;
            }
        }
        Ok(())
    }
}
