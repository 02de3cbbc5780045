//! Semantic-layer readiness assessment.
//!
//! Scores raw table metadata (not a built model) on two axes and combines
//! them into one overall score and tier:
//!
//! ```text
//! structural = 0.30 doc + 0.30 pk + 0.20 fk + 0.20 type
//! content    = 0.40 (100 - null%) + 0.30 consistency + 0.30 (100 - dup%)
//!              averaged over tables that carry content stats
//! overall    = 0.6 structural + 0.4 content      (structural alone when no
//!                                                 table has stats)
//! ```
//!
//! All scores are 0-100, rounded to two decimals.

mod assessor;
mod report;

pub use assessor::assess;
pub use report::{QualityReport, SubScore, TableQuality, Tier};

/// Weights of the score components.
pub mod weights {
    pub const DOCUMENTATION: f64 = 0.30;
    pub const PRIMARY_KEYS: f64 = 0.30;
    pub const FOREIGN_KEYS: f64 = 0.20;
    pub const DATA_TYPES: f64 = 0.20;

    pub const NON_NULL: f64 = 0.40;
    pub const CONSISTENCY: f64 = 0.30;
    pub const UNIQUE_ROWS: f64 = 0.30;

    pub const STRUCTURAL: f64 = 0.6;
    pub const CONTENT: f64 = 0.4;
}

/// Tier boundaries and reporting limits.
pub mod thresholds {
    /// Lowest overall score rated "Ready".
    pub const READY: f64 = 80.0;
    /// Lowest overall score rated "Minor Improvements".
    pub const MINOR_IMPROVEMENTS: f64 = 60.0;
    /// Sub-scores under this get a recommendation.
    pub const RECOMMEND_BELOW: f64 = 70.0;
    /// A column above this null percentage is reported as an issue.
    pub const HIGH_NULL_PERCENT: f64 = 50.0;
    /// Issues kept per sub-score.
    pub const MAX_ISSUES: usize = 5;
}
