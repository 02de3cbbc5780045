//! Non-fatal findings reported alongside a built model.

use std::fmt;

use serde::Serialize;

/// A naming-convention match with more than one plausible target table.
///
/// The column is left without a relationship; the builder never guesses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmbiguousInferenceWarning {
    pub table: String,
    pub column: String,
    /// Candidate target tables, sorted.
    pub candidates: Vec<String>,
}

impl fmt::Display for AmbiguousInferenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}.{}' matches several tables by name ({}); no relationship inferred",
            self.table,
            self.column,
            self.candidates.join(", ")
        )
    }
}

/// An advisory produced while building a model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Advisory {
    /// Naming-convention fallback could not pick a single target.
    AmbiguousInference(AmbiguousInferenceWarning),

    /// A declared foreign key whose target is not in the snapshot.
    DroppedForeignKey {
        table: String,
        column: String,
        target_table: String,
        target_column: String,
    },
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Advisory::AmbiguousInference(warning) => warning.fmt(f),
            Advisory::DroppedForeignKey {
                table,
                column,
                target_table,
                target_column,
            } => write!(
                f,
                "foreign key '{}.{}' -> '{}.{}' dropped: target not in snapshot",
                table, column, target_table, target_column
            ),
        }
    }
}
