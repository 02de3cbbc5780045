//! Name normalization.
//!
//! Table and column names from different databases use different casing and
//! separators (`Patient ID`, `patient-id`, `PATIENT_ID`). Every name that
//! enters a model is normalized to a single lowercase snake form so that
//! lookups and URIs are stable.

use std::sync::LazyLock;

use regex::Regex;

/// Runs of anything that is not a letter or digit.
static SEPARATOR_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\p{L}\p{N}]+").expect("separator pattern is valid"));

/// Normalize a table or column name.
///
/// Lower-cases the name, collapses every run of whitespace or punctuation
/// into one underscore, and trims leading and trailing underscores. May
/// return an empty string for names made only of punctuation; callers treat
/// that as a validation failure.
///
/// # Examples
/// ```
/// use semantiaz::model::normalize_name;
///
/// assert_eq!(normalize_name("Patient ID"), "patient_id");
/// assert_eq!(normalize_name("  order--lines  "), "order_lines");
/// assert_eq!(normalize_name("SITE_ID"), "site_id");
/// ```
pub fn normalize_name(name: &str) -> String {
    let lower = name.to_lowercase();
    SEPARATOR_RUN
        .replace_all(&lower, "_")
        .trim_matches('_')
        .to_string()
}
