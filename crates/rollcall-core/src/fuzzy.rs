use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::model::Table;
use crate::roles::{ColumnRoles, Role};

pub const DEFAULT_THRESHOLD: f64 = 0.9;
/// Columns with more distinct values than this are skipped (the scan is quadratic).
pub const DEFAULT_MAX_DISTINCT: usize = 2000;

/// Tunables for [`find_fuzzy_duplicates`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FuzzyOptions {
    /// Minimum normalized similarity (0.0 to 1.0) for a pair to be reported.
    pub threshold: f64,
    pub max_distinct: usize,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        FuzzyOptions {
            threshold: DEFAULT_THRESHOLD,
            max_distinct: DEFAULT_MAX_DISTINCT,
        }
    }
}

/// Two values of one column that look alike. For human review only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzyCandidate {
    pub column: String,
    pub value1: String,
    pub value2: String,
    pub similarity: f64,
}

/// Normalized edit similarity: 1.0 for equal strings, 0.0 for nothing in common.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Headers of the Name and Company columns, the usual targets of a scan.
pub fn default_columns(table: &Table, roles: &ColumnRoles) -> Vec<String> {
    (0..table.width())
        .filter(|&i| {
            let set = roles.get(i);
            set.contains(Role::Name) || set.contains(Role::Company)
        })
        .map(|i| table.columns[i].clone())
        .collect()
}

/// Report near-identical distinct values within each of `columns`.
///
/// Unknown columns and columns over the distinct-value cap are skipped.
/// Pairs are unordered and reported once, in first-appearance order.
pub fn find_fuzzy_duplicates(
    table: &Table,
    columns: &[String],
    options: &FuzzyOptions,
) -> Vec<FuzzyCandidate> {
    let mut candidates = Vec::new();

    for column in columns {
        let Some(idx) = table.column_index(column) else {
            tracing::debug!(column = %column, "fuzzy scan: no such column");
            continue;
        };

        let mut seen = HashSet::new();
        let values: Vec<String> = table
            .column(idx)
            .filter_map(|c| c.to_display_string())
            .filter(|v| seen.insert(v.clone()))
            .collect();

        if values.len() > options.max_distinct {
            tracing::warn!(
                column = %column,
                distinct = values.len(),
                cap = options.max_distinct,
                "fuzzy scan skipped column with too many distinct values"
            );
            continue;
        }

        for (i, a) in values.iter().enumerate() {
            for b in &values[i + 1..] {
                let score = similarity(a, b);
                if score >= options.threshold {
                    candidates.push(FuzzyCandidate {
                        column: column.clone(),
                        value1: a.clone(),
                        value2: b.clone(),
                        similarity: score,
                    });
                }
            }
        }
    }

    candidates
}
