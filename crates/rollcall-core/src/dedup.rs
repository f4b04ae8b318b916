use std::cmp::Reverse;
use std::collections::HashSet;

use crate::model::{CellValue, Table};
use crate::roles::{ColumnRoles, Role};

/// Identifying values must be at least this many characters long.
pub const DEFAULT_MIN_KEY_LENGTH: usize = 4;

/// Identifying column groups, checked in this order.
const IDENTIFYING_ROLES: [Role; 2] = [Role::Email, Role::Phone];

/// Rows kept and rows removed by [`deduplicate`].
#[derive(Debug, Clone, PartialEq)]
pub struct Partition {
    /// Surviving rows, most complete first.
    pub clean: Table,
    /// Removed rows, in the order they were found.
    pub trash: Table,
    /// For each trash row, the headers of the columns whose value repeated.
    pub causes: Vec<Vec<String>>,
}

/// Number of non-Missing cells in a row.
pub fn completeness_score(row: &[CellValue]) -> usize {
    row.iter().filter(|c| !c.is_missing()).count()
}

/// Split a normalized table into survivors and duplicates.
///
/// Rows are ranked by completeness score, highest first; rows with equal
/// scores keep their original relative order. Walking that ranking, a row is
/// a duplicate when one of its Email or Phone values (of at least
/// `min_key_length` characters) already appeared in the same column of an
/// earlier row. Each column is checked independently and the results are
/// OR-ed.
pub fn deduplicate(table: &Table, roles: &ColumnRoles, min_key_length: usize) -> Partition {
    let mut order: Vec<usize> = (0..table.len()).collect();
    // sort_by_key is stable; equal scores keep ingestion order.
    order.sort_by_key(|&i| Reverse(completeness_score(&table.rows[i])));

    let mut causes: Vec<Vec<String>> = vec![Vec::new(); order.len()];
    let mut scanned: HashSet<usize> = HashSet::new();

    for role in IDENTIFYING_ROLES {
        for col in roles.columns_with(role) {
            // A column can be both Email and Phone ("Contact Email").
            if !scanned.insert(col) {
                continue;
            }
            let mut seen: HashSet<String> = HashSet::new();
            for (rank, &row_idx) in order.iter().enumerate() {
                let Some(value) = table.rows[row_idx][col].to_display_string() else {
                    continue;
                };
                if value.chars().count() < min_key_length {
                    continue;
                }
                if !seen.insert(value) {
                    causes[rank].push(table.columns[col].clone());
                }
            }
        }
    }

    let mut clean = Table::new(table.columns.clone());
    let mut trash = Table::new(table.columns.clone());
    let mut trash_causes = Vec::new();

    for (rank, &row_idx) in order.iter().enumerate() {
        let row = table.rows[row_idx].clone();
        if causes[rank].is_empty() {
            clean.rows.push(row);
        } else {
            trash.rows.push(row);
            trash_causes.push(std::mem::take(&mut causes[rank]));
        }
    }

    tracing::debug!(
        clean = clean.len(),
        trash = trash.len(),
        "deduplicated table"
    );

    Partition {
        clean,
        trash,
        causes: trash_causes,
    }
}
