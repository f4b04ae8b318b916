use crate::model::Table;
use serde::Serialize;

/// A cleaned sheet: deduplicated, normalized, with a `status` column.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CleanedSheet {
    pub name: String,
    pub table: Table,
}

/// Rows removed from one sheet as duplicates.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrashTable {
    /// Name of the sheet the rows came from.
    pub origin_sheet: String,
    /// Removed rows with the sheet's columns, in the order they were found.
    pub table: Table,
    /// Per trash row, the headers of the columns whose value repeated.
    pub duplicate_of: Vec<Vec<String>>,
}

/// Counters for one processed sheet.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SheetSummary {
    pub name: String,
    pub rows_read: usize,
    /// Rows dropped because every cell was Missing after normalization.
    pub empty_rows_dropped: usize,
    pub clean_rows: usize,
    pub duplicates_removed: usize,
    /// Clean rows with a non-empty status message.
    pub rows_flagged: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sequence_columns_dropped: Vec<String>,
}

/// Aggregate statistics over one cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningSummary {
    /// Sheets that produced a cleaned table, in workbook order.
    pub sheets: Vec<SheetSummary>,
    /// Sheets with no data rows at all.
    pub skipped_sheets: Vec<String>,
    /// Sheets whose rows were all Missing after normalization.
    pub dropped_sheets: Vec<String>,
}

impl CleaningSummary {
    pub fn rows_read(&self) -> usize {
        self.sheets.iter().map(|s| s.rows_read).sum()
    }

    pub fn clean_rows(&self) -> usize {
        self.sheets.iter().map(|s| s.clean_rows).sum()
    }

    pub fn duplicates_removed(&self) -> usize {
        self.sheets.iter().map(|s| s.duplicates_removed).sum()
    }

    pub fn rows_flagged(&self) -> usize {
        self.sheets.iter().map(|s| s.rows_flagged).sum()
    }

    pub fn empty_rows_dropped(&self) -> usize {
        self.sheets.iter().map(|s| s.empty_rows_dropped).sum()
    }
}

/// Everything produced by one cleaning run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleaningOutcome {
    pub cleaned: Vec<CleanedSheet>,
    /// One entry per sheet that lost at least one row, in workbook order.
    pub trash: Vec<TrashTable>,
    pub summary: CleaningSummary,
}

impl CleaningOutcome {
    /// The cleaned table for a sheet, if the sheet survived.
    pub fn get(&self, sheet: &str) -> Option<&Table> {
        self.cleaned
            .iter()
            .find(|s| s.name == sheet)
            .map(|s| &s.table)
    }

    pub fn trash_for(&self, sheet: &str) -> Option<&TrashTable> {
        self.trash.iter().find(|t| t.origin_sheet == sheet)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.cleaned.iter().map(|s| s.name.as_str()).collect()
    }
}
