use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Literal strings that spreadsheet exports use for an absent value.
pub const BLANK_LITERALS: &[&str] = &["", "nan", "NaN", "None", "NONE", "Nat"];

/// Decimal places kept when displaying numeric cells.
const NUMBER_DISPLAY_DP: u32 = 10;

/// A single cell. Serializes as `null`, a JSON number or a JSON string.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CellValue {
    #[default]
    Missing,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }

    /// The borrowed text of a `Text` cell.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            CellValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// True for text cells holding one of [`BLANK_LITERALS`].
    pub fn is_blank_literal(&self) -> bool {
        match self {
            CellValue::Text(s) => BLANK_LITERALS.contains(&s.as_str()),
            _ => false,
        }
    }

    /// String form used by role rules and key comparisons; `None` for Missing.
    pub fn to_display_string(&self) -> Option<String> {
        match self {
            CellValue::Missing => None,
            CellValue::Text(s) => Some(s.clone()),
            CellValue::Number(f) => Some(format_number(*f)),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Missing => Ok(()),
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

/// Render a spreadsheet number the way a person typed it.
///
/// Goes through `Decimal` so that `68.0` prints as `68` and binary
/// artifacts like `0.30000000000000004` print as `0.3`.
pub fn format_number(f: f64) -> String {
    match f64_to_decimal(f) {
        Some(d) => d.round_dp(NUMBER_DISPLAY_DP).normalize().to_string(),
        None => format!("{f}"),
    }
}

fn f64_to_decimal(f: f64) -> Option<Decimal> {
    if !f.is_finite() {
        return None;
    }
    let s = format!("{f}");
    s.parse::<Decimal>()
        .ok()
        .or_else(|| Decimal::try_from(f).ok())
}

/// One sheet's worth of data: a header row plus positionally ordered rows.
///
/// Every row has exactly `columns.len()` cells.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl Table {
    pub fn new(columns: Vec<String>) -> Self {
        Table {
            columns,
            rows: Vec::new(),
        }
    }

    /// Build a table, padding short rows with Missing and truncating long ones.
    pub fn from_rows(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let mut table = Table::new(columns);
        for row in rows {
            table.push_row(row);
        }
        table
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == header)
    }

    /// Cells of column `idx`, top to bottom.
    pub fn column(&self, idx: usize) -> impl Iterator<Item = &CellValue> + '_ {
        self.rows.iter().map(move |row| &row[idx])
    }

    pub fn is_column_missing(&self, idx: usize) -> bool {
        self.column(idx).all(CellValue::is_missing)
    }

    pub fn push_row(&mut self, mut row: Vec<CellValue>) {
        row.resize(self.columns.len(), CellValue::Missing);
        self.rows.push(row);
    }

    /// Append a column; `values` must hold one cell per row.
    pub fn push_column(&mut self, header: impl Into<String>, values: Vec<CellValue>) {
        let at = self.columns.len();
        self.insert_column(at, header, values);
    }

    /// Replace the cells of the column named `header`, or append it if absent.
    pub fn set_column(&mut self, header: &str, values: Vec<CellValue>) {
        let Some(idx) = self.column_index(header) else {
            self.push_column(header, values);
            return;
        };
        debug_assert_eq!(values.len(), self.rows.len());
        for (row, value) in self.rows.iter_mut().zip(values) {
            row[idx] = value;
        }
    }

    pub fn insert_column(&mut self, at: usize, header: impl Into<String>, values: Vec<CellValue>) {
        debug_assert_eq!(values.len(), self.rows.len());
        self.columns.insert(at, header.into());
        let mut values = values.into_iter();
        for row in &mut self.rows {
            row.insert(at, values.next().unwrap_or_default());
        }
    }

    /// Remove the columns at the given indices (any order, duplicates ignored).
    pub fn remove_columns(&mut self, indices: &[usize]) {
        let mut sorted: Vec<usize> = indices
            .iter()
            .copied()
            .filter(|&i| i < self.columns.len())
            .collect();
        sorted.sort_unstable();
        sorted.dedup();
        for &idx in sorted.iter().rev() {
            self.columns.remove(idx);
            for row in &mut self.rows {
                row.remove(idx);
            }
        }
    }
}

/// A named sheet from an input file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sheet {
    pub name: String,
    pub table: Table,
}

/// All sheets of an input file, in workbook order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Workbook {
    pub sheets: Vec<Sheet>,
}

impl Workbook {
    pub fn sheet(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }
}
