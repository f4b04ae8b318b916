use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use rust_xlsxwriter::{Format, Workbook as XlsxWorkbook, Worksheet};

use crate::error::RollcallError;
use crate::mask::mask_table;
use crate::model::{CellValue, Sheet, Table};
use crate::outcome::{CleaningOutcome, TrashTable};
use crate::roles::ColumnRoles;

/// First column of every trash sheet.
pub const ORIGIN_COLUMN: &str = "[Origin Sheet]";
/// Last column of every trash sheet: the columns whose value repeated.
pub const DUPLICATE_OF_COLUMN: &str = "[Duplicate Of]";
pub const TRASH_SHEET_PREFIX: &str = "Trash_";

const TRASH_ORIGIN_CHARS: usize = 15;
const MAX_SHEET_NAME_LEN: usize = 31;

static NON_WORD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\W").expect("word pattern is valid"));
static INVALID_SHEET_CHARS_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\[\]:*?/\\]").expect("sheet name pattern is valid"));

/// `"Day 1 (Seoul)"` -> `"Trash_Day1Seoul"`.
pub fn trash_sheet_name(origin: &str) -> String {
    let word_chars: String = NON_WORD_RE
        .replace_all(origin, "")
        .chars()
        .take(TRASH_ORIGIN_CHARS)
        .collect();
    format!("{TRASH_SHEET_PREFIX}{word_chars}")
}

/// Lay out a trash table for export: origin column first, all-Missing
/// columns omitted, removal causes last.
pub fn trash_sheet(trash: &TrashTable) -> Sheet {
    let kept: Vec<usize> = (0..trash.table.width())
        .filter(|&i| !trash.table.is_column_missing(i))
        .collect();

    let mut columns = Vec::with_capacity(kept.len() + 2);
    columns.push(ORIGIN_COLUMN.to_string());
    columns.extend(kept.iter().map(|&i| trash.table.columns[i].clone()));
    columns.push(DUPLICATE_OF_COLUMN.to_string());

    let rows = trash
        .table
        .rows
        .iter()
        .enumerate()
        .map(|(r, row)| {
            let mut out = Vec::with_capacity(columns.len());
            out.push(CellValue::text(&trash.origin_sheet));
            out.extend(kept.iter().map(|&i| row[i].clone()));
            let causes = trash.duplicate_of.get(r).map(|c| c.join(", "));
            out.push(causes.map(CellValue::Text).unwrap_or_default());
            out
        })
        .collect();

    Sheet {
        name: trash_sheet_name(&trash.origin_sheet),
        table: Table::from_rows(columns, rows),
    }
}

/// The sheets an outcome exports to: cleaned sheets, then one trash sheet
/// per origin. With `masked`, personal columns of both are masked.
pub fn outcome_sheets(outcome: &CleaningOutcome, masked: bool) -> Vec<Sheet> {
    let prepare = |table: &Table| {
        if masked {
            mask_table(table, &ColumnRoles::classify(table))
        } else {
            table.clone()
        }
    };

    let cleaned = outcome.cleaned.iter().map(|s| Sheet {
        name: s.name.clone(),
        table: prepare(&s.table),
    });
    let trash = outcome.trash.iter().map(|t| {
        let sheet = trash_sheet(t);
        Sheet {
            name: sheet.name,
            table: prepare(&sheet.table),
        }
    });

    cleaned.chain(trash).collect()
}

/// Write the outcome as an xlsx file.
pub fn export_outcome(
    outcome: &CleaningOutcome,
    masked: bool,
    path: &Path,
) -> Result<(), RollcallError> {
    write_sheets(&outcome_sheets(outcome, masked), path)
}

/// The outcome as xlsx bytes, for callers that stream the file themselves.
pub fn export_outcome_to_buffer(
    outcome: &CleaningOutcome,
    masked: bool,
) -> Result<Vec<u8>, RollcallError> {
    let mut workbook = build_workbook(&outcome_sheets(outcome, masked))?;
    workbook
        .save_to_buffer()
        .map_err(|e| RollcallError::Export(format!("failed to serialize workbook: {e}")))
}

/// Write `sheets` to a new xlsx file at `path`, in order.
pub fn write_sheets(sheets: &[Sheet], path: &Path) -> Result<(), RollcallError> {
    let mut workbook = build_workbook(sheets)?;
    workbook.save(path).map_err(|e| {
        RollcallError::Export(format!("failed to save {}: {e}", path.display()))
    })?;
    tracing::info!(path = %path.display(), sheets = sheets.len(), "wrote workbook");
    Ok(())
}

/// The whole outcome as pretty-printed JSON.
pub fn outcome_to_json(outcome: &CleaningOutcome) -> Result<String, RollcallError> {
    Ok(serde_json::to_string_pretty(outcome)?)
}

fn build_workbook(sheets: &[Sheet]) -> Result<XlsxWorkbook, RollcallError> {
    let mut workbook = XlsxWorkbook::new();
    let header_format = Format::new().set_bold();
    let mut used = HashSet::new();

    for sheet in sheets {
        let name = unique_sheet_name(&sheet.name, &mut used);
        let worksheet = workbook.add_worksheet().set_name(&name).map_err(|e| {
            RollcallError::Export(format!("failed to create sheet '{name}': {e}"))
        })?;
        write_table(worksheet, &sheet.table, &header_format)
            .map_err(|e| RollcallError::Export(format!("failed to write sheet '{name}': {e}")))?;
    }

    if sheets.is_empty() {
        // An xlsx file needs at least one sheet.
        workbook.add_worksheet();
    }

    Ok(workbook)
}

fn write_table(
    worksheet: &mut Worksheet,
    table: &Table,
    header_format: &Format,
) -> Result<(), rust_xlsxwriter::XlsxError> {
    for (c, header) in table.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, c as u16, header, header_format)?;
    }

    for (r, row) in table.rows.iter().enumerate() {
        let row_idx = (r + 1) as u32;
        for (c, cell) in row.iter().enumerate() {
            match cell {
                CellValue::Missing => {}
                CellValue::Number(n) => {
                    worksheet.write_number(row_idx, c as u16, *n)?;
                }
                CellValue::Text(s) => {
                    worksheet.write_string(row_idx, c as u16, s)?;
                }
            }
        }
    }

    if !table.columns.is_empty() {
        worksheet.set_freeze_panes(1, 0)?;
    }
    Ok(())
}

/// Excel sheet names: no `[]:*?/\`, at most 31 characters, unique
/// case-insensitively.
fn unique_sheet_name(raw: &str, used: &mut HashSet<String>) -> String {
    let cleaned: String = INVALID_SHEET_CHARS_RE
        .replace_all(raw, "_")
        .chars()
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let base = if cleaned.trim().is_empty() {
        "Sheet".to_string()
    } else {
        cleaned
    };

    let mut name = base.clone();
    let mut n = 2;
    while used.contains(&name.to_lowercase()) {
        let suffix = format!("_{n}");
        let room = MAX_SHEET_NAME_LEN - suffix.chars().count();
        name = base.chars().take(room).collect::<String>() + &suffix;
        n += 1;
    }
    used.insert(name.to_lowercase());
    name
}
