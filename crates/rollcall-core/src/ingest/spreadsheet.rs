use std::io::Cursor;

use calamine::{Data, Range, Reader};

use super::normalize_headers;
use crate::error::RollcallError;
use crate::model::{format_number, CellValue, Sheet, Table, Workbook};

/// Read every sheet of a calamine-supported workbook, in workbook order.
///
/// The first row of each sheet's used range is the header row.
pub fn read_spreadsheet<'a, R>(bytes: &'a [u8]) -> Result<Workbook, RollcallError>
where
    R: Reader<Cursor<&'a [u8]>>,
    R::Error: std::fmt::Display,
{
    let mut workbook = calamine::open_workbook_from_rs::<R, _>(Cursor::new(bytes))
        .map_err(|e| RollcallError::Ingest(e.to_string()))?;

    let names = workbook.sheet_names();
    if names.is_empty() {
        return Err(RollcallError::Ingest("workbook contains no sheets".into()));
    }

    let mut sheets = Vec::with_capacity(names.len());
    for name in names {
        let range = workbook
            .worksheet_range(&name)
            .map_err(|e| RollcallError::SheetRead {
                sheet: name.clone(),
                reason: e.to_string(),
            })?;
        let table = range_to_table(&range);
        tracing::debug!(sheet = %name, rows = table.len(), columns = table.width(), "read sheet");
        sheets.push(Sheet { name, table });
    }

    Ok(Workbook { sheets })
}

fn range_to_table(range: &Range<Data>) -> Table {
    let mut rows = range.rows();
    let Some(header_row) = rows.next() else {
        return Table::default();
    };
    let headers = normalize_headers(header_row.iter().map(cell_as_header).collect());

    let data = rows
        .map(|row| row.iter().map(cell_as_value).collect())
        .collect();
    Table::from_rows(headers, data)
}

fn cell_as_header(cell: &Data) -> String {
    match cell {
        Data::String(s) => s.trim().to_string(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Empty | Data::Error(_) => String::new(),
        _ => format!("{cell}"),
    }
}

fn cell_as_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Text(b.to_string()),
        Data::Empty | Data::Error(_) => CellValue::Missing,
        _ => CellValue::Text(format!("{cell}")),
    }
}
