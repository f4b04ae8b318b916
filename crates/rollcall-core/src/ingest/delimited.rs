use super::normalize_headers;
use crate::error::RollcallError;
use crate::model::{CellValue, Sheet, Table, Workbook};

/// Read a CSV file as a single-sheet workbook.
///
/// Every field is text; empty fields are Missing.
pub fn read_csv(bytes: &[u8], sheet_name: &str) -> Result<Workbook, RollcallError> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers = reader
        .headers()
        .map_err(|e| RollcallError::Ingest(format!("invalid CSV header: {e}")))?
        .iter()
        .map(str::to_string)
        .collect();
    let mut table = Table::new(normalize_headers(headers));

    for (i, record) in reader.records().enumerate() {
        let record = record
            .map_err(|e| RollcallError::Ingest(format!("invalid CSV record {}: {e}", i + 1)))?;
        table.push_row(
            record
                .iter()
                .map(|field| {
                    if field.is_empty() {
                        CellValue::Missing
                    } else {
                        CellValue::text(field)
                    }
                })
                .collect(),
        );
    }

    Ok(Workbook {
        sheets: vec![Sheet {
            name: sheet_name.to_string(),
            table,
        }],
    })
}
