pub mod delimited;
pub mod spreadsheet;

use std::collections::HashSet;
use std::path::Path;

use calamine::{Ods, Xls, Xlsb, Xlsx};

use crate::error::RollcallError;
use crate::model::Workbook;

/// Sheet names are capped at this length, as in Excel.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Input file formats the engine can read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Xlsx,
    Xlsb,
    Xls,
    Ods,
    Csv,
}

impl InputFormat {
    /// Detect the format from a file extension (case-insensitive).
    pub fn from_path(path: &Path) -> Result<Self, RollcallError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "xlsx" | "xlsm" => Ok(InputFormat::Xlsx),
            "xlsb" => Ok(InputFormat::Xlsb),
            "xls" => Ok(InputFormat::Xls),
            "ods" => Ok(InputFormat::Ods),
            "csv" => Ok(InputFormat::Csv),
            _ => Err(RollcallError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Read every sheet of the file at `path`.
///
/// A CSV file becomes one sheet named after the file stem.
pub fn read_workbook(path: &Path) -> Result<Workbook, RollcallError> {
    let format = InputFormat::from_path(path)?;
    let bytes = std::fs::read(path)
        .map_err(|e| RollcallError::Ingest(format!("{}: {e}", path.display())))?;
    let sheet_name = csv_sheet_name(path);
    tracing::debug!(path = %path.display(), ?format, bytes = bytes.len(), "reading workbook");
    read_workbook_bytes(&bytes, format, &sheet_name)
}

/// Read a workbook from memory. `csv_sheet_name` is only used for CSV input.
pub fn read_workbook_bytes(
    bytes: &[u8],
    format: InputFormat,
    csv_sheet_name: &str,
) -> Result<Workbook, RollcallError> {
    match format {
        InputFormat::Xlsx => spreadsheet::read_spreadsheet::<Xlsx<_>>(bytes),
        InputFormat::Xlsb => spreadsheet::read_spreadsheet::<Xlsb<_>>(bytes),
        InputFormat::Xls => spreadsheet::read_spreadsheet::<Xls<_>>(bytes),
        InputFormat::Ods => spreadsheet::read_spreadsheet::<Ods<_>>(bytes),
        InputFormat::Csv => delimited::read_csv(bytes, csv_sheet_name),
    }
}

fn csv_sheet_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .filter(|s| !s.is_empty())
        .unwrap_or("Sheet1");
    stem.chars().take(MAX_SHEET_NAME_LEN).collect()
}

/// Make headers usable as column keys.
///
/// Blank headers become `Unnamed: <index>`; repeats get a `.1`, `.2`, ...
/// suffix in order of appearance.
pub fn normalize_headers(raw: Vec<String>) -> Vec<String> {
    let mut used: HashSet<String> = HashSet::with_capacity(raw.len());
    let mut out = Vec::with_capacity(raw.len());

    for (i, header) in raw.into_iter().enumerate() {
        let trimmed = header.trim();
        let base = if trimmed.is_empty() {
            format!("Unnamed: {i}")
        } else {
            trimmed.to_string()
        };

        let mut name = base.clone();
        let mut n = 1;
        while used.contains(&name) {
            name = format!("{base}.{n}");
            n += 1;
        }
        used.insert(name.clone());
        out.push(name);
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_headers() {
        let raw = vec![
            "Name".to_string(),
            " ".to_string(),
            "Email".to_string(),
            "Name".to_string(),
            "Name".to_string(),
        ];
        assert_eq!(
            normalize_headers(raw),
            vec!["Name", "Unnamed: 1", "Email", "Name.1", "Name.2"]
        );
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            InputFormat::from_path(Path::new("a/b/Reg.XLSX")).unwrap(),
            InputFormat::Xlsx
        );
        assert_eq!(
            InputFormat::from_path(Path::new("list.xlsm")).unwrap(),
            InputFormat::Xlsx
        );
        assert_eq!(
            InputFormat::from_path(Path::new("list.csv")).unwrap(),
            InputFormat::Csv
        );
        assert!(matches!(
            InputFormat::from_path(Path::new("report.pdf")),
            Err(RollcallError::UnsupportedFormat(_))
        ));
        assert!(InputFormat::from_path(Path::new("noext")).is_err());
    }

    #[test]
    fn test_csv_sheet_name_from_stem() {
        assert_eq!(csv_sheet_name(Path::new("/tmp/attendees.csv")), "attendees");
        let long = format!("/tmp/{}.csv", "x".repeat(40));
        assert_eq!(csv_sheet_name(Path::new(&long)).len(), 31);
    }

    #[test]
    fn test_missing_file_is_an_ingest_error() {
        let err = read_workbook(Path::new("/nonexistent/registrations.xlsx")).unwrap_err();
        assert!(matches!(err, RollcallError::Ingest(_)));
    }

    #[test]
    fn test_garbage_bytes_are_an_ingest_error() {
        let err = read_workbook_bytes(b"not a workbook", InputFormat::Xlsx, "x").unwrap_err();
        assert!(matches!(err, RollcallError::Ingest(_)));
    }
}
