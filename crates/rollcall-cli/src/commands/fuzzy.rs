use rollcall_core::config::{load_config, validate_config, CleanOptions};
use rollcall_core::error::RollcallError;
use rollcall_core::fuzzy::FuzzyCandidate;
use rollcall_core::ingest::read_workbook;
use rollcall_core::model::Sheet;
use serde::Serialize;
use std::path::PathBuf;

use crate::output;

#[derive(Serialize)]
pub struct SheetCandidates {
    pub sheet: String,
    pub candidates: Vec<FuzzyCandidate>,
}

pub fn run(
    input_file: PathBuf,
    sheet: Option<String>,
    columns: Vec<String>,
    threshold: Option<f64>,
    config: Option<PathBuf>,
    output_format: &str,
) -> Result<(), RollcallError> {
    let mut options = match &config {
        Some(path) => load_config(path)?,
        None => CleanOptions::default(),
    };
    if let Some(t) = threshold {
        options.fuzzy.threshold = t;
    }
    validate_config(&options)?;

    let workbook = read_workbook(&input_file)?;
    let sheets: Vec<&Sheet> = match &sheet {
        Some(name) => vec![workbook
            .sheet(name)
            .ok_or_else(|| RollcallError::SheetNotFound(name.clone()))?],
        None => workbook.sheets.iter().collect(),
    };

    let results: Vec<SheetCandidates> = sheets
        .into_iter()
        .map(|s| SheetCandidates {
            sheet: s.name.clone(),
            candidates: rollcall_core::fuzzy_scan(s, &columns, &options.fuzzy),
        })
        .collect();

    match output_format {
        "json" => output::json::print(&results)?,
        _ => output::table::print_fuzzy(&results),
    }
    Ok(())
}
