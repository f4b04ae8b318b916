use rollcall_core::error::RollcallError;
use rollcall_core::ingest::read_workbook;
use rollcall_core::roles::{describe_columns, ColumnReport};
use serde::Serialize;
use std::path::PathBuf;

use crate::output;

#[derive(Serialize)]
pub struct SheetRoles {
    pub sheet: String,
    pub columns: Vec<ColumnReport>,
}

pub fn run(input_file: PathBuf, output_format: &str) -> Result<(), RollcallError> {
    let workbook = read_workbook(&input_file)?;
    let sheets: Vec<SheetRoles> = workbook
        .sheets
        .iter()
        .map(|s| SheetRoles {
            sheet: s.name.clone(),
            columns: describe_columns(&s.table),
        })
        .collect();

    match output_format {
        "json" => output::json::print(&sheets)?,
        _ => output::table::print_roles(&sheets),
    }
    Ok(())
}
