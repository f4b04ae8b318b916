pub mod config;
pub mod dedup;
pub mod error;
pub mod export;
pub mod flag;
pub mod fuzzy;
pub mod ingest;
pub mod mapping;
pub mod mask;
pub mod model;
pub mod normalize;
pub mod outcome;
pub mod pipeline;
pub mod roles;
pub mod template;

use std::path::Path;

use config::CleanOptions;
use error::RollcallError;
use fuzzy::FuzzyCandidate;
use mapping::MappingStore;
use model::{Sheet, Workbook};
use outcome::CleaningOutcome;
use roles::ColumnRoles;

/// Main API entry point: read a registration file and clean every sheet.
///
/// Reading happens before the mapping is loaded, so an unreadable file
/// fails without touching the mapping store.
pub fn clean_file(
    path: &Path,
    store: &dyn MappingStore,
    options: &CleanOptions,
) -> Result<CleaningOutcome, RollcallError> {
    let workbook = ingest::read_workbook(path)?;
    tracing::info!(
        path = %path.display(),
        sheets = workbook.sheets.len(),
        "read workbook"
    );
    pipeline::clean_workbook(&workbook, store, options)
}

/// Masked copies of every sheet, in workbook order.
pub fn mask_workbook(workbook: &Workbook) -> Vec<Sheet> {
    workbook
        .sheets
        .iter()
        .map(|sheet| Sheet {
            name: sheet.name.clone(),
            table: mask::mask_table(&sheet.table, &ColumnRoles::classify(&sheet.table)),
        })
        .collect()
}

/// Rendered messages for every sheet, each with a trailing `message` column.
pub fn render_workbook(workbook: &Workbook, template: &str) -> Vec<Sheet> {
    workbook
        .sheets
        .iter()
        .map(|sheet| Sheet {
            name: sheet.name.clone(),
            table: template::generate_messages(
                &sheet.table,
                &ColumnRoles::classify(&sheet.table),
                template,
            ),
        })
        .collect()
}

/// Fuzzy scan of one sheet. With no `columns`, scans the Name and Company
/// columns.
pub fn fuzzy_scan(
    sheet: &Sheet,
    columns: &[String],
    options: &fuzzy::FuzzyOptions,
) -> Vec<FuzzyCandidate> {
    let columns = if columns.is_empty() {
        fuzzy::default_columns(&sheet.table, &ColumnRoles::classify(&sheet.table))
    } else {
        columns.to_vec()
    };
    fuzzy::find_fuzzy_duplicates(&sheet.table, &columns, options)
}
