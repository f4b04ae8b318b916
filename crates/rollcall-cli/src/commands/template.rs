use rollcall_core::config::{load_config, CleanOptions};
use rollcall_core::error::RollcallError;
use rollcall_core::export::write_sheets;
use rollcall_core::mapping::JsonFileStore;
use rollcall_core::model::{Sheet, Workbook};
use rollcall_core::template::MESSAGE_COLUMN;
use std::path::PathBuf;

pub fn run(
    input_file: PathBuf,
    mapping: PathBuf,
    config: Option<PathBuf>,
    template: Option<String>,
    template_file: Option<PathBuf>,
    sheet: Option<String>,
    out: Option<PathBuf>,
) -> Result<(), RollcallError> {
    let text = match (template, template_file) {
        (Some(text), _) => text,
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => {
            return Err(RollcallError::ConfigInvalid(
                "either --template or --template-file is required".into(),
            ))
        }
    };

    let options = match &config {
        Some(path) => load_config(path)?,
        None => CleanOptions::default(),
    };

    // Messages go to the deduplicated list, so clean first.
    let store = JsonFileStore::new(mapping);
    let outcome = rollcall_core::clean_file(&input_file, &store, &options)?;

    let cleaned: Vec<Sheet> = outcome
        .cleaned
        .into_iter()
        .filter(|s| sheet.as_ref().map_or(true, |name| &s.name == name))
        .map(|s| Sheet {
            name: s.name,
            table: s.table,
        })
        .collect();
    if let (Some(name), true) = (&sheet, cleaned.is_empty()) {
        return Err(RollcallError::SheetNotFound(name.clone()));
    }

    let rendered = rollcall_core::render_workbook(&Workbook { sheets: cleaned }, &text);

    match out {
        Some(path) => {
            write_sheets(&rendered, &path)?;
            eprintln!(
                "Rendered messages for {} sheet(s), written to {}",
                rendered.len(),
                path.display()
            );
        }
        None => {
            for s in &rendered {
                let Some(col) = s.table.column_index(MESSAGE_COLUMN) else {
                    continue;
                };
                for row in &s.table.rows {
                    println!("{}", row[col]);
                }
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rollcall_core::ingest::read_workbook;
    use rollcall_core::model::CellValue;

    #[test]
    fn test_config_applies_to_cleaning_pass() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("guests.csv");
        let config = dir.path().join("options.json");
        let out = dir.path().join("messages.xlsx");
        std::fs::write(&input, "No,Name\n1,kim\n").unwrap();
        std::fs::write(&config, r#"{ "drop_sequence_columns": false }"#).unwrap();

        run(
            input,
            dir.path().join("mapping.json"),
            Some(config),
            Some("{No}-{name}".into()),
            None,
            None,
            Some(out.clone()),
        )
        .unwrap();

        let table = &read_workbook(&out).unwrap().sheets[0].table;
        let col = table.column_index(MESSAGE_COLUMN).unwrap();
        assert_eq!(table.rows[0][col], CellValue::text("1-Kim"));
    }
}
