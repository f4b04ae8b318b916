use crate::config::{validate_config, CleanOptions};
use crate::dedup::deduplicate;
use crate::error::RollcallError;
use crate::flag::flag_missing_info;
use crate::mapping::{MappingIndex, MappingStore};
use crate::model::{Sheet, Workbook};
use crate::normalize::normalize_table;
use crate::outcome::{CleanedSheet, CleaningOutcome, SheetSummary, TrashTable};
use crate::roles::{ColumnRoles, Role};

/// Result of cleaning a single sheet.
#[derive(Debug, Clone, PartialEq)]
pub struct SheetOutcome {
    pub cleaned: CleanedSheet,
    /// `None` when nothing was removed.
    pub trash: Option<TrashTable>,
    pub summary: SheetSummary,
}

/// Clean every sheet of a workbook.
///
/// The mapping is loaded from `store` once, before any row is touched; a
/// load failure aborts the run. Sheets are processed in workbook order.
pub fn clean_workbook(
    workbook: &Workbook,
    store: &dyn MappingStore,
    options: &CleanOptions,
) -> Result<CleaningOutcome, RollcallError> {
    validate_config(options)?;

    let mapping = store.load()?;
    tracing::debug!(entries = mapping.len(), store = %store.location(), "loaded mapping");
    let index = mapping.index();

    let mut outcome = CleaningOutcome::default();

    for sheet in &workbook.sheets {
        if sheet.table.is_empty() {
            tracing::debug!(sheet = %sheet.name, "skipping empty sheet");
            outcome.summary.skipped_sheets.push(sheet.name.clone());
            continue;
        }

        match clean_sheet(sheet, &index, options) {
            Some(result) => {
                outcome.cleaned.push(result.cleaned);
                outcome.trash.extend(result.trash);
                outcome.summary.sheets.push(result.summary);
            }
            None => outcome.summary.dropped_sheets.push(sheet.name.clone()),
        }
    }

    Ok(outcome)
}

/// Run classify, normalize, deduplicate, flag and sequence-column removal
/// on one sheet. Returns `None` if no row survives normalization.
pub fn clean_sheet(
    sheet: &Sheet,
    mapping: &MappingIndex,
    options: &CleanOptions,
) -> Option<SheetOutcome> {
    let roles = ColumnRoles::classify(&sheet.table);
    let normalized = normalize_table(&sheet.table, &roles, mapping);

    if normalized.is_empty() {
        tracing::warn!(sheet = %sheet.name, "every row is empty after normalization, dropping sheet");
        return None;
    }

    let partition = deduplicate(&normalized, &roles, options.min_key_length);
    let mut clean = partition.clean;
    let rows_flagged = flag_missing_info(&mut clean, &roles);

    let mut sequence_columns_dropped = Vec::new();
    if options.drop_sequence_columns {
        let seq = roles.columns_with(Role::SequenceNumber);
        sequence_columns_dropped = seq.iter().map(|&i| clean.columns[i].clone()).collect();
        clean.remove_columns(&seq);
    }

    let summary = SheetSummary {
        name: sheet.name.clone(),
        rows_read: sheet.table.len(),
        empty_rows_dropped: sheet.table.len() - normalized.len(),
        clean_rows: clean.len(),
        duplicates_removed: partition.trash.len(),
        rows_flagged,
        sequence_columns_dropped,
    };

    tracing::info!(
        sheet = %sheet.name,
        rows = summary.rows_read,
        clean = summary.clean_rows,
        duplicates = summary.duplicates_removed,
        flagged = summary.rows_flagged,
        "cleaned sheet"
    );

    let trash = (!partition.trash.is_empty()).then(|| TrashTable {
        origin_sheet: sheet.name.clone(),
        table: partition.trash,
        duplicate_of: partition.causes,
    });

    Some(SheetOutcome {
        cleaned: CleanedSheet {
            name: sheet.name.clone(),
            table: clean,
        },
        trash,
        summary,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flag::STATUS_COLUMN;
    use crate::mapping::{Mapping, MemoryStore};
    use crate::model::{CellValue, Table};

    fn t(s: &str) -> CellValue {
        CellValue::text(s)
    }

    fn sheet(name: &str, columns: &[&str], rows: Vec<Vec<CellValue>>) -> Sheet {
        Sheet {
            name: name.into(),
            table: Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows),
        }
    }

    #[test]
    fn test_two_row_duplicate_goes_to_trash() {
        let wb = Workbook {
            sheets: vec![sheet(
                "Day1",
                &["No", "Name", "Email", "Company"],
                vec![
                    vec![t("1"), t("kim"), t("A@x.com "), t("samsung")],
                    vec![t("2"), t("lee"), t("a@x.com"), CellValue::Missing],
                ],
            )],
        };
        let store = MemoryStore::new();
        let outcome = clean_workbook(&wb, &store, &CleanOptions::default()).unwrap();

        let clean = outcome.get("Day1").unwrap();
        assert_eq!(clean.columns, vec!["Name", "Email", "Company", STATUS_COLUMN]);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean.rows[0][0], t("Kim"));
        assert_eq!(clean.rows[0][2], t("Samsung"));

        let trash = outcome.trash_for("Day1").unwrap();
        assert_eq!(trash.table.len(), 1);
        assert_eq!(trash.table.rows[0][1], t("Lee"));
        assert_eq!(trash.duplicate_of, vec![vec!["Email".to_string()]]);

        let summary = &outcome.summary.sheets[0];
        assert_eq!(summary.duplicates_removed, 1);
        assert_eq!(summary.sequence_columns_dropped, vec!["No".to_string()]);
    }

    #[test]
    fn test_sequence_columns_kept_when_disabled() {
        let wb = Workbook {
            sheets: vec![sheet("S", &["No", "Name"], vec![vec![t("1"), t("kim")]])],
        };
        let options = CleanOptions {
            drop_sequence_columns: false,
            ..CleanOptions::default()
        };
        let outcome = clean_workbook(&wb, &MemoryStore::new(), &options).unwrap();
        assert_eq!(outcome.get("S").unwrap().columns, vec!["No", "Name", STATUS_COLUMN]);
    }

    #[test]
    fn test_empty_and_blank_sheets() {
        let wb = Workbook {
            sheets: vec![
                sheet("Empty", &["Name"], vec![]),
                sheet(
                    "Blank",
                    &["Name", "Email"],
                    vec![vec![t("nan"), t("  ")], vec![CellValue::Missing, t("None")]],
                ),
                sheet("Real", &["Name"], vec![vec![t("kim")]]),
            ],
        };
        let outcome = clean_workbook(&wb, &MemoryStore::new(), &CleanOptions::default()).unwrap();
        assert_eq!(outcome.sheet_names(), vec!["Real"]);
        assert_eq!(outcome.summary.skipped_sheets, vec!["Empty".to_string()]);
        assert_eq!(outcome.summary.dropped_sheets, vec!["Blank".to_string()]);
        assert!(outcome.trash.is_empty());
    }

    #[test]
    fn test_no_trash_entry_without_duplicates() {
        let wb = Workbook {
            sheets: vec![sheet(
                "S",
                &["Email"],
                vec![vec![t("a@x.com")], vec![t("b@x.com")]],
            )],
        };
        let outcome = clean_workbook(&wb, &MemoryStore::new(), &CleanOptions::default()).unwrap();
        assert!(outcome.trash.is_empty());
        assert_eq!(outcome.summary.clean_rows(), 2);
    }

    #[test]
    fn test_mapping_applies_to_company() {
        let mapping: Mapping = [("samsungelec", "Samsung")].into_iter().collect();
        let store = MemoryStore::with_mapping(mapping);
        let wb = Workbook {
            sheets: vec![sheet("S", &["회사"], vec![vec![t("Samsung Elec.")]])],
        };
        let outcome = clean_workbook(&wb, &store, &CleanOptions::default()).unwrap();
        assert_eq!(outcome.get("S").unwrap().rows[0][0], t("Samsung"));
    }

    #[test]
    fn test_invalid_options_rejected_before_loading() {
        let options = CleanOptions {
            min_key_length: 0,
            ..CleanOptions::default()
        };
        let err = clean_workbook(&Workbook::default(), &MemoryStore::new(), &options).unwrap_err();
        assert!(matches!(err, RollcallError::ConfigInvalid(_)));
    }
}
