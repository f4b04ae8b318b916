use rollcall_core::mapping::Mapping;
use rollcall_core::outcome::CleaningOutcome;

use crate::commands::fuzzy::SheetCandidates;
use crate::commands::roles::SheetRoles;

pub fn print_summary(outcome: &CleaningOutcome) {
    let summary = &outcome.summary;

    if summary.sheets.is_empty() {
        println!("No sheet contained any data.");
    } else {
        let width = summary
            .sheets
            .iter()
            .map(|s| s.name.chars().count())
            .max()
            .unwrap_or(5)
            .max(5);

        println!(
            "  {:<width$}  {:>6}  {:>6}  {:>10}  {:>7}",
            "Sheet", "Read", "Clean", "Duplicates", "Flagged"
        );
        for s in &summary.sheets {
            println!(
                "  {:<width$}  {:>6}  {:>6}  {:>10}  {:>7}",
                s.name, s.rows_read, s.clean_rows, s.duplicates_removed, s.rows_flagged
            );
        }
        if summary.sheets.len() > 1 {
            println!(
                "  {:<width$}  {:>6}  {:>6}  {:>10}  {:>7}",
                "Total",
                summary.rows_read(),
                summary.clean_rows(),
                summary.duplicates_removed(),
                summary.rows_flagged()
            );
        }
        println!();
    }

    if summary.empty_rows_dropped() > 0 {
        println!("  {} empty row(s) dropped", summary.empty_rows_dropped());
    }
    for s in &summary.sheets {
        if !s.sequence_columns_dropped.is_empty() {
            println!(
                "  {}: removed sequence column(s) {}",
                s.name,
                s.sequence_columns_dropped.join(", ")
            );
        }
    }
    if !summary.skipped_sheets.is_empty() {
        println!("  Skipped empty sheet(s): {}", summary.skipped_sheets.join(", "));
    }
    if !summary.dropped_sheets.is_empty() {
        println!(
            "  Dropped sheet(s) with no usable rows: {}",
            summary.dropped_sheets.join(", ")
        );
    }
}

pub fn print_roles(sheets: &[SheetRoles]) {
    for (i, sheet) in sheets.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("=== {} ===\n", sheet.sheet);

        let width = sheet
            .columns
            .iter()
            .map(|c| c.header.chars().count())
            .max()
            .unwrap_or(10);

        for col in &sheet.columns {
            let roles: Vec<String> = col.roles.iter().map(|r| r.to_string()).collect();
            let roles = if roles.is_empty() {
                "-".to_string()
            } else {
                roles.join(", ")
            };
            match col.normalized_as {
                Some(role) if col.roles.iter().count() > 1 => println!(
                    "  {:<width$}  {roles} (normalized as {role})",
                    col.header
                ),
                _ => println!("  {:<width$}  {roles}", col.header),
            }
        }
    }
}

pub fn print_fuzzy(results: &[SheetCandidates]) {
    let total: usize = results.iter().map(|r| r.candidates.len()).sum();
    if total == 0 {
        println!("No similar values found.");
        return;
    }

    for result in results.iter().filter(|r| !r.candidates.is_empty()) {
        println!("=== {} ===\n", result.sheet);
        for c in &result.candidates {
            println!(
                "  [{}] {:?} ~ {:?}  ({:.0}%)",
                c.column,
                c.value1,
                c.value2,
                c.similarity * 100.0
            );
        }
        println!();
    }
    println!("{total} candidate pair(s). Review manually; nothing was merged.");
}

pub fn print_mapping(mapping: &Mapping) {
    if mapping.is_empty() {
        println!("Mapping is empty.");
        return;
    }
    let width = mapping
        .iter()
        .map(|(alias, _)| alias.chars().count())
        .max()
        .unwrap_or(10);
    for (alias, canonical) in mapping.iter() {
        println!("  {alias:<width$}  -> {canonical}");
    }
}
