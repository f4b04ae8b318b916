pub mod company;
pub mod country;
pub mod text;

use crate::mapping::MappingIndex;
use crate::model::{CellValue, Table};
use crate::roles::{ColumnRoles, Role};
use company::normalize_company;
use country::normalize_country;
use text::{phone_digits, title_case};

/// Rewrite every cell of `table` according to its column's role.
///
/// Text is trimmed everywhere; columns with a role get exactly one rewrite,
/// chosen by [`Role::NORMALIZATION_PRIORITY`]. Blank literals become Missing
/// (checked both before and after the rewrite) and rows that are Missing in
/// every column are dropped. Cells that don't fit their role pass through
/// unchanged.
pub fn normalize_table(table: &Table, roles: &ColumnRoles, mapping: &MappingIndex) -> Table {
    let column_rules: Vec<Option<Role>> = (0..table.width())
        .map(|i| roles.get(i).normalization_role())
        .collect();

    let mut out = Table::new(table.columns.clone());
    let mut dropped = 0usize;

    for row in &table.rows {
        let cells: Vec<CellValue> = row
            .iter()
            .zip(&column_rules)
            .map(|(cell, rule)| normalize_cell(cell, *rule, mapping))
            .collect();

        if cells.iter().all(CellValue::is_missing) {
            dropped += 1;
            continue;
        }
        out.rows.push(cells);
    }

    tracing::debug!(
        rows_in = table.len(),
        rows_out = out.len(),
        dropped,
        "normalized table"
    );
    out
}

/// Normalize one cell under an optional role rule.
pub fn normalize_cell(cell: &CellValue, rule: Option<Role>, mapping: &MappingIndex) -> CellValue {
    let trimmed = match cell {
        CellValue::Text(s) => CellValue::Text(s.trim().to_string()),
        other => other.clone(),
    };
    // A literal "nan" must not be title-cased into "Nan" before it is recognized.
    if trimmed.is_blank_literal() {
        return CellValue::Missing;
    }

    let rewritten = match rule {
        Some(role) => apply_role(trimmed, role, mapping),
        None => trimmed,
    };

    if rewritten.is_blank_literal() {
        CellValue::Missing
    } else {
        rewritten
    }
}

fn apply_role(cell: CellValue, role: Role, mapping: &MappingIndex) -> CellValue {
    match (role, cell) {
        (_, CellValue::Missing) => CellValue::Missing,
        (Role::Company, CellValue::Text(s)) => CellValue::Text(normalize_company(&s, mapping)),
        (Role::Country, CellValue::Text(s)) => CellValue::Text(normalize_country(&s)),
        (Role::Name, CellValue::Text(s)) => CellValue::Text(title_case(&s)),
        (Role::Email, CellValue::Text(s)) => CellValue::Text(s.to_lowercase().trim().to_string()),
        // Phone numbers typed into a numeric cell still need to become digits.
        (Role::Phone, cell) => match cell.to_display_string().as_deref().and_then(phone_digits) {
            Some(digits) => CellValue::Text(digits),
            None => CellValue::Missing,
        },
        (_, other) => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::Mapping;

    fn t(s: &str) -> CellValue {
        CellValue::text(s)
    }

    fn table(columns: &[&str], rows: Vec<Vec<CellValue>>) -> Table {
        Table::from_rows(columns.iter().map(|c| c.to_string()).collect(), rows)
    }

    fn run(table: &Table, mapping: &Mapping) -> Table {
        normalize_table(table, &ColumnRoles::classify(table), &mapping.index())
    }

    #[test]
    fn test_each_role_rewrite() {
        let input = table(
            &["Company", "Country", "Name", "Email", "Phone", "Memo"],
            vec![vec![
                t(" Samsung Elec. "),
                t("U.S.A"),
                t("kim min-su"),
                t("  Kim@Example.COM "),
                t("010-1234-5678"),
                t("  vip  "),
            ]],
        );
        let mapping: Mapping = [("samsungelec", "Samsung")].into_iter().collect();
        let out = run(&input, &mapping);
        assert_eq!(
            out.rows[0],
            vec![
                t("Samsung"),
                t("미국"),
                t("Kim Min-Su"),
                t("kim@example.com"),
                t("01012345678"),
                t("vip"),
            ]
        );
    }

    #[test]
    fn test_priority_applies_one_rewrite() {
        // "Company Name" is both Company and Name; only the company rule runs.
        let input = table(&["Company Name"], vec![vec![t("acme corp")]]);
        let out = run(&input, &Mapping::new());
        assert_eq!(out.rows[0][0], t("Acme"));
    }

    #[test]
    fn test_missing_stays_missing() {
        let input = table(
            &["Company", "Name", "Phone"],
            vec![vec![CellValue::Missing, CellValue::Missing, t("x")]],
        );
        let out = run(&input, &Mapping::new());
        assert!(out.is_empty(), "row became fully missing");
    }

    #[test]
    fn test_blank_literals_in_unclassified_columns() {
        let input = table(
            &["Memo", "Name"],
            vec![
                vec![t("nan"), t("Lee")],
                vec![t(" None "), t("NaN")],
                vec![t("Nat"), t("")],
            ],
        );
        let out = run(&input, &Mapping::new());
        assert_eq!(out.len(), 1);
        assert_eq!(out.rows[0], vec![CellValue::Missing, t("Lee")]);
    }

    #[test]
    fn test_numeric_phone_becomes_digits() {
        let input = table(&["Mobile"], vec![vec![CellValue::Number(1012345678.0)]]);
        let out = run(&input, &Mapping::new());
        assert_eq!(out.rows[0][0], t("1012345678"));
    }

    #[test]
    fn test_numbers_outside_phone_untouched() {
        let input = table(&["Name", "Age"], vec![vec![CellValue::Number(7.0), CellValue::Number(31.0)]]);
        let out = run(&input, &Mapping::new());
        assert_eq!(out.rows[0], vec![CellValue::Number(7.0), CellValue::Number(31.0)]);
    }

    #[test]
    fn test_phone_without_digits_is_missing() {
        let input = table(&["Phone", "Name"], vec![vec![t("ask later"), t("Park")]]);
        let out = run(&input, &Mapping::new());
        assert_eq!(out.rows[0][0], CellValue::Missing);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let input = table(
            &["No", "참가자 이름", "소속", "국가", "이메일", "연락처", "비고"],
            vec![
                vec![CellValue::Number(1.0), t("kim CHUL-soo"), t("(주)삼성전자"), t("Korea"), t("A@B.COM"), t("010 1111 2222"), t(" memo ")],
                vec![CellValue::Number(2.0), t("john o'neil"), t("Acme Widgets, Inc."), t("usa"), t(" x@y.org"), t("+82-10-3333-4444"), t("nan")],
                vec![CellValue::Number(3.0), t("이영희"), t("LG Korea"), t("Germany"), t("None"), t("n/a"), CellValue::Missing],
                vec![CellValue::Missing, t(""), t("nan"), t(""), t(""), t(""), t("")],
                vec![CellValue::Number(4.0), t("ßtraße"), t("k(주)r"), t("jp"), t("s@t.de"), t("010-5555-6666"), CellValue::Missing],
            ],
        );
        let mapping = crate::mapping::builtin::default_mapping();
        let once = run(&input, &mapping);
        let twice = run(&once, &mapping);
        assert_eq!(once.len(), 4);
        assert_eq!(once.rows[3][1], t("Sstraße"));
        assert_eq!(once.rows[3][2], CellValue::Missing);
        assert_eq!(once, twice);
        assert_eq!(
            serde_json::to_string(&once).unwrap(),
            serde_json::to_string(&twice).unwrap()
        );
    }
}
