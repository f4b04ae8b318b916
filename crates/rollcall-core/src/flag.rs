use crate::model::{CellValue, Table};
use crate::roles::{ColumnRoles, Role};

/// Header of the column the flagger appends.
pub const STATUS_COLUMN: &str = "status";

pub const BOTH_CONTACTS_MISSING: &str = "⚠️ Email & phone missing";
pub const EMAIL_MISSING: &str = "Email missing";
pub const PHONE_MISSING: &str = "Phone missing";
pub const COMPANY_MISSING: &str = "Company missing";

/// Build the status message for one row.
///
/// An empty string means nothing is missing.
pub fn status_message(has_email: bool, has_phone: bool, has_company: bool) -> String {
    let contact = match (has_email, has_phone) {
        (false, false) => BOTH_CONTACTS_MISSING,
        (false, true) => EMAIL_MISSING,
        (true, false) => PHONE_MISSING,
        (true, true) => "",
    };
    match (contact.is_empty(), has_company) {
        (_, true) => contact.to_string(),
        (true, false) => COMPANY_MISSING.to_string(),
        (false, false) => format!("{contact} / {COMPANY_MISSING}"),
    }
}

/// True when any of `columns` holds a value in `row`. No columns means false.
fn has_any(row: &[CellValue], columns: &[usize]) -> bool {
    columns.iter().any(|&c| !row[c].is_missing())
}

/// Write the [`STATUS_COLUMN`] of a clean table, replacing a column of that
/// name if the sheet already has one. Never removes rows.
///
/// Returns how many rows got a non-empty status.
pub fn flag_missing_info(table: &mut Table, roles: &ColumnRoles) -> usize {
    let email = roles.columns_with(Role::Email);
    let phone = roles.columns_with(Role::Phone);
    let company = roles.columns_with(Role::Company);

    let statuses: Vec<CellValue> = table
        .rows
        .iter()
        .map(|row| {
            CellValue::Text(status_message(
                has_any(row, &email),
                has_any(row, &phone),
                has_any(row, &company),
            ))
        })
        .collect();

    let flagged = statuses
        .iter()
        .filter(|s| s.as_text().is_some_and(|t| !t.is_empty()))
        .count();

    table.set_column(STATUS_COLUMN, statuses);
    flagged
}
