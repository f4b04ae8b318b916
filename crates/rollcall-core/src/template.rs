use crate::model::{CellValue, Table};
use crate::roles::{ColumnRoles, Role};

/// Header of the column holding rendered messages.
pub const MESSAGE_COLUMN: &str = "message";

/// Shorthand placeholders and the role whose first column they resolve to.
/// The Korean forms are aliases kept for templates written by organizers.
const SHORTHANDS: &[(&str, Role)] = &[
    ("{name}", Role::Name),
    ("{company}", Role::Company),
    ("{phone}", Role::Phone),
    ("{email}", Role::Email),
    ("{이름}", Role::Name),
    ("{소속}", Role::Company),
    ("{전화번호}", Role::Phone),
    ("{이메일}", Role::Email),
];

/// A template with its placeholders resolved against one table's columns.
#[derive(Debug, Clone)]
pub struct MessageTemplate {
    text: String,
    /// (placeholder, column index), shorthands first, then exact headers.
    bindings: Vec<(String, usize)>,
}

impl MessageTemplate {
    pub fn compile(text: &str, table: &Table, roles: &ColumnRoles) -> Self {
        let mut bindings = Vec::new();

        for (placeholder, role) in SHORTHANDS {
            if let Some(col) = roles.first_with(*role) {
                if text.contains(placeholder) {
                    bindings.push((placeholder.to_string(), col));
                }
            }
        }

        for (col, header) in table.columns.iter().enumerate() {
            let placeholder = format!("{{{header}}}");
            if text.contains(&placeholder) {
                bindings.push((placeholder, col));
            }
        }

        MessageTemplate {
            text: text.to_string(),
            bindings,
        }
    }

    /// Substitute one row. Missing values render as empty strings;
    /// unresolved placeholders are left as written.
    pub fn render(&self, row: &[CellValue]) -> String {
        let mut msg = self.text.clone();
        for (placeholder, col) in &self.bindings {
            if msg.contains(placeholder.as_str()) {
                msg = msg.replace(placeholder.as_str(), &row[*col].to_string());
            }
        }
        msg
    }
}

/// A copy of `table` with a [`MESSAGE_COLUMN`] rendered from `template`.
/// An existing column of that name is overwritten.
pub fn generate_messages(table: &Table, roles: &ColumnRoles, template: &str) -> Table {
    let compiled = MessageTemplate::compile(template, table, roles);
    let messages = table
        .rows
        .iter()
        .map(|row| CellValue::Text(compiled.render(row)))
        .collect();

    let mut out = table.clone();
    out.set_column(MESSAGE_COLUMN, messages);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::from_rows(
            vec![
                "참가자 이름".into(),
                "소속".into(),
                "Email".into(),
                "status".into(),
            ],
            vec![
                vec![
                    CellValue::text("Kim"),
                    CellValue::text("Acme"),
                    CellValue::text("kim@acme.com"),
                    CellValue::text(""),
                ],
                vec![
                    CellValue::text("Lee"),
                    CellValue::Missing,
                    CellValue::Missing,
                    CellValue::text("Email missing"),
                ],
            ],
        )
    }

    fn render(template: &str) -> Vec<CellValue> {
        let t = sample();
        let out = generate_messages(&t, &ColumnRoles::classify(&t), template);
        assert_eq!(out.columns.last().map(String::as_str), Some(MESSAGE_COLUMN));
        out.rows.iter().map(|r| r[4].clone()).collect()
    }

    #[test]
    fn test_shorthand_placeholders() {
        let msgs = render("Hi {name} ({company})");
        assert_eq!(msgs[0], CellValue::text("Hi Kim (Acme)"));
        assert_eq!(msgs[1], CellValue::text("Hi Lee ()"));
    }

    #[test]
    fn test_korean_shorthand() {
        let msgs = render("{이름}님, {소속}");
        assert_eq!(msgs[0], CellValue::text("Kim님, Acme"));
    }

    #[test]
    fn test_exact_header_placeholder() {
        let msgs = render("{참가자 이름}: {status}");
        assert_eq!(msgs[1], CellValue::text("Lee: Email missing"));
    }

    #[test]
    fn test_existing_message_column_is_replaced() {
        let t = Table::from_rows(
            vec!["Name".into(), "message".into()],
            vec![vec![CellValue::text("Kim"), CellValue::text("old")]],
        );
        let out = generate_messages(&t, &ColumnRoles::classify(&t), "Hi {name}");
        assert_eq!(out.columns, vec!["Name", MESSAGE_COLUMN]);
        assert_eq!(out.rows[0][1], CellValue::text("Hi Kim"));
    }

    #[test]
    fn test_unmatched_placeholders_stay() {
        let msgs = render("{name} {phone} {unknown}");
        assert_eq!(msgs[0], CellValue::text("Kim {phone} {unknown}"));
    }
}
