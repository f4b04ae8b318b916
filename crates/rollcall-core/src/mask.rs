use crate::model::{CellValue, Table};
use crate::roles::{ColumnRoles, Role};

const MASK_CHAR: char = '*';
const PHONE_MASK: &str = "****";
const EMAIL_MASK: &str = "**";

/// `"김민수"` -> `"김*수"`, `"Li"` -> `"L*"`.
pub fn mask_name(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    match chars.len() {
        0 | 1 => s.to_string(),
        2 => format!("{}{MASK_CHAR}", chars[0]),
        n => {
            let mut out = String::with_capacity(s.len());
            out.push(chars[0]);
            out.extend(std::iter::repeat(MASK_CHAR).take(n - 2));
            out.push(chars[n - 1]);
            out
        }
    }
}

/// `"01012345678"` -> `"010****5678"`, `"12345678"` -> `"****5678"`.
///
/// Values of four characters or fewer are returned unchanged. The output of
/// a long number is itself a fixed point: masking it again changes nothing.
pub fn mask_phone(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let n = chars.len();
    if n <= 4 {
        return s.to_string();
    }
    let last4: String = chars[n - 4..].iter().collect();
    if n > 8 {
        let head: String = chars[..n - 8].iter().collect();
        format!("{head}{PHONE_MASK}{last4}")
    } else {
        format!("{PHONE_MASK}{last4}")
    }
}

/// `"kim@example.com"` -> `"ki**@example.com"`, `"a@b.com"` -> `"a**@b.com"`.
///
/// Values without `@`, or with nothing before it, are returned unchanged.
pub fn mask_email(s: &str) -> String {
    let Some((local, domain)) = s.split_once('@') else {
        return s.to_string();
    };
    let local_chars: Vec<char> = local.chars().collect();
    let keep = match local_chars.len() {
        0 => return s.to_string(),
        1 | 2 => 1,
        _ => 2,
    };
    let kept: String = local_chars[..keep].iter().collect();
    format!("{kept}{EMAIL_MASK}@{domain}")
}

fn mask_cell(cell: &CellValue, role: Role) -> CellValue {
    let Some(s) = cell.to_display_string() else {
        return CellValue::Missing;
    };
    let masked = match role {
        Role::Name => mask_name(&s),
        Role::Phone => mask_phone(&s),
        Role::Email => mask_email(&s),
        _ => return cell.clone(),
    };
    CellValue::Text(masked)
}

/// A copy of `table` with Name, Phone and Email columns masked.
///
/// A column with several of these roles is masked by the first of
/// [`Role::MASKING_PRIORITY`]. Other columns are copied as-is.
pub fn mask_table(table: &Table, roles: &ColumnRoles) -> Table {
    let rules: Vec<Option<Role>> = (0..table.width())
        .map(|i| roles.get(i).masking_role())
        .collect();

    let rows = table
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&rules)
                .map(|(cell, rule)| match rule {
                    Some(role) => mask_cell(cell, *role),
                    None => cell.clone(),
                })
                .collect()
        })
        .collect();

    Table {
        columns: table.columns.clone(),
        rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mask_name() {
        assert_eq!(mask_name(""), "");
        assert_eq!(mask_name("K"), "K");
        assert_eq!(mask_name("Li"), "L*");
        assert_eq!(mask_name("김민수"), "김*수");
        assert_eq!(mask_name("Kim Min-su"), "K********u");
    }

    #[test]
    fn test_mask_phone_long_number() {
        // "010-1234-5678" after normalization.
        let masked = mask_phone("01012345678");
        assert_eq!(masked, "010****5678");
        assert!(masked.ends_with("5678"));
        assert_eq!(masked.chars().count(), 11);
    }

    #[test]
    fn test_mask_phone_remask_boundary() {
        // A masked long number still ends in four digits behind the
        // four-character mask, so it is a fixed point.
        let once = mask_phone("01012345678");
        assert_eq!(mask_phone(&once), once);

        // Medium numbers collapse to mask + last four, also a fixed point.
        let once = mask_phone("12345");
        assert_eq!(once, "****2345");
        assert_eq!(mask_phone(&once), once);

        // Four characters or fewer are never masked at all.
        assert_eq!(mask_phone("1234"), "1234");
        assert_eq!(mask_phone("+82"), "+82");
    }

    #[test]
    fn test_mask_phone_medium() {
        assert_eq!(mask_phone("12345678"), "****5678");
        assert_eq!(mask_phone("123456789"), "1****6789");
    }

    #[test]
    fn test_mask_email() {
        assert_eq!(mask_email("kim@example.com"), "ki**@example.com");
        assert_eq!(mask_email("ab@example.com"), "a**@example.com");
        assert_eq!(mask_email("a@b.com"), "a**@b.com");
        assert_eq!(mask_email("not-an-email"), "not-an-email");
        assert_eq!(mask_email("@example.com"), "@example.com");
    }

    #[test]
    fn test_mask_table() {
        let table = Table::from_rows(
            vec![
                "Name".into(),
                "Email".into(),
                "Phone".into(),
                "Company".into(),
            ],
            vec![
                vec![
                    CellValue::text("김민수"),
                    CellValue::text("kim@example.com"),
                    CellValue::text("01012345678"),
                    CellValue::text("Acme"),
                ],
                vec![
                    CellValue::Missing,
                    CellValue::Missing,
                    CellValue::Number(12345678.0),
                    CellValue::Missing,
                ],
            ],
        );
        let roles = ColumnRoles::classify(&table);
        let masked = mask_table(&table, &roles);

        assert_eq!(masked.columns, table.columns);
        assert_eq!(
            masked.rows[0],
            vec![
                CellValue::text("김*수"),
                CellValue::text("ki**@example.com"),
                CellValue::text("010****5678"),
                CellValue::text("Acme"),
            ]
        );
        assert_eq!(masked.rows[1][0], CellValue::Missing);
        assert_eq!(masked.rows[1][2], CellValue::text("****5678"));
    }
}
