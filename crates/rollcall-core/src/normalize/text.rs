/// Title-case a string: the first cased letter of every word is uppercased,
/// the rest lowercased.
///
/// A "word" starts after any character that has no case, so Hangul, digits
/// and punctuation all act as separators: `"o'neil"` becomes `"O'Neil"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for c in s.chars() {
        let cased = c.is_lowercase() || c.is_uppercase();
        if cased && !prev_cased {
            // "ß" uppercases to "SS"; only the first char stays upper.
            let mut upper = c.to_uppercase();
            out.extend(upper.next());
            out.extend(upper.flat_map(char::to_lowercase));
        } else if cased {
            out.extend(c.to_lowercase());
        } else {
            out.push(c);
        }
        prev_cased = cased;
    }
    out
}

/// Keep the digits of a phone number and a leading `+`.
///
/// Returns `None` when no digit remains.
pub fn phone_digits(s: &str) -> Option<String> {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if c.is_ascii_digit() {
            out.push(c);
        } else if c == '+' && out.is_empty() {
            out.push(c);
        }
    }
    if out.chars().any(|c| c.is_ascii_digit()) {
        Some(out)
    } else {
        None
    }
}

/// Collapse runs of whitespace to a single space and trim the ends.
pub fn squash_spaces(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("kim min-su"), "Kim Min-Su");
        assert_eq!(title_case("JOHN DOE"), "John Doe");
        assert_eq!(title_case("o'neil"), "O'Neil");
        assert_eq!(title_case("김민수"), "김민수");
        assert_eq!(title_case("2nd floor"), "2Nd Floor");
    }

    #[test]
    fn test_title_case_is_idempotent() {
        assert_eq!(title_case("ßtraße"), "Sstraße");
        for s in ["kim min-su", "McDONALD", "삼성 electronics", "ßtraße"] {
            let once = title_case(s);
            assert_eq!(title_case(&once), once);
        }
    }

    #[test]
    fn test_phone_digits() {
        assert_eq!(phone_digits("010-1234-5678").as_deref(), Some("01012345678"));
        assert_eq!(phone_digits("+82 (10) 1234 5678").as_deref(), Some("+821012345678"));
        assert_eq!(phone_digits("010+1234").as_deref(), Some("0101234"));
        assert_eq!(phone_digits("n/a"), None);
        assert_eq!(phone_digits("+"), None);
    }

    #[test]
    fn test_squash_spaces() {
        assert_eq!(squash_spaces("  samsung   elec  "), "samsung elec");
    }
}
