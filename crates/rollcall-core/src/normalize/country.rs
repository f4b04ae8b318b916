use std::collections::HashMap;
use std::sync::LazyLock;

/// Key a country value is matched by: lowercased, spaces and periods removed.
fn country_key(raw: &str) -> String {
    raw.to_lowercase().replace([' ', '.'], "")
}

/// Normalize a country to its canonical name, or return the trimmed input.
pub fn normalize_country(raw: &str) -> String {
    match COUNTRY_ALIASES.get(country_key(raw).as_str()) {
        Some(canonical) => canonical.to_string(),
        None => raw.trim().to_string(),
    }
}

static COUNTRY_ALIASES: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut m = HashMap::new();

    m.insert("korea", "대한민국");
    m.insert("southkorea", "대한민국");
    m.insert("rok", "대한민국");
    m.insert("kr", "대한민국");

    m.insert("usa", "미국");
    m.insert("us", "미국");
    m.insert("america", "미국");

    m.insert("japan", "일본");
    m.insert("jp", "일본");

    m.insert("china", "중국");
    m.insert("cn", "중국");

    m
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases() {
        assert_eq!(normalize_country("U.S.A."), "미국");
        assert_eq!(normalize_country("South Korea"), "대한민국");
        assert_eq!(normalize_country("JP"), "일본");
    }

    #[test]
    fn test_unknown_passthrough() {
        assert_eq!(normalize_country("  Germany "), "Germany");
        assert_eq!(normalize_country("대한민국"), "대한민국");
    }
}
