use regex::Regex;
use std::sync::LazyLock;

use super::text::{squash_spaces, title_case};
use crate::mapping::{Mapping, MappingIndex};

/// Korean legal-entity markers and English/locale suffixes that carry no
/// identity: `(주)삼성전자`, `Acme Corp.`, `LG Korea`.
static SUFFIX_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(주\)|\(유\)|\(사\)|\(재\)|주식회사|\b(?:inc|corp|ltd|korea|kr)\b\.?")
        .expect("suffix pattern is valid")
});

static PUNCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[.,()\-]").expect("punctuation pattern is valid"));

/// Strip suffixes and punctuation from a company name, lowercased.
///
/// `"Samsung Elec."` -> `"samsung elec"`, `"(주)카카오"` -> `"카카오"`.
pub fn strip_company(raw: &str) -> String {
    let mut without_suffix = raw.to_lowercase();
    // Removing "(주)" from "k(주)r" leaves a new "kr" behind.
    loop {
        let next = SUFFIX_RE.replace_all(&without_suffix, "").into_owned();
        if next == without_suffix {
            break;
        }
        without_suffix = next;
    }
    let spaced = PUNCT_RE.replace_all(&without_suffix, " ");
    squash_spaces(&spaced)
}

/// Resolve a company name to its canonical form.
///
/// Uses the mapping when the stripped name's key is known, otherwise falls
/// back to title case.
pub fn normalize_company(raw: &str, mapping: &MappingIndex) -> String {
    let stripped = strip_company(raw);
    let key = Mapping::lookup_key(&stripped);
    match mapping.get(&key) {
        Some(canonical) => canonical.to_string(),
        None => title_case(&stripped),
    }
}
