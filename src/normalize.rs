use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

static PUNCTUATION: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^\w\s]").unwrap());

/// Canonical form of a title, the join key across all input tables:
/// NFC-folded, lowercased, punctuation stripped, whitespace collapsed.
pub fn normalize_title(title: &str) -> String {
    let folded = title.nfc().collect::<String>().to_lowercase();
    let stripped = PUNCTUATION.replace_all(&folded, "");
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Collection id from a collection path: every non-alphanumeric character
/// becomes `-`, the rest is lowercased. Deterministic by construction.
pub fn slugify(path: &str) -> String {
    path.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '-'
            }
        })
        .collect()
}
