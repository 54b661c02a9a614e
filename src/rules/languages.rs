//! Contact-language detection.
//!
//! Transcribers mark code-switched spans with the language name inside the
//! delimiters. Those spans carry information the corpus must keep, so instead
//! of deleting the delimited content (rules 6 and 7) the name becomes a
//! canonical placeholder tag. Matching is accent- and case-insensitive and
//! prefers longer names (`andino colombiano` before `andino`-anything).

use once_cell::sync::Lazy;

use crate::rules::fold_diacritics;

static LANGUAGES: &[(&str, &str)] = &[
    ("kichwa", "KICHWA"),
    ("quichua", "QUICHUA"),
    ("quechua", "QUECHUA"),
    ("quechhua", "QUECHHUA"),
    ("otomi", "OTOMÍ"),
    ("otomí", "OTOMÍ"),
    ("tsotsil", "TSOTSIL"),
    ("euskera", "EUSKERA"),
    ("tepehuano", "TEPEHUANO"),
    ("guarani", "GUARANÍ"),
    ("guaraní", "GUARANÍ"),
    ("tzutujil", "TZUTUJIL"),
    ("portugues", "PORTUGUÉS"),
    ("portugués", "PORTUGUÉS"),
    ("andino colombiano", "ANDINO_COLOMBIANO"),
    ("asturiano", "ASTURIANO"),
];

static KEYS: Lazy<Vec<(String, &'static str)>> = Lazy::new(|| {
    let mut keys: Vec<(String, &'static str)> = Vec::new();
    for (name, tag) in LANGUAGES {
        let key = normalize_key(name);
        if !keys.iter().any(|(k, _)| *k == key) {
            keys.push((key, tag));
        }
    }
    keys.sort_by_key(|(k, _)| std::cmp::Reverse(k.len()));
    keys
});

fn normalize_key(name: &str) -> String {
    fold_diacritics(&name.to_lowercase())
}

/// Detect a contact-language name anywhere inside `content`.
pub(crate) fn detect(content: &str) -> Option<&'static str> {
    let normalized = normalize_key(content.trim());
    KEYS.iter().find(|(key, _)| normalized.contains(key.as_str())).map(|(_, tag)| *tag)
}

/// Render the canonical placeholder for a detected language tag.
pub(crate) fn placeholder(tag: &str) -> String {
    format!("⟦L2_{tag}⟧")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accent_and_case_insensitive() {
        assert_eq!(detect("Guaraní"), Some("GUARANÍ"));
        assert_eq!(detect("guarani"), Some("GUARANÍ"));
        assert_eq!(detect("habla en KICHWA"), Some("KICHWA"));
    }

    #[test]
    fn longer_names_win() {
        assert_eq!(detect("andino colombiano"), Some("ANDINO_COLOMBIANO"));
    }

    #[test]
    fn unknown_content_is_none() {
        assert_eq!(detect("risas"), None);
        assert_eq!(detect(""), None);
    }
}
