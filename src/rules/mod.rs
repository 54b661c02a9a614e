//! The normalization rules.
//!
//! Each submodule contributes one rule value; [`phase_one`] and [`phase_two`]
//! assemble them in the fixed, total application order. Phase II only ever
//! runs on Phase I output.

pub(crate) mod angled;
pub(crate) mod anonymize;
pub(crate) mod apostrophe;
pub(crate) mod colon;
pub mod dialect;
pub(crate) mod ellipsis;
pub(crate) mod emphatic_caps;
pub(crate) mod fusions;
pub(crate) mod languages;
pub(crate) mod lengthening;
pub(crate) mod lexical_variants;
pub(crate) mod nonlexical;
pub(crate) mod parenthetical;
pub(crate) mod truncation;

use unicode_normalization::UnicodeNormalization;

use crate::engine::pipeline::Rule;

/// Phase I, in application order.
pub(crate) fn phase_one() -> Vec<Rule> {
    vec![
        parenthetical::rule(),
        angled::rule(),
        truncation::rule(),
        lexical_variants::rule(),
        nonlexical::rule(),
        ellipsis::rule(),
        lengthening::rule(),
        emphatic_caps::rule(),
    ]
}

/// Phase II, in application order.
pub(crate) fn phase_two() -> Vec<Rule> {
    vec![
        colon::rule(),
        apostrophe::rule(),
        dialect::rule(),
        fusions::rule(),
        anonymize::rule(),
    ]
}

// --- Shared helpers ----------------------------------------------------------

/// Collapse runs of 2+ whitespace characters into a single space, leaving the
/// ends of the string alone. Deletion-heavy rules call this on exit; pure
/// whitespace collapsing is not a logged rewrite.
pub(crate) fn squash_spaces(text: &str) -> String {
    regex!(r"\s{2,}").replace_all(text, " ").into_owned()
}

pub(crate) fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Strip combining marks after NFD decomposition.
pub(crate) fn fold_diacritics(text: &str) -> String {
    text.nfd().filter(|c| !unicode_normalization::char::is_combining_mark(*c)).collect()
}

/// Byte position of the character immediately before `pos`, if any.
pub(crate) fn char_before(text: &str, pos: usize) -> Option<char> {
    text[..pos].chars().next_back()
}

pub(crate) fn char_at(text: &str, pos: usize) -> Option<char> {
    text[pos..].chars().next()
}

#[cfg(test)]
pub(crate) mod tests_support {
    use crate::capabilities::testing::SetOracle;
    use crate::engine::pipeline::RuleContext;
    use crate::rules::dialect::DialectProfile;
    use crate::vocab::Vocabulary;

    pub(crate) fn neutral_ctx() -> (SetOracle, Vocabulary) {
        (SetOracle::new(&[]), Vocabulary::new())
    }

    pub(crate) fn ctx<'a>(oracle: &'a SetOracle, vocabulary: &'a Vocabulary) -> RuleContext<'a> {
        RuleContext { oracle, vocabulary, dialect: DialectProfile::Neutral }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn squash_preserves_ends() {
        assert_eq!(squash_spaces(" a   b "), " a b ");
    }

    #[test]
    fn diacritic_folding() {
        assert_eq!(fold_diacritics("guaraní"), "guarani");
        assert_eq!(fold_diacritics("ñ"), "n");
    }

    #[test]
    fn phase_orders_are_fixed() {
        let ids: Vec<u8> = phase_one().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![7, 5, 1, 4, 6, 3, 8, 10]);
        let ids: Vec<u8> = phase_two().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 9, 11, 12, 13]);
    }
}
