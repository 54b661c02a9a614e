//! Corpus-wide observed vocabulary.
//!
//! The colon-join heuristic asks whether a candidate fusion was ever seen as a
//! plain word anywhere in the corpus. The set is built once, before any
//! rewriting, and never mutated afterwards, so concurrent readers are safe.

use std::collections::HashSet;

#[derive(Debug, Default, Clone)]
pub struct Vocabulary {
    words: HashSet<String>,
}

impl Vocabulary {
    pub fn new() -> Self {
        Vocabulary::default()
    }

    /// Add every word observed in `text`, lowercased.
    ///
    /// Colons from the transcription lengthening convention are neutralized
    /// first so that `si: n` contributes `si` and `n` rather than nothing:
    /// a colon between two word characters becomes a space, a colon adjacent
    /// to one word character is dropped.
    pub fn scan_text(&mut self, text: &str) {
        let chars: Vec<char> = text.chars().collect();
        let mut cleaned = String::with_capacity(text.len());
        for (i, &ch) in chars.iter().enumerate() {
            if ch != ':' {
                cleaned.push(ch);
                continue;
            }
            let before = i.checked_sub(1).map(|j| is_word_char(chars[j])).unwrap_or(false);
            let after = chars.get(i + 1).map(|&c| is_word_char(c)).unwrap_or(false);
            if before && after {
                cleaned.push(' ');
            } else if before || after {
                // dropped
            } else {
                cleaned.push(ch);
            }
        }
        for m in regex!(r"\w+").find_iter(&cleaned) {
            self.words.insert(m.as_str().to_lowercase());
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&word.to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collects_lowercased_words() {
        let mut vocab = Vocabulary::new();
        vocab.scan_text("Bueno pues Sí");
        assert!(vocab.contains("bueno"));
        assert!(vocab.contains("sí"));
        assert!(!vocab.contains("no"));
    }

    #[test]
    fn colon_between_words_splits() {
        let mut vocab = Vocabulary::new();
        vocab.scan_text("pesteni:che mese: s");
        assert!(vocab.contains("pesteni"));
        assert!(vocab.contains("che"));
        assert!(vocab.contains("mese"));
        assert!(vocab.contains("s"));
        assert!(!vocab.contains("pesteniche"));
    }

    #[test]
    fn trailing_colon_is_dropped() {
        let mut vocab = Vocabulary::new();
        vocab.scan_text("unos:");
        assert!(vocab.contains("unos"));
    }
}
