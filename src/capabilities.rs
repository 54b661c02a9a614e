//! External capability interfaces.
//!
//! The pipeline consumes two kinds of externally supplied judgment: spelling
//! validity and per-token morphology. Both are narrow traits so the core has
//! zero compile-time coupling to any particular backend and tests can supply
//! deterministic fakes.
//!
//! Shipped backends are file-based: [`WordListOracle`] over a word list (a
//! hunspell `.dic` works as-is) and [`LexiconAnalyzer`] over a TSV lexicon with
//! UD-style tags.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use unicode_normalization::UnicodeNormalization;

use crate::error::PipelineError;

/// Answers "is this token a valid dictionary word?".
pub trait SpellingOracle: Send + Sync {
    fn is_valid_word(&self, token: &str) -> bool;
}

/// Coarse part-of-speech tags, following the UD tag set the backing models use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pos {
    Verb,
    Aux,
    Noun,
    ProperNoun,
    Adjective,
    Adverb,
    Pronoun,
    Determiner,
    Adposition,
    SubConj,
    CoordConj,
    Interjection,
    Punct,
    Other,
}

impl Pos {
    fn parse(tag: &str) -> Pos {
        match tag {
            "VERB" => Pos::Verb,
            "AUX" => Pos::Aux,
            "NOUN" => Pos::Noun,
            "PROPN" => Pos::ProperNoun,
            "ADJ" => Pos::Adjective,
            "ADV" => Pos::Adverb,
            "PRON" => Pos::Pronoun,
            "DET" => Pos::Determiner,
            "ADP" => Pos::Adposition,
            "SCONJ" => Pos::SubConj,
            "CCONJ" => Pos::CoordConj,
            "INTJ" => Pos::Interjection,
            "PUNCT" => Pos::Punct,
            _ => Pos::Other,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerbForm {
    Finite,
    Infinitive,
    Gerund,
    Participle,
}

/// One analyzed token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphToken {
    pub surface: String,
    pub lemma: String,
    pub pos: Pos,
    pub verb_form: Option<VerbForm>,
    pub has_mood: bool,
    pub has_tense: bool,
}

impl MorphToken {
    pub fn is_punct(&self) -> bool {
        self.pos == Pos::Punct
    }

    pub fn is_verbal(&self) -> bool {
        matches!(self.pos, Pos::Verb | Pos::Aux)
    }
}

/// Returns tokens with part-of-speech, lemma and morphological features.
pub trait MorphAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Vec<MorphToken>;
}

// --- Word-list spelling backend ----------------------------------------------

/// Spelling oracle backed by a plain word list, one entry per line.
///
/// Hunspell `.dic` files load unchanged: a leading all-digit count line is
/// skipped and affix flags after `/` are stripped. Entries are NFC-normalized.
pub struct WordListOracle {
    words: HashSet<String>,
}

impl WordListOracle {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path).map_err(|source| {
            PipelineError::DictionaryUnavailable { path: path.to_path_buf(), source }
        })?;
        Ok(Self::from_word_list(&raw))
    }

    pub fn from_word_list(raw: &str) -> Self {
        let mut words = HashSet::new();
        for (idx, line) in raw.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if idx == 0 && line.chars().all(|c| c.is_ascii_digit()) {
                continue;
            }
            let entry = line.split('/').next().unwrap_or(line).trim();
            if entry.is_empty() {
                continue;
            }
            let entry: String = entry.nfc().collect();
            words.insert(entry.to_lowercase());
            words.insert(entry);
        }
        WordListOracle { words }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl SpellingOracle for WordListOracle {
    fn is_valid_word(&self, token: &str) -> bool {
        let token = token.trim();
        if token.is_empty() {
            return false;
        }
        let token: String = token.nfc().collect();
        self.words.contains(&token) || self.words.contains(&token.to_lowercase())
    }
}

// --- Lexicon morphology backend ----------------------------------------------

#[derive(Debug, Clone)]
struct LexEntry {
    lemma: String,
    pos: Pos,
    verb_form: Option<VerbForm>,
    has_mood: bool,
    has_tense: bool,
}

/// Morphological analyzer backed by a full-form TSV lexicon.
///
/// Line format: `surface<TAB>lemma<TAB>POS[<TAB>feats]`, where `feats` is a
/// `|`-separated `Key=Value` list (`VerbForm=Fin|Mood=Ind|Tense=Past`).
/// Lookup is lowercase-exact; unknown tokens come back as [`Pos::Other`] with
/// the surface as lemma, which keeps analysis total and deterministic.
pub struct LexiconAnalyzer {
    entries: HashMap<String, LexEntry>,
}

impl LexiconAnalyzer {
    pub fn load(path: &Path) -> Result<Self, PipelineError> {
        let raw = fs::read_to_string(path).map_err(|source| {
            PipelineError::LexiconUnavailable { path: path.to_path_buf(), source }
        })?;
        Ok(Self::from_tsv(&raw))
    }

    pub fn from_tsv(raw: &str) -> Self {
        let mut entries = HashMap::new();
        for (lineno, line) in raw.lines().enumerate() {
            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            let fields: Vec<&str> = line.split('\t').collect();
            if fields.len() < 3 {
                tracing::warn!(line = lineno + 1, "skipping malformed lexicon entry");
                continue;
            }
            let surface = fields[0].trim().to_lowercase();
            let lemma = fields[1].trim().to_lowercase();
            let pos = Pos::parse(fields[2].trim());
            let mut verb_form = None;
            let mut has_mood = false;
            let mut has_tense = false;
            if let Some(feats) = fields.get(3) {
                for feat in feats.split('|') {
                    match feat.trim().split_once('=') {
                        Some(("VerbForm", "Fin")) => verb_form = Some(VerbForm::Finite),
                        Some(("VerbForm", "Inf")) => verb_form = Some(VerbForm::Infinitive),
                        Some(("VerbForm", "Ger")) => verb_form = Some(VerbForm::Gerund),
                        Some(("VerbForm", "Part")) => verb_form = Some(VerbForm::Participle),
                        Some(("Mood", _)) => has_mood = true,
                        Some(("Tense", _)) => has_tense = true,
                        _ => {}
                    }
                }
            }
            entries.insert(surface, LexEntry { lemma, pos, verb_form, has_mood, has_tense });
        }
        LexiconAnalyzer { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn token_for(&self, surface: &str) -> MorphToken {
        let lower = surface.to_lowercase();
        match self.entries.get(&lower) {
            Some(entry) => MorphToken {
                surface: surface.to_string(),
                lemma: entry.lemma.clone(),
                pos: entry.pos,
                verb_form: entry.verb_form,
                has_mood: entry.has_mood,
                has_tense: entry.has_tense,
            },
            None => MorphToken {
                surface: surface.to_string(),
                lemma: lower,
                pos: Pos::Other,
                verb_form: None,
                has_mood: false,
                has_tense: false,
            },
        }
    }
}

impl MorphAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Vec<MorphToken> {
        let mut tokens = Vec::new();
        let mut word = String::new();
        for ch in text.chars() {
            if ch.is_alphanumeric() || ch == '_' {
                word.push(ch);
                continue;
            }
            if !word.is_empty() {
                tokens.push(self.token_for(&word));
                word.clear();
            }
            if !ch.is_whitespace() {
                tokens.push(MorphToken {
                    surface: ch.to_string(),
                    lemma: ch.to_string(),
                    pos: Pos::Punct,
                    verb_form: None,
                    has_mood: false,
                    has_tense: false,
                });
            }
        }
        if !word.is_empty() {
            tokens.push(self.token_for(&word));
        }
        tokens
    }
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_list_skips_count_line_and_flags() {
        let oracle = WordListOracle::from_word_list("3\ncasa/S\nperro\nBueno\n");
        assert!(oracle.is_valid_word("casa"));
        assert!(oracle.is_valid_word("perro"));
        assert!(oracle.is_valid_word("bueno"));
        assert!(!oracle.is_valid_word("casa/S"));
        assert!(!oracle.is_valid_word("gato"));
        assert!(!oracle.is_valid_word(""));
    }

    #[test]
    fn lexicon_parses_features() {
        let analyzer = LexiconAnalyzer::from_tsv(testing::SPANISH_SAMPLE);
        let tokens = analyzer.analyze("fue a comer");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].pos, Pos::Aux);
        assert_eq!(tokens[0].verb_form, Some(VerbForm::Finite));
        assert!(tokens[0].has_tense);
        assert_eq!(tokens[1].pos, Pos::Adposition);
        assert_eq!(tokens[2].verb_form, Some(VerbForm::Infinitive));
    }

    #[test]
    fn unknown_tokens_are_total() {
        let analyzer = LexiconAnalyzer::from_tsv("");
        let tokens = analyzer.analyze("zzz, otra");
        assert_eq!(tokens.len(), 3);
        assert_eq!(tokens[0].pos, Pos::Other);
        assert_eq!(tokens[1].pos, Pos::Punct);
        assert_eq!(tokens[2].lemma, "otra");
    }
}
