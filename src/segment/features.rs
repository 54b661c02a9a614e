//! Boundary signals.
//!
//! Each candidate sentence is scored on five boolean signals; the decision
//! function is `((finite-verb ∨ evaluative-closure) ∧ no-trailing-connective ∧
//! min-length) ∧ ¬blocked`.

use bitflags::bitflags;

use crate::capabilities::{MorphAnalyzer, MorphToken, Pos, VerbForm};

bitflags! {
    /// Signals computed at one boundary marker.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct BoundarySignals: u8 {
        /// The candidate contains a finite (or mood/tense-marked) verb.
        const FINITE_VERB = 1 << 0;
        /// The candidate does not end in a discourse connective.
        const NO_TRAILING_CONNECTIVE = 1 << 1;
        /// The candidate reaches the minimum token count.
        const MIN_LENGTH = 1 << 2;
        /// The candidate matches an evaluative-closure pattern.
        const EVALUATIVE_CLOSURE = 1 << 3;
        /// Structural lookahead says the marker splits a constituent.
        const BLOCKED = 1 << 4;
    }
}

/// Connectives a sentence must not end on.
const CONNECTIVES: &[&str] = &[
    "y", "pero", "porque", "entonces", "por", "por ejemplo", "ya sea", "así", "aunque", "sino",
    "que",
];

const RELATIVE_LEMMAS: &[&str] = &["que", "quien", "cual", "cuyo", "donde"];
const COPULAR_LEMMAS: &[&str] = &["ser", "estar", "parecer"];

const LOOKAHEAD_TOKENS: usize = 6;

pub(crate) fn should_emit(signals: BoundarySignals) -> bool {
    (signals.contains(BoundarySignals::FINITE_VERB)
        || signals.contains(BoundarySignals::EVALUATIVE_CLOSURE))
        && signals.contains(BoundarySignals::NO_TRAILING_CONNECTIVE)
        && signals.contains(BoundarySignals::MIN_LENGTH)
        && !signals.contains(BoundarySignals::BLOCKED)
}

pub(crate) fn score(
    analyzer: &dyn MorphAnalyzer,
    candidate: &str,
    tokens: &[&str],
    next_index: usize,
    min_tokens: usize,
) -> BoundarySignals {
    let mut signals = BoundarySignals::empty();
    if has_finite_verb(analyzer, candidate) {
        signals |= BoundarySignals::FINITE_VERB;
    }
    if !ends_in_connective(candidate) {
        signals |= BoundarySignals::NO_TRAILING_CONNECTIVE;
    }
    if candidate.split_whitespace().count() >= min_tokens {
        signals |= BoundarySignals::MIN_LENGTH;
    }
    if is_evaluative_closure(candidate) {
        signals |= BoundarySignals::EVALUATIVE_CLOSURE;
    }
    if is_blocked(analyzer, candidate, tokens, next_index) {
        signals |= BoundarySignals::BLOCKED;
    }
    signals
}

/// Strip embedded speaker tags, marker remnants and the colon/hyphen noise
/// the analyzer would otherwise trip over.
fn analysis_view(text: &str) -> String {
    let cleaned = regex!(r"\b[A-Z]+\d*:\s*").replace_all(text, " ");
    let cleaned = regex!(r"<~[^>]*>").replace_all(&cleaned, " ");
    let cleaned = regex!(r"^[.\s]+").replace_all(&cleaned, "");
    let cleaned = regex!(r"^[A-Z]{1,3}\s+").replace_all(&cleaned, "");
    let cleaned = regex!(r"[:\-]").replace_all(&cleaned, "");
    regex!(r"\s+").replace_all(&cleaned, " ").trim().to_string()
}

fn has_finite_verb(analyzer: &dyn MorphAnalyzer, text: &str) -> bool {
    analyzer.analyze(&analysis_view(text)).iter().any(|token| {
        token.is_verbal()
            && (token.verb_form == Some(VerbForm::Finite) || token.has_mood || token.has_tense)
    })
}

fn ends_in_connective(text: &str) -> bool {
    let lowered = text.to_lowercase();
    let trimmed = regex!(r"[.,;:¡!¿?\)\]\}]+$").replace(lowered.trim(), "");
    CONNECTIVES.iter().any(|connective| trimmed.ends_with(connective))
}

fn is_evaluative_closure(text: &str) -> bool {
    regex!(r"(?i)\beso fue\b|\beso sería\b|\bme di cuenta\b|\bme sorprendió\b|\bpor eso\b|\bno sé\b")
        .is_match(text)
}

/// Structural blocking over the lookahead window after the marker.
fn is_blocked(
    analyzer: &dyn MorphAnalyzer,
    left_context: &str,
    tokens: &[&str],
    next_index: usize,
) -> bool {
    let mut j = next_index;
    while j < tokens.len() && tokens[j] == "/" {
        j += 1;
    }
    if j >= tokens.len() {
        return false;
    }

    let window = tokens[j..tokens.len().min(j + LOOKAHEAD_TOKENS)].join(" ").to_lowercase();
    let right = analyzer.analyze(&analysis_view(&window));
    let Some(first) = right.first() else {
        return false;
    };

    // a/de/para introducing an infinitive
    if matches!(first.surface.to_lowercase().as_str(), "a" | "de" | "para")
        && right
            .iter()
            .any(|t| t.is_verbal() && t.verb_form == Some(VerbForm::Infinitive))
    {
        return true;
    }

    // relative or completive opener
    if RELATIVE_LEMMAS.contains(&first.lemma.as_str())
        && matches!(first.pos, Pos::Pronoun | Pos::SubConj | Pos::Adverb)
    {
        return true;
    }
    if let Some(second) = right.get(1) {
        if matches!(first.pos, Pos::Determiner | Pos::Pronoun) && second.lemma == "que" {
            return true;
        }
        if first.pos == Pos::Adposition
            && RELATIVE_LEMMAS.contains(&second.lemma.as_str())
            && matches!(second.pos, Pos::Pronoun | Pos::SubConj | Pos::Adverb)
        {
            return true;
        }
    }

    // copular left context followed by a predicate continuation
    let left = analyzer.analyze(&analysis_view(left_context));
    let last_verb = left.iter().rev().filter(|t| !t.is_punct()).find(|t| t.is_verbal());
    if let Some(verb) = last_verb {
        if COPULAR_LEMMAS.contains(&verb.lemma.as_str()) {
            let first_right: Option<&MorphToken> = right.iter().find(|t| !t.is_punct());
            if let Some(token) = first_right {
                if matches!(token.pos, Pos::Adjective | Pos::Noun | Pos::ProperNoun) {
                    return true;
                }
            }
        }
    }

    false
}
