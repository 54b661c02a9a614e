//! Discourse segmentation.
//!
//! A turn arrives as one long stretch of speech with explicit boundary
//! markers (`/`) sprinkled in by the transcribers. Not every marker is a real
//! utterance boundary: the engine accumulates tokens and, at each marker,
//! scores the buffered candidate on five boolean signals, emitting a sentence
//! only when the decision function fires. The remaining buffer is flushed as
//! the final utterance.
//!
//! ```text
//! tokens ──▶ ACCUMULATE ──"/"──▶ score signals ──▶ EMIT │ ABSORB
//!                ▲                                       │
//!                └───────────────────────────────────────┘
//! ```
//!
//! Output is deterministic for a fixed analyzer: no randomness, no hidden
//! state across turns.

mod features;

pub use features::BoundarySignals;

use crate::capabilities::MorphAnalyzer;
use crate::rules::squash_spaces;

pub struct Segmenter<'a> {
    analyzer: &'a dyn MorphAnalyzer,
    min_boundary_tokens: usize,
}

impl<'a> Segmenter<'a> {
    pub fn new(analyzer: &'a dyn MorphAnalyzer, min_boundary_tokens: usize) -> Self {
        Segmenter { analyzer, min_boundary_tokens }
    }

    /// Split one turn's normalized content into ordered utterances.
    pub fn split_turn(&self, content: &str) -> Vec<String> {
        let normalized = normalize_markers(content);
        if normalized.is_empty() {
            return Vec::new();
        }

        let tokens: Vec<&str> = normalized.split_whitespace().collect();
        let mut sentences: Vec<String> = Vec::new();
        let mut current: Vec<&str> = Vec::new();

        for (i, token) in tokens.iter().enumerate() {
            if *token != "/" {
                current.push(token);
                continue;
            }
            let candidate = current.join(" ");
            let candidate = candidate.trim();
            if candidate.is_empty() {
                continue;
            }
            let signals =
                features::score(self.analyzer, candidate, &tokens, i + 1, self.min_boundary_tokens);
            if features::should_emit(signals) {
                sentences.push(candidate.to_string());
                current.clear();
            }
            // otherwise the marker is absorbed and accumulation continues
        }

        let tail = current.join(" ");
        let tail = tail.trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }

        sentences.into_iter().map(|s| cleanup(&s)).filter(|s| !s.is_empty()).collect()
    }
}

/// Collapse marker runs to a single spaced `/` token.
fn normalize_markers(content: &str) -> String {
    let spaced = regex!(r"\s*/{1,3}\s*").replace_all(content, " / ");
    squash_spaces(&spaced).trim().to_string()
}

/// Light cosmetic cleanup applied to each emitted sentence.
fn cleanup(sentence: &str) -> String {
    let merged = regex!(r"\s*,\s*,\s*").replace_all(sentence, ", ");
    squash_spaces(&merged).trim().to_string()
}
