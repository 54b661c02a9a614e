//! Public pipeline API.
//!
//! A [`Pipeline`] owns the two capability backends and the fixed rule
//! sequences; callers thread in the corpus-wide vocabulary and the per-document
//! dialect profile. One turn in, one (optional) normalized turn plus its
//! provenance events out.

use std::sync::Arc;

use crate::capabilities::{MorphAnalyzer, SpellingOracle};
use crate::engine::log::RuleEvent;
use crate::engine::pipeline::{self, Rule, RuleContext};
use crate::rules::{self, dialect::DialectProfile};
use crate::segment::Segmenter;
use crate::turn::Turn;
use crate::vocab::Vocabulary;

pub use crate::engine::pipeline::TurnMeta;

/// Tunables that affect pipeline behavior.
#[derive(Debug, Clone)]
pub struct Options {
    /// Minimum token count a candidate sentence needs before a boundary
    /// marker may close it.
    pub min_boundary_tokens: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options { min_boundary_tokens: 8 }
    }
}

/// Result of normalizing one turn. `content` is `None` when the turn emptied
/// out and was dropped (the drop itself is one of the events).
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub content: Option<String>,
    pub events: Vec<RuleEvent>,
}

pub struct Pipeline {
    oracle: Arc<dyn SpellingOracle>,
    analyzer: Arc<dyn MorphAnalyzer>,
    options: Options,
    phase_one: Vec<Rule>,
    phase_two: Vec<Rule>,
}

impl Pipeline {
    pub fn new(
        oracle: Arc<dyn SpellingOracle>,
        analyzer: Arc<dyn MorphAnalyzer>,
        options: Options,
    ) -> Self {
        Pipeline {
            oracle,
            analyzer,
            options,
            phase_one: rules::phase_one(),
            phase_two: rules::phase_two(),
        }
    }

    /// Run both normalization phases over one turn.
    ///
    /// The speaker label is untouched by construction: rules only ever see the
    /// turn content.
    pub fn normalize_turn(
        &self,
        turn: &Turn,
        meta: &TurnMeta,
        vocabulary: &Vocabulary,
        dialect: DialectProfile,
    ) -> TurnOutcome {
        let ctx = RuleContext { oracle: self.oracle.as_ref(), vocabulary, dialect };
        let mut events = Vec::new();

        let after_first = pipeline::run_rules(&self.phase_one, &turn.content, &ctx, turn, meta, &mut events);
        if after_first.trim().is_empty() {
            events.push(pipeline::turn_dropped_event(turn, meta, &turn.content));
            return TurnOutcome { content: None, events };
        }

        let after_second = pipeline::run_rules(&self.phase_two, &after_first, &ctx, turn, meta, &mut events);
        if after_second.trim().is_empty() {
            events.push(pipeline::turn_dropped_event(turn, meta, &after_first));
            return TurnOutcome { content: None, events };
        }

        TurnOutcome { content: Some(after_second.trim().to_string()), events }
    }

    /// Split normalized turn content into utterances.
    pub fn segment(&self, content: &str) -> Vec<String> {
        Segmenter::new(self.analyzer.as_ref(), self.options.min_boundary_tokens).split_turn(content)
    }

    pub fn options(&self) -> &Options {
        &self.options
    }
}
