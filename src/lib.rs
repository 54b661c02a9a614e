extern crate self as oralis;

#[macro_use]
mod macros;
mod api;
mod capabilities;
mod corpus;
mod engine;
mod error;
mod rules;
mod segment;
mod turn;
mod vocab;

pub use api::{Options, Pipeline, TurnMeta, TurnOutcome};
pub use capabilities::{
    LexiconAnalyzer, MorphAnalyzer, MorphToken, Pos, SpellingOracle, VerbForm, WordListOracle,
};
pub use corpus::{RunConfig, RunSummary, run_corpus};
pub use engine::log::{RuleEvent, write_log};
pub use engine::spans::{ProtectedSpan, ProtectedSpans, SpanKind};
pub use engine::vault::Vault;
pub use error::PipelineError;
pub use rules::dialect::DialectProfile;
pub use segment::{BoundarySignals, Segmenter};
pub use turn::{Role, Turn, parse_line, parse_turns};
pub use vocab::Vocabulary;

// --- Internal rewrite primitives --------------------------------------------

/// One atomic content rewrite produced by a rule: the exact substring that was
/// removed or replaced, what it became, and a short action code for the log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rewrite {
    pub original: String,
    pub resulting: String,
    pub action: &'static str,
}

impl Rewrite {
    pub(crate) fn removed(original: impl Into<String>, action: &'static str) -> Self {
        Rewrite { original: original.into(), resulting: String::new(), action }
    }

    pub(crate) fn replaced(
        original: impl Into<String>,
        resulting: impl Into<String>,
        action: &'static str,
    ) -> Self {
        Rewrite { original: original.into(), resulting: resulting.into(), action }
    }
}

/// Result of applying one rule to one turn's content.
#[derive(Debug, Clone)]
pub(crate) struct Rewritten {
    pub text: String,
    pub events: Vec<Rewrite>,
}
