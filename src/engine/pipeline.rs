//! Ordered rule runner.
//!
//! Each rule is a value: an id, a phenomenon name for the log and a pure
//! `(text) -> (text, rewrites)` function. The runner threads one turn's
//! content through a fixed rule sequence and enriches every rewrite with the
//! turn/file metadata the provenance log needs. Holding rules as values keeps
//! each one unit-testable in isolation and lets tests substitute capability
//! fakes through [`RuleContext`].

use crate::capabilities::SpellingOracle;
use crate::engine::log::RuleEvent;
use crate::rules::dialect::DialectProfile;
use crate::turn::Turn;
use crate::vocab::Vocabulary;
use crate::{Rewrite, Rewritten};

/// Per-document context threaded into every rule application.
pub(crate) struct RuleContext<'a> {
    pub oracle: &'a dyn SpellingOracle,
    pub vocabulary: &'a Vocabulary,
    pub dialect: DialectProfile,
}

pub(crate) type Apply = Box<dyn Fn(&str, &RuleContext) -> Rewritten + Send + Sync>;

/// A normalization rule as a value.
pub(crate) struct Rule {
    pub id: u8,
    pub phenomenon: &'static str,
    pub apply: Apply,
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("id", &self.id)
            .field("phenomenon", &self.phenomenon)
            .field("apply", &"<function>")
            .finish()
    }
}

/// Metadata identifying the turn being rewritten.
#[derive(Debug, Clone)]
pub struct TurnMeta {
    pub file_id: String,
    pub utterance_id: String,
    pub line_number: usize,
}

/// Apply `rules` in order to `content`, appending enriched events to `sink`.
///
/// The `context` column of every event is the content as it entered this
/// phase, so a reviewer can always locate the rewrite in its source line.
pub(crate) fn run_rules(
    rules: &[Rule],
    content: &str,
    ctx: &RuleContext,
    turn: &Turn,
    meta: &TurnMeta,
    sink: &mut Vec<RuleEvent>,
) -> String {
    let mut text = content.to_string();
    for rule in rules {
        let outcome = (rule.apply)(&text, ctx);
        for rewrite in outcome.events {
            sink.push(enrich(rewrite, rule.id, rule.phenomenon, turn, meta, content));
        }
        text = outcome.text;
    }
    text
}

/// Build the single deletion row recorded when a turn empties out.
pub(crate) fn turn_dropped_event(turn: &Turn, meta: &TurnMeta, content: &str) -> RuleEvent {
    enrich(
        Rewrite::removed(content, "TURN_DROPPED"),
        0,
        "empty content after normalization",
        turn,
        meta,
        content,
    )
}

fn enrich(
    rewrite: Rewrite,
    rule_id: u8,
    phenomenon: &'static str,
    turn: &Turn,
    meta: &TurnMeta,
    context: &str,
) -> RuleEvent {
    RuleEvent {
        file_id: meta.file_id.clone(),
        utterance_id: meta.utterance_id.clone(),
        line_number: meta.line_number,
        speaker: turn.label.clone(),
        role: turn.role,
        rule_id,
        phenomenon,
        form_original: rewrite.original,
        form_resulting: rewrite.resulting,
        action: rewrite.action,
        context: context.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Rewritten;
    use crate::capabilities::testing::SetOracle;
    use crate::turn::Role;

    fn shout_rule() -> Rule {
        Rule {
            id: 99,
            phenomenon: "test rewrite",
            apply: Box::new(|text, _ctx| {
                if text.contains("ruido") {
                    Rewritten {
                        text: text.replace("ruido", ""),
                        events: vec![Rewrite::removed("ruido", "REMOVED")],
                    }
                } else {
                    Rewritten { text: text.to_string(), events: Vec::new() }
                }
            }),
        }
    }

    #[test]
    fn events_carry_turn_metadata() {
        let oracle = SetOracle::new(&[]);
        let vocabulary = Vocabulary::new();
        let ctx = RuleContext { oracle: &oracle, vocabulary: &vocabulary, dialect: DialectProfile::Neutral };
        let turn = Turn { label: "E1".into(), role: Role::Interviewer, content: "hay ruido aquí".into() };
        let meta = TurnMeta {
            file_id: "001_x.txt".into(),
            utterance_id: "UD00001".into(),
            line_number: 1,
        };

        let mut sink = Vec::new();
        let out = run_rules(&[shout_rule()], &turn.content, &ctx, &turn, &meta, &mut sink);
        assert_eq!(out, "hay  aquí");
        assert_eq!(sink.len(), 1);
        assert_eq!(sink[0].rule_id, 99);
        assert_eq!(sink[0].speaker, "E1");
        assert_eq!(sink[0].context, "hay ruido aquí");
    }
}
